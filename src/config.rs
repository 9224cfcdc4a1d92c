use std::path::{Path, PathBuf};

use chrono::Duration;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Name of the optional configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "Voting.toml";

/// Prefix of environment variables overriding the configuration file.
pub const ENV_PREFIX: &str = "VOTING_";

/// Core configuration, derived from built-in defaults, `Voting.toml` and
/// `VOTING_*` environment variables, in increasing order of precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // non-secrets
    session_ttl: u32,
    remember_ttl: u32,
    data_dir: Option<PathBuf>,
    // secrets
    jwt_secret: String,
}

impl Config {
    /// Load the configuration from the standard sources.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load the configuration, reading the given TOML file instead of `Voting.toml`.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = Self::figment(path).extract()?;
        if config.jwt_secret.is_empty() {
            warn!("`jwt_secret` is empty, session tokens can be forged");
        }
        Ok(config)
    }

    /// The layered configuration sources, exposed so callers can add their own.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Valid lifetime of a non-remembered session, in seconds.
    /// Configured via `SESSION_TTL`.
    pub fn session_ttl(&self) -> Duration {
        Duration::seconds(self.session_ttl.into())
    }

    /// Valid lifetime of a "remember me" session, in seconds.
    /// Configured via `REMEMBER_TTL`.
    pub fn remember_ttl(&self) -> Duration {
        Duration::seconds(self.remember_ttl.into())
    }

    /// Directory for file-backed persistence, if any.
    /// Configured via `DATA_DIR`.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Secret key used to sign session tokens.
    /// Configured via `JWT_SECRET`.
    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_ttl: 60 * 60,
            remember_ttl: 30 * 24 * 60 * 60,
            data_dir: None,
            jwt_secret: String::new(),
        }
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl Config {
        pub fn example() -> Self {
            Self {
                jwt_secret: "test secret, do not use in production".to_string(),
                ..Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = Config::load_from("this file does not exist.toml").unwrap();
        assert_eq!(config.session_ttl(), Duration::hours(1));
        assert_eq!(config.remember_ttl(), Duration::days(30));
        assert_eq!(config.data_dir(), None);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "session_ttl = 120").unwrap();
        writeln!(file, "data_dir = \"/var/lib/voting\"").unwrap();
        writeln!(file, "jwt_secret = \"hunter2\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.session_ttl(), Duration::minutes(2));
        assert_eq!(config.remember_ttl(), Duration::days(30));
        assert_eq!(config.data_dir(), Some(Path::new("/var/lib/voting")));
        assert_eq!(config.jwt_secret(), b"hunter2");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "session_ttl = \"not a number\"").unwrap();

        assert!(matches!(
            Config::load_from(file.path()),
            Err(crate::Error::Config(_))
        ));
    }
}
