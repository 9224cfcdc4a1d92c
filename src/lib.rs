//! The persistence-and-aggregation core of an election platform.
//!
//! Everything goes through a [`Platform`], which owns the record store, the
//! session slots and the configuration. Operations are grouped by concern in
//! the [`api`] module.

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate core_test;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub use config::Config;
pub use error::{Error, Result, ValidationError};

use model::auth::Sessions;
use model::store::Store;
use model::substrate::{FileSubstrate, MemorySubstrate, Substrate};

/// A handle on one election's data.
///
/// Mutating operations borrow the handle mutably, so there is only ever one
/// writer per process.
#[derive(Debug)]
pub struct Platform<S = MemorySubstrate> {
    config: Config,
    store: Store<S>,
    sessions: Sessions<S>,
}

impl<S> Platform<S>
where
    S: Substrate,
{
    /// Build a platform keeping records in `store` and persistent sessions in `sessions`.
    pub fn new(config: Config, store: S, sessions: S) -> Self {
        Self {
            config,
            store: Store::new(store),
            sessions: Sessions::new(sessions),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    pub fn sessions(&self) -> &Sessions<S> {
        &self.sessions
    }
}

impl Platform<MemorySubstrate> {
    /// A platform that forgets everything when dropped.
    pub fn in_memory(config: Config) -> Self {
        Self::new(config, MemorySubstrate::new(), MemorySubstrate::new())
    }
}

impl Platform<FileSubstrate> {
    /// A platform persisting to the configured `data_dir`.
    pub fn open(config: Config) -> Result<Self> {
        let dir = config
            .data_dir()
            .ok_or_else(|| Error::Config(figment::Error::from("`data_dir` is not set".to_string())))?
            .to_path_buf();
        let substrate = FileSubstrate::open(dir)?;
        info!("Opened platform at {}", substrate.dir().display());
        Ok(Self::new(config, substrate.clone(), substrate))
    }
}
