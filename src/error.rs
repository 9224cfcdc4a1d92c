use argon2::Error as Argon2Error;
use figment::Error as ConfigError;
use jsonwebtoken::errors::Error as JwtError;
use serde_json::Error as SerdeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Collection '{collection}' is corrupt: {source}")]
    Corrupt {
        collection: &'static str,
        source: SerdeError,
    },
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error(transparent)]
    Argon2(#[from] Argon2Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to initialise logging: {0}")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn logging(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Logging(source.into())
    }

    /// A short, stable name for the kind of error, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Conflict(_) => "conflict",
            Self::Unauthorized(_) => "unauthorized",
            Self::Unauthenticated(_) => "unauthenticated",
            Self::NotFound(_) => "not found",
            Self::Corrupt { .. } => "corrupt",
            Self::Jwt(_)
            | Self::Argon2(_)
            | Self::Serde(_)
            | Self::Io(_)
            | Self::Config(_)
            | Self::Logging(_) => "internal",
        }
    }

    /// Is this an expected outcome of bad input, rather than a fault in the core?
    pub fn is_client_error(&self) -> bool {
        !matches!(self.kind(), "internal" | "corrupt")
    }
}

/// Malformed input, caught before anything touches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{0}' is required")]
    Blank(&'static str),
    #[error("Invalid email address '{0}'")]
    Email(String),
    #[error("Invalid birth date '{0}', expected YYYY-MM-DD")]
    BirthDate(String),
    #[error("Voters must be at least 18 years old, got {0}")]
    Underage(i32),
    #[error("Unknown gender '{0}'")]
    Gender(String),
    #[error("Unknown municipality '{0}'")]
    Municipality(String),
    #[error("Unknown age range '{0}'")]
    AgeRange(String),
    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),
    #[error("Passwords do not match")]
    PasswordMismatch,
}
