use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};

use crate::error::{Error, Result};

/// Pattern used by [`init_console`].
const CONSOLE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} {t} - {m}{n}";

/// Initialise logging from a log4rs YAML or TOML file, e.g. `log4rs.yaml`.
pub fn init_file(path: impl AsRef<Path>) -> Result<()> {
    log4rs::init_file(path, Default::default()).map_err(Error::logging)
}

/// Initialise logging to stderr at the given level, for embedders without a config file.
pub fn init_console(level: LevelFilter) -> Result<()> {
    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(Error::logging)?;
    log4rs::init_config(config).map_err(Error::logging)?;
    Ok(())
}

/// A unique identifier for a particular operation on the core.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct OperationId(pub usize);

impl Display for OperationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OperationId {
    /// Atomically get the next ID. This wraps around back to zero if you somehow exceed a usize.
    pub fn next() -> OperationId {
        static OPERATION_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);
        OperationId(OPERATION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Logs the start and outcome of one public operation.
#[derive(Debug)]
pub struct Operation {
    id: OperationId,
    name: &'static str,
}

impl Operation {
    /// Assign an ID and log the incoming operation.
    pub fn start(name: &'static str) -> Self {
        let id = OperationId::next();
        debug!("->op{id} {name}");
        Self { id, name }
    }

    pub fn id(&self) -> OperationId {
        self.id
    }

    /// Log the outcome, at a level depending on who is at fault, and pass it through.
    pub fn finish<T>(self, result: Result<T>) -> Result<T> {
        let Self { id, name } = self;
        match &result {
            Ok(_) => debug!("<-op{id} {name} ok"),
            Err(e) if e.is_client_error() => warn!("<-op{id} {name} {}: {e}", e.kind()),
            Err(e) => error!("<-op{id} {name} {}: {e}", e.kind()),
        }
        result
    }
}
