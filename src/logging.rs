use crate::error::{Error, Result};

use std::{fs::File, path::Path, sync::Mutex};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "TERMFOLIO_LOG";
const DEFAULT_FILTER: &str = "info";

/// Installs a file-backed subscriber. The alternate screen owns stdout, so
/// without a path nothing is installed and events are dropped.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path).map_err(|source| Error::LogFile {
        path: path.to_path_buf(),
        source,
    })?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| Error::Subscriber(e.to_string()))?;

    tracing::info!(path = %path.display(), "logging initialised");

    Ok(())
}
