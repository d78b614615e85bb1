//! File-backed configuration adapter.
//!
//! Loads [`RelayConfig`] from a JSON file. A missing file yields the
//! defaults (first deployment); a malformed or invalid file is an error,
//! not a silent fallback.

use std::io::ErrorKind;
use std::path::PathBuf;

use log::{error, warn};

use crate::app::ports::ConfigPort;
use crate::config::RelayConfig;
use crate::error::{Error, Result};

/// [`ConfigPort`] over a JSON file on disk.
pub struct FileConfig {
    path: PathBuf,
}

impl FileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigPort for FileConfig {
    fn load(&self) -> Result<RelayConfig> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "config file {} not found, using defaults",
                    self.path.display()
                );
                return Ok(RelayConfig::default());
            }
            Err(e) => {
                error!("config read failed: {e}");
                return Err(Error::Config("config file unreadable"));
            }
        };

        let config: RelayConfig = serde_json::from_str(&raw).map_err(|e| {
            error!("config parse failed: {e}");
            Error::Config("config file malformed")
        })?;

        config.validate()?;
        Ok(config)
    }
}
