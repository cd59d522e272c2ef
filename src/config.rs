//! Event file writer configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for [`crate::writer::EventFileWriter`].
///
/// Loadable from JSON so that training scripts can share one config file:
///
/// ```rust
/// use trueno_hparams::WriterConfig;
///
/// let config = WriterConfig::from_json_str(r#"{"logdir": "logs/run-1"}"#)?;
/// assert!(config.flush_every_write);
/// # Ok::<(), trueno_hparams::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterConfig {
    /// Directory the event file is created in (created if missing).
    pub logdir: PathBuf,
    /// Appended to the event file name.
    #[serde(default)]
    pub filename_suffix: String,
    /// Flush after every record instead of only on close.
    #[serde(default = "default_flush_every_write")]
    pub flush_every_write: bool,
}

const fn default_flush_every_write() -> bool {
    true
}

impl WriterConfig {
    /// Create a config for `logdir` with default settings.
    #[must_use]
    pub fn new(logdir: impl AsRef<Path>) -> Self {
        Self {
            logdir: logdir.as_ref().to_path_buf(),
            filename_suffix: String::new(),
            flush_every_write: default_flush_every_write(),
        }
    }

    /// Set the file name suffix.
    #[must_use]
    pub fn filename_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.filename_suffix = suffix.into();
        self
    }

    /// Set whether to flush after every record.
    #[must_use]
    pub const fn flush_every_write(mut self, flush: bool) -> Self {
        self.flush_every_write = flush;
        self
    }

    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` for malformed JSON and `Error::InvalidConfig`
    /// if validation fails.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config is usable.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for an empty logdir or a suffix
    /// containing a path separator.
    pub fn validate(&self) -> Result<()> {
        if self.logdir.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("logdir must not be empty".to_string()));
        }
        if self.filename_suffix.contains(['/', '\\']) {
            return Err(Error::InvalidConfig(format!(
                "filename_suffix must not contain path separators: {:?}",
                self.filename_suffix
            )));
        }
        Ok(())
    }
}
