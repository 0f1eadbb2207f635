use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use block::Attributes;
use page_buffer::PageBuffer;
use serde::Deserialize;
use thiserror::Error;

/// Errors loading or validating a [`BufferConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML file could not be read from disk.
    #[error("failed to read config file {path}")]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The file's contents did not parse as valid TOML for this shape.
    #[error("failed to parse config file {path}")]
    ParseToml {
        /// Path whose contents failed to parse.
        path: PathBuf,
        /// Underlying parse failure.
        source: toml::de::Error,
    },
    /// The parsed config failed a validation rule.
    #[error("invalid buffer config: {message}")]
    Invalid {
        /// What about the config was invalid.
        message: String,
    },
}

/// Construction-time parameters for a [`crate::PageBuffer`].
///
/// Mirrors how a host process would configure a buffer pool: a target size
/// pages are kept near, and a floor below which a block is never split
/// purely to shrink it.
#[derive(Debug, Clone, Deserialize)]
pub struct BufferConfig {
    /// Pages are kept close to this many bytes; exceeding it on insert
    /// triggers a page split.
    pub target_page_size: NonZeroUsize,
    /// Blocks are never split below this many bytes purely to separate
    /// attributes. Defaults to `0` (no floor).
    #[serde(default)]
    pub min_block_size: usize,
}

impl BufferConfig {
    /// A config with the given target page size and no minimum block size.
    pub fn new(target_page_size: NonZeroUsize) -> Self {
        Self {
            target_page_size,
            min_block_size: 0,
        }
    }

    /// Loads and validates a [`BufferConfig`] from a TOML file at `path`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        let config: BufferConfig = toml::from_str(&text).map_err(|e| ConfigError::ParseToml {
            path: path.clone(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_block_size > self.target_page_size.get() {
            return Err(ConfigError::Invalid {
                message: "min_block_size must not exceed target_page_size".to_string(),
            });
        }
        Ok(())
    }

    /// Builds a fresh, empty [`PageBuffer`] targeting this config's page
    /// size.
    pub fn build<A: Attributes>(&self) -> PageBuffer<A> {
        PageBuffer::new(self.target_page_size.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_min_block_size_to_zero() {
        let config = BufferConfig::new(NonZeroUsize::new(4096).unwrap());
        assert_eq!(config.min_block_size, 0);
    }

    #[test]
    fn loading_a_missing_file_reports_io_error() {
        let err = BufferConfig::load_from_file("/no/such/path.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn validate_rejects_a_minimum_above_the_target() {
        let config = BufferConfig {
            target_page_size: NonZeroUsize::new(10).unwrap(),
            min_block_size: 20,
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }
}
