// ABOUTME: Environment-driven store configuration with a platform data-dir default
// ABOUTME: Resolves the directory holding the three flat JSON data files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Store configuration.
//!
//! Configuration is environment-only: `PULSEBOARD_DATA_DIR` overrides the
//! platform data directory. The directory is created on first use by the
//! store, not here.

use pulseboard_core::{HealthError, HealthResult};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "PULSEBOARD_DATA_DIR";

/// Subdirectory under the platform data dir when no override is set
const DEFAULT_SUBDIR: &str = "pulseboard";

/// Where the store keeps its JSON files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the data files
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Resolve configuration from the environment.
    ///
    /// Uses `PULSEBOARD_DATA_DIR` when set and non-empty, otherwise the
    /// platform data directory plus a `pulseboard` subdirectory.
    ///
    /// # Errors
    /// Returns [`HealthError::Config`] when no override is set and the
    /// platform provides no data directory.
    pub fn from_env() -> HealthResult<Self> {
        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(Self {
                    data_dir: PathBuf::from(dir),
                });
            }
        }

        dirs::data_dir()
            .map(|base| Self {
                data_dir: base.join(DEFAULT_SUBDIR),
            })
            .ok_or_else(|| HealthError::Config {
                reason: format!("no platform data directory available; set {DATA_DIR_ENV}"),
            })
    }

    /// Point the store at an explicit directory
    #[must_use]
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: dir.as_ref().to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn explicit_dir_is_kept_verbatim() {
        let config = StoreConfig::with_dir("/tmp/pulseboard-test");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/pulseboard-test"));
    }
}
