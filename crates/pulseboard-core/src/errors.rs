// ABOUTME: Unified error types for store persistence and engine operations
// ABOUTME: Defines HealthError with structured context and the HealthResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Error handling for the Pulseboard platform.
//!
//! Engines are pure functions over a measurement history and report bad
//! inputs as data (validation strings, empty results) rather than errors.
//! `HealthError` covers the paths that can genuinely fail: persistence,
//! serialization, and addressing records or interventions that don't exist.

use std::path::PathBuf;

/// Result alias used across the workspace
pub type HealthResult<T> = Result<T, HealthError>;

/// Common error type for store and engine operations
#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    /// Reading or writing a data file failed
    #[error("I/O error on {path}")]
    Io {
        /// File the operation targeted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Encoding or decoding a data file failed
    #[error("Serialization failed for {context}")]
    Serialization {
        /// Context where serialization failed
        context: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A record index does not address an existing record
    #[error("Record index {index} out of range (history has {len} records)")]
    RecordIndexOutOfRange {
        /// Index that was requested
        index: usize,
        /// Number of records in the history
        len: usize,
    },

    /// A goal index does not address an existing goal
    #[error("Goal index {index} out of range ({len} goals)")]
    GoalIndexOutOfRange {
        /// Index that was requested
        index: usize,
        /// Number of goals
        len: usize,
    },

    /// No tracked intervention carries the given instance id
    #[error("No active intervention with id {id}")]
    InterventionNotFound {
        /// Instance id that was requested
        id: uuid::Uuid,
    },

    /// Configuration value is missing or unusable
    #[error("Invalid configuration: {reason}")]
    Config {
        /// Why the configuration was rejected
        reason: String,
    },
}

impl HealthError {
    /// Build an I/O error with the file path that failed
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a serialization error with a short context label
    #[must_use]
    pub const fn serialization(context: &'static str, source: serde_json::Error) -> Self {
        Self::Serialization { context, source }
    }
}
