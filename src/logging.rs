// ABOUTME: Tracing subscriber initialization for the report binary and library consumers
// ABOUTME: EnvFilter-driven log levels with a quiet info default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Logging setup.
//!
//! Call [`init`] once at process start. `RUST_LOG` controls levels; the
//! default keeps the engines quiet at `info` and surfaces their `debug!`
//! decision points only on request.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info";

/// Initialize the global tracing subscriber.
///
/// # Errors
/// Returns an error when a global subscriber is already installed.
pub fn init() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
