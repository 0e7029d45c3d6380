//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `tokio`, `std::fs`, or `std::process`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::layout::Region;

/// Every way a generator run can fail. All variants are fatal.
#[derive(Debug, Error)]
pub enum GeneratorError {
    // ── Input stage ──────────────────────────────────────────────────────────
    #[error("input: cannot read {}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Partition tool stage ─────────────────────────────────────────────────
    #[error("partition tool: failed to run '{tool}'")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("partition tool: '{tool}' exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("partition tool: '{tool}' timed out after {secs}s")]
    ToolTimeout { tool: String, secs: u64 },

    #[error("partition tool: expected a decimal start sector, got {output:?}")]
    ToolOutput { output: String },

    #[error("partition tool: start sector {sector} does not fit in a byte offset")]
    OffsetOverflow { sector: u64 },

    // ── Region extraction stage ──────────────────────────────────────────────
    #[error("disk image: {region} truncated, expected {expected} bytes but read {actual}")]
    TruncatedRead {
        region: Region,
        expected: u64,
        actual: u64,
    },

    // ── Output stage ─────────────────────────────────────────────────────────
    #[error("output: cannot write {}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Configuration ────────────────────────────────────────────────────────
    #[error("config: {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl GeneratorError {
    /// Short name of the pipeline stage that failed.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Input { .. } => "input",
            Self::ToolSpawn { .. }
            | Self::ToolFailed { .. }
            | Self::ToolTimeout { .. }
            | Self::ToolOutput { .. }
            | Self::OffsetOverflow { .. } => "partition tool",
            Self::TruncatedRead { .. } => "disk image",
            Self::Output { .. } => "output",
            Self::Config { .. } => "config",
        }
    }
}
