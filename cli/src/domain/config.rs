//! Domain types for generator configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use serde::{Deserialize, Serialize};

use crate::domain::digest::DigestAlgorithm;
use crate::domain::layout::BOOT_PARTITION;
use crate::domain::manifest::DEFAULT_DISTRIBUTOR;

// ── Defaults ─────────────────────────────────────────────────────────────────

pub const DEFAULT_PARTITION_TOOL: &str = "cgpt";
pub const DEFAULT_MODULE_SUFFIX: &str = ".mod";
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

// ── Config schema ────────────────────────────────────────────────────────────

/// Settings read from the optional YAML config file.
///
/// Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Partition-table query program, invoked as `<tool> show -i N -b IMAGE`.
    pub partition_tool: String,
    /// Index of the BIOS boot partition.
    pub partition: u32,
    /// Digest used for the binary manifests.
    pub algorithm: DigestAlgorithm,
    /// File-name suffix selecting GRUB modules.
    pub module_suffix: String,
    /// OS name prefixed to every description.
    pub distributor: String,
    /// Seconds to wait for the partition tool before killing it.
    pub tool_timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            partition_tool: DEFAULT_PARTITION_TOOL.to_string(),
            partition: BOOT_PARTITION,
            algorithm: DigestAlgorithm::default(),
            module_suffix: DEFAULT_MODULE_SUFFIX.to_string(),
            distributor: DEFAULT_DISTRIBUTOR.to_string(),
            tool_timeout_secs: DEFAULT_TOOL_TIMEOUT_SECS,
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub partition_tool: Option<String>,
    pub partition: Option<u32>,
    pub algorithm: Option<DigestAlgorithm>,
    pub module_suffix: Option<String>,
    pub distributor: Option<String>,
    pub tool_timeout_secs: Option<u64>,
}

impl GeneratorConfig {
    /// Apply command-line overrides on top of file/default values.
    #[must_use]
    pub fn with_overrides(mut self, o: ConfigOverrides) -> Self {
        if let Some(v) = o.partition_tool {
            self.partition_tool = v;
        }
        if let Some(v) = o.partition {
            self.partition = v;
        }
        if let Some(v) = o.algorithm {
            self.algorithm = v;
        }
        if let Some(v) = o.module_suffix {
            self.module_suffix = v;
        }
        if let Some(v) = o.distributor {
            self.distributor = v;
        }
        if let Some(v) = o.tool_timeout_secs {
            self.tool_timeout_secs = v;
        }
        self
    }
}
