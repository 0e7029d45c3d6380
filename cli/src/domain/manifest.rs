//! Manifest documents consumed by the measurement policy.
//!
//! Pure functions only — no I/O, no async, no filesystem access.
//!
//! Every manifest maps a PCR key (`"4"`, `"8"`, `"9"`) to groups of expected
//! values. Binary manifests carry hex digests; ascii manifests carry regular
//! expressions matched against measured strings.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::layout::Region;

// ── Constants ────────────────────────────────────────────────────────────────

pub const LOADER_FILE: &str = "grub_loader.config";
pub const MODULES_FILE: &str = "grub_modules.config";
pub const KERNEL_CMDLINE_FILE: &str = "kernel_cmdline.config";
pub const COMMANDS_FILE: &str = "grub_commands.config";

pub const DEFAULT_DISTRIBUTOR: &str = "Flatcar";

const MODULE_PREFIX: &str = "grub_module";
const KERNEL_CMDLINE_PREFIX: &str = "grub_kernel_cmdline";
const COMMAND_PREFIX: &str = "grub_cmd";

/// Expected kernel command line, as logged by GRUB's `linux` command.
pub const KERNEL_CMDLINE_PATTERN: &str = r"rootflags=rw mount.usrflags=ro BOOT_IMAGE=/flatcar/vmlinuz-[ab] mount.usr=PARTUUID=\S{36} rootflags=rw mount.usrflags=ro consoleblank=0 root=LABEL=ROOT (console=\S+)? (flatcar.autologin=\S+)? verity.usrhash=\S{64}";

/// Every command line `grub.cfg` is allowed to execute.
pub const GRUB_COMMAND_PATTERNS: [&str; 10] = [
    r"\[.*\]",
    "gptprio.next -d usr -u usr_uuid",
    "insmod all_video",
    r"linux /flatcar/vmlinuz-[ab] rootflags=rw mount.usrflags=ro consoleblank=0 root=LABEL=ROOT (console=\S+)? (flatcar.autologin=\S+)?",
    r"menuentry Flatcar \S+ --id=flatcar\S* {",
    "search --no-floppy --set randomize_disk_guid --disk-uuid 00000000-0000-0000-0000-000000000001",
    "search --no-floppy --set oem --part-label OEM --hint hd0,gpt1",
    "set .+",
    "setparams Flatcar default",
    "source (hd0,gpt6)/grub.cfg",
];

// ── Schema ───────────────────────────────────────────────────────────────────

/// A whole manifest file: PCR key → entry.
pub type Manifest = BTreeMap<String, ManifestEntry>;

/// Expected values for one PCR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ManifestEntry {
    #[serde(rename = "binaryvalues")]
    Binary(Vec<ValueGroup>),
    #[serde(rename = "asciivalues")]
    Ascii(Vec<ValueGroup>),
}

impl ManifestEntry {
    #[must_use]
    pub fn groups(&self) -> &[ValueGroup] {
        match self {
            Self::Binary(groups) | Self::Ascii(groups) => groups,
        }
    }
}

/// A list of values sharing an optional event prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub values: Vec<ValueEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueEntry {
    pub value: String,
    pub description: String,
}

/// Number of values across every entry of a manifest.
#[must_use]
pub fn value_count(manifest: &Manifest) -> usize {
    manifest
        .values()
        .flat_map(ManifestEntry::groups)
        .map(|g| g.values.len())
        .sum()
}

// ── Inputs ───────────────────────────────────────────────────────────────────

/// Hex digests of the three boot regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderDigests {
    pub boot: String,
    pub diskboot: String,
    pub core: String,
}

impl LoaderDigests {
    #[must_use]
    pub fn get(&self, region: Region) -> &str {
        match region {
            Region::Boot => &self.boot,
            Region::Diskboot => &self.diskboot,
            Region::Core => &self.core,
        }
    }
}

/// Hex digest of one GRUB module file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDigest {
    /// Bare file name, e.g. `normal.mod`.
    pub file_name: String,
    pub digest: String,
}

// ── Builders ─────────────────────────────────────────────────────────────────

/// `grub_loader.config`: one unprefixed group per boot region.
#[must_use]
pub fn loader_manifest(digests: &LoaderDigests, version: &str, distributor: &str) -> Manifest {
    Region::ALL
        .iter()
        .map(|&region| {
            let group = ValueGroup {
                prefix: None,
                values: vec![ValueEntry {
                    value: digests.get(region).to_string(),
                    description: format!("{distributor} Grub {} {version}", region.label()),
                }],
            };
            (region.key().to_string(), ManifestEntry::Binary(vec![group]))
        })
        .collect()
}

/// `grub_modules.config`: every module under PCR 9, in the given order.
#[must_use]
pub fn module_manifest(modules: &[ModuleDigest], version: &str, distributor: &str) -> Manifest {
    let values = modules
        .iter()
        .map(|m| ValueEntry {
            value: m.digest.clone(),
            description: format!("{distributor} Grub {} {version}", m.file_name),
        })
        .collect();
    single(
        Region::Core.key(),
        ManifestEntry::Binary(vec![ValueGroup {
            prefix: Some(MODULE_PREFIX.to_string()),
            values,
        }]),
    )
}

/// `kernel_cmdline.config`: the expected kernel command line under PCR 8.
#[must_use]
pub fn kernel_cmdline_manifest(version: &str, distributor: &str) -> Manifest {
    let description = format!("{distributor} kernel command line {version}");
    ascii_manifest(KERNEL_CMDLINE_PREFIX, &[KERNEL_CMDLINE_PATTERN], &description)
}

/// `grub_commands.config`: the allowed `grub.cfg` commands under PCR 8.
#[must_use]
pub fn grub_commands_manifest(version: &str, distributor: &str) -> Manifest {
    let description = format!("{distributor} Grub configuration {version}");
    ascii_manifest(COMMAND_PREFIX, &GRUB_COMMAND_PATTERNS, &description)
}

fn ascii_manifest(prefix: &str, patterns: &[&str], description: &str) -> Manifest {
    let values = patterns
        .iter()
        .map(|p| ValueEntry {
            value: (*p).to_string(),
            description: description.to_string(),
        })
        .collect();
    single(
        Region::Diskboot.key(),
        ManifestEntry::Ascii(vec![ValueGroup {
            prefix: Some(prefix.to_string()),
            values,
        }]),
    )
}

fn single(key: &str, entry: ManifestEntry) -> Manifest {
    BTreeMap::from([(key.to_string(), entry)])
}
