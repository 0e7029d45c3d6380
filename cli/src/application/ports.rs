//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{BootRegions, DigestAlgorithm};

// ── Process ports ─────────────────────────────────────────────────────────────

/// Generic command execution with timeout and guaranteed process kill.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `program` to completion, capturing stdout/stderr, killing it if it
    /// outlives `timeout`.
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

/// Partition-table queries against a disk image.
#[allow(async_fn_in_trait)]
pub trait PartitionTable {
    /// First sector of the boot partition.
    async fn start_sector(&self, image: &Path) -> Result<u64>;
}

// ── Filesystem ports ──────────────────────────────────────────────────────────

/// Random access to the boot regions of a disk image.
pub trait BootRegionReader {
    /// Fail with an input error if `image` cannot be opened.
    fn ensure_readable(&self, image: &Path) -> Result<()>;

    /// Read `boot.img`, the diskboot block at `offset`, and the core image
    /// that follows it.
    fn read_boot_regions(&self, image: &Path, offset: u64) -> Result<BootRegions>;
}

/// A directory tree of GRUB module files.
pub trait ModuleStore {
    /// Every regular file under `dir` whose name ends with `suffix`, in
    /// file-name sorted traversal order.
    fn list_modules(&self, dir: &Path, suffix: &str) -> Result<Vec<PathBuf>>;

    /// Hex digest of one module file.
    fn hash_module(&self, path: &Path, algorithm: DigestAlgorithm) -> Result<String>;
}

/// Destination for encoded manifests.
pub trait ManifestSink {
    /// Fail early if nothing can be written.
    fn ensure_writable(&self) -> Result<()>;

    /// Write (or replace) the manifest `name`, returning its full path.
    fn write_manifest(&self, name: &str, contents: &[u8]) -> Result<PathBuf>;
}

// ── Presentation ports ────────────────────────────────────────────────────────

/// Progress reporting port — allows services to emit progress without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Report a step in progress.
    fn step(&self, message: &str);
    /// Report a successful completion.
    fn success(&self, message: &str);
    /// Report a warning.
    fn warn(&self, message: &str);
}
