//! Application service — boot loader region hashing.
//!
//! Resolves where the BIOS boot partition starts, reads `boot.img`,
//! `diskboot.img` and `core.img` from the disk image, and digests each.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{BootRegionReader, PartitionTable};
use crate::domain::layout::{decode_corelen, sector_to_offset};
use crate::domain::manifest::LoaderDigests;
use crate::domain::{BootRegions, DigestAlgorithm};

/// Result of scanning the boot regions of one disk image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderScan {
    /// Byte offset of `diskboot.img`.
    pub offset: u64,
    /// Length of `core.img` in sectors.
    pub corelen: u16,
    pub digests: LoaderDigests,
}

/// Byte offset of the boot partition.
///
/// # Errors
///
/// Returns an error if the partition table cannot be queried or the start
/// sector overflows a byte offset.
pub async fn resolve_boot_offset(table: &impl PartitionTable, image: &Path) -> Result<u64> {
    let sector = table
        .start_sector(image)
        .await
        .with_context(|| format!("locating boot partition of {}", image.display()))?;
    let offset = sector_to_offset(sector)?;
    tracing::debug!(sector, offset, "resolved boot partition");
    Ok(offset)
}

/// Digest each region with `algorithm`.
#[must_use]
pub fn hash_boot_regions(regions: &BootRegions, algorithm: DigestAlgorithm) -> LoaderDigests {
    LoaderDigests {
        boot: algorithm.digest(&regions.boot),
        diskboot: algorithm.digest(&regions.diskboot),
        core: algorithm.digest(&regions.core),
    }
}

/// Resolve, read, and hash the boot regions of `image`.
///
/// # Errors
///
/// Returns an error if the image is unreadable, the partition table cannot
/// be queried, or any region is truncated.
pub async fn scan_loader(
    table: &impl PartitionTable,
    reader: &impl BootRegionReader,
    image: &Path,
    algorithm: DigestAlgorithm,
) -> Result<LoaderScan> {
    reader.ensure_readable(image)?;
    let offset = resolve_boot_offset(table, image).await?;
    let regions = reader.read_boot_regions(image, offset)?;
    let corelen = decode_corelen(&regions.diskboot);
    tracing::debug!(
        boot = regions.boot.len(),
        diskboot = regions.diskboot.len(),
        core = regions.core.len(),
        corelen,
        "read boot regions"
    );
    Ok(LoaderScan {
        offset,
        corelen,
        digests: hash_boot_regions(&regions, algorithm),
    })
}
