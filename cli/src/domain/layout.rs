//! Boot-sector geometry of a GRUB BIOS install.
//!
//! Pure functions only — no I/O, no async, no filesystem access.
//!
//! ```text
//! 0          440                offset      offset+512          offset+512+corelen*512
//! | boot.img |  ...  partition 2 | diskboot.img | core.img ...   |
//!                                         ^ bytes 508..510 = corelen (LE u16, sectors)
//! ```

use std::fmt;

use crate::domain::error::GeneratorError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Sector size assumed for both the partition table and `corelen`.
pub const SECTOR_SIZE: u64 = 512;

/// Length of the stage-1 boot code (MBR minus disk signature and table).
pub const BOOT_RECORD_LEN: u64 = 440;

/// Length of `diskboot.img`.
pub const DISKBOOT_LEN: u64 = 512;

/// Position of the little-endian `corelen` sector count inside diskboot.
pub const CORELEN_OFFSET: usize = 508;

/// Partition index holding the BIOS boot partition.
pub const BOOT_PARTITION: u32 = 2;

// ── Regions ──────────────────────────────────────────────────────────────────

/// One of the three hashed regions of the disk image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Boot,
    Diskboot,
    Core,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Boot, Region::Diskboot, Region::Core];

    /// Manifest key (the PCR the firmware/bootloader measures it into).
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Region::Boot => "4",
            Region::Diskboot => "8",
            Region::Core => "9",
        }
    }

    /// Image name used in descriptions.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Region::Boot => "boot.img",
            Region::Diskboot => "diskboot.img",
            Region::Core => "core.img",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw bytes of the three regions, as read from the image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootRegions {
    pub boot: Vec<u8>,
    pub diskboot: Vec<u8>,
    pub core: Vec<u8>,
}

// ── Decoders ─────────────────────────────────────────────────────────────────

/// Parse the partition tool's stdout as a start sector.
///
/// Surrounding whitespace and a leading `+` are accepted; anything else that
/// is not a non-negative base-10 integer is rejected.
///
/// # Errors
///
/// Returns [`GeneratorError::ToolOutput`] quoting the offending output.
pub fn parse_start_sector(stdout: &str) -> Result<u64, GeneratorError> {
    let trimmed = stdout.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GeneratorError::ToolOutput {
            output: stdout.to_string(),
        });
    }
    digits.parse().map_err(|_| GeneratorError::ToolOutput {
        output: stdout.to_string(),
    })
}

/// Convert a start sector to a byte offset.
///
/// # Errors
///
/// Returns [`GeneratorError::OffsetOverflow`] if the product overflows `u64`.
pub fn sector_to_offset(sector: u64) -> Result<u64, GeneratorError> {
    sector
        .checked_mul(SECTOR_SIZE)
        .ok_or(GeneratorError::OffsetOverflow { sector })
}

/// Decode the `corelen` sector count from a diskboot block.
///
/// Callers guarantee `diskboot` is a full 512-byte block; a shorter slice
/// yields 0.
#[must_use]
pub fn decode_corelen(diskboot: &[u8]) -> u16 {
    match diskboot.get(CORELEN_OFFSET..CORELEN_OFFSET + 2) {
        Some(&[lo, hi]) => u16::from_le_bytes([lo, hi]),
        _ => 0,
    }
}

/// Length in bytes of `core.img` for a given `corelen`.
#[must_use]
pub fn core_len_bytes(corelen: u16) -> u64 {
    u64::from(corelen) * SECTOR_SIZE
}
