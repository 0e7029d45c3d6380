//! Disk image infrastructure — reads the GRUB boot regions.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::Result;

use crate::application::ports::BootRegionReader;
use crate::domain::layout::{
    BOOT_RECORD_LEN, DISKBOOT_LEN, Region, core_len_bytes, decode_corelen,
};
use crate::domain::{BootRegions, GeneratorError};

/// Reads boot regions straight from an image file on disk.
pub struct FileImageReader;

impl BootRegionReader for FileImageReader {
    fn ensure_readable(&self, image: &Path) -> Result<()> {
        open(image)?;
        Ok(())
    }

    fn read_boot_regions(&self, image: &Path, offset: u64) -> Result<BootRegions> {
        let mut file = open(image)?;
        let boot = read_region(&mut file, image, Region::Boot, 0, BOOT_RECORD_LEN)?;
        let diskboot = read_region(&mut file, image, Region::Diskboot, offset, DISKBOOT_LEN)?;
        let corelen = decode_corelen(&diskboot);
        let core = read_region(
            &mut file,
            image,
            Region::Core,
            offset.saturating_add(DISKBOOT_LEN),
            core_len_bytes(corelen),
        )?;
        Ok(BootRegions {
            boot,
            diskboot,
            core,
        })
    }
}

fn open(image: &Path) -> Result<File, GeneratorError> {
    File::open(image).map_err(|source| GeneratorError::Input {
        path: image.to_path_buf(),
        source,
    })
}

/// Read exactly `len` bytes at `offset`; anything shorter is a truncated read.
fn read_region(
    file: &mut File,
    image: &Path,
    region: Region,
    offset: u64,
    len: u64,
) -> Result<Vec<u8>, GeneratorError> {
    let input = |source| GeneratorError::Input {
        path: image.to_path_buf(),
        source,
    };
    file.seek(SeekFrom::Start(offset)).map_err(input)?;
    let mut buf = Vec::new();
    file.by_ref()
        .take(len)
        .read_to_end(&mut buf)
        .map_err(input)?;
    let actual = buf.len() as u64;
    if actual < len {
        return Err(GeneratorError::TruncatedRead {
            region,
            expected: len,
            actual,
        });
    }
    Ok(buf)
}
