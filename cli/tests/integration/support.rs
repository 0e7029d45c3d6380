//! Fixture builder shared by the integration tests.

#![cfg(unix)]
#![allow(clippy::expect_used, dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub const SECTOR: u64 = 4;
pub const CORELEN: u16 = 3;

pub fn grub_hashes() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("grub-hashes"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("GRUB_HASHES_CONFIG");
    cmd.env_remove("GRUB_HASHES_PARTITION_TOOL");
    cmd
}

/// A disk image, module tree, output directory and stub `cgpt` on disk.
pub struct Fixture {
    pub root: TempDir,
    pub image: PathBuf,
    pub modules: PathBuf,
    pub out: PathBuf,
    pub tool: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let root = TempDir::new().expect("tempdir");
        let image = root.path().join("disk.img");
        let modules = root.path().join("grub");
        let out = root.path().join("out");
        let tool = root.path().join("cgpt");

        std::fs::write(&image, disk_image(SECTOR, CORELEN)).expect("write image");
        std::fs::create_dir_all(modules.join("i386-pc")).expect("mkdir modules");
        std::fs::write(modules.join("i386-pc/normal.mod"), b"normal").expect("write");
        std::fs::write(modules.join("i386-pc/linux.mod"), b"linux").expect("write");
        std::fs::write(modules.join("i386-pc/moddep.lst"), b"deps").expect("write");
        std::fs::create_dir(&out).expect("mkdir out");

        let fixture = Self {
            root,
            image,
            modules,
            out,
            tool,
        };
        fixture.set_tool(&format!(
            "[ \"$1 $2 $3 $4\" = \"show -i 2 -b\" ] || exit 3\necho {SECTOR}"
        ));
        fixture
    }

    /// Replace the stub partition tool's body.
    pub fn set_tool(&self, body: &str) {
        std::fs::write(&self.tool, format!("#!/bin/sh\n{body}\n")).expect("write tool");
        std::fs::set_permissions(&self.tool, std::fs::Permissions::from_mode(0o755))
            .expect("chmod tool");
    }

    /// A command with all four positionals and the stub tool wired in.
    pub fn command(&self, version: &str) -> Command {
        self.command_with_tool(version, &self.tool)
    }

    /// Same as [`Fixture::command`] but invoking `tool` as the partition tool.
    pub fn command_with_tool(&self, version: &str, tool: &Path) -> Command {
        let mut cmd = grub_hashes();
        cmd.arg(&self.image)
            .arg(&self.modules)
            .arg(&self.out)
            .arg(version)
            .arg("--partition-tool")
            .arg(tool);
        cmd
    }

    pub fn read(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.out.join(name)).expect("manifest exists")
    }

    pub fn read_json(&self, name: &str) -> serde_json::Value {
        serde_json::from_slice(&self.read(name)).expect("valid JSON")
    }

    pub fn written(&self) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(&self.out)
            .expect("ls out")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }
}

/// Image with distinct fill bytes per region and one sector of slack.
pub fn disk_image(sector: u64, corelen: u16) -> Vec<u8> {
    let offset = usize::try_from(sector * 512).expect("offset");
    let core = usize::from(corelen) * 512;
    let mut img = vec![0x11u8; offset + 512 + core + 512];
    img[..440].fill(0xA0);
    img[offset..offset + 512].fill(0xB0);
    img[offset + 508..offset + 510].copy_from_slice(&corelen.to_le_bytes());
    img[offset + 512..offset + 512 + core].fill(0xC0);
    img
}
