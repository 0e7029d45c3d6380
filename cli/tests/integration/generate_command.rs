//! Integration tests for a full generator run.

#![cfg(unix)]
#![allow(clippy::expect_used)]

use grub_hashes::domain::DigestAlgorithm;
use predicates::prelude::*;

use crate::support::{CORELEN, Fixture, SECTOR, disk_image};

const ALL: [&str; 4] = [
    "grub_commands.config",
    "grub_loader.config",
    "grub_modules.config",
    "kernel_cmdline.config",
];

fn sha1(bytes: &[u8]) -> String {
    DigestAlgorithm::Sha1.digest(bytes)
}

#[test]
fn test_generate_writes_all_manifests() {
    let f = Fixture::new();
    f.command("3975.2.0")
        .assert()
        .success()
        .stdout(predicate::str::contains("grub_loader.config (3 values)"))
        .stdout(predicate::str::contains("grub_modules.config (2 values)"))
        .stdout(predicate::str::contains("grub_commands.config (10 values)"));
    assert_eq!(f.written(), ALL);
}

#[test]
fn test_loader_manifest_matches_reference_encoding() {
    let f = Fixture::new();
    f.command("1.0").assert().success();

    let img = disk_image(SECTOR, CORELEN);
    let offset = usize::try_from(SECTOR * 512).expect("offset");
    let core_end = offset + 512 + usize::from(CORELEN) * 512;
    let entry = |key: &str, digest: String, label: &str| {
        format!(
            r#""{key}": {{"binaryvalues": [{{"values": [{{"description": "Flatcar Grub {label} 1.0", "value": "{digest}"}}]}}]}}"#
        )
    };
    let expected = format!(
        "{{{}, {}, {}}}",
        entry("4", sha1(&img[..440]), "boot.img"),
        entry("8", sha1(&img[offset..offset + 512]), "diskboot.img"),
        entry("9", sha1(&img[offset + 512..core_end]), "core.img"),
    );
    assert_eq!(
        String::from_utf8(f.read("grub_loader.config")).expect("utf8"),
        expected
    );
}

#[test]
fn test_module_manifest_lists_sorted_modules_with_prefix() {
    let f = Fixture::new();
    f.command("1.0").assert().success();
    let expected = format!(
        r#"{{"9": {{"binaryvalues": [{{"prefix": "grub_module", "values": [{{"value": "{}", "description": "Flatcar Grub linux.mod 1.0"}}, {{"value": "{}", "description": "Flatcar Grub normal.mod 1.0"}}]}}]}}}}"#,
        sha1(b"linux"),
        sha1(b"normal"),
    );
    assert_eq!(
        String::from_utf8(f.read("grub_modules.config")).expect("utf8"),
        expected
    );
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let f = Fixture::new();
    f.command("1.0").assert().success();
    let first: Vec<_> = ALL.iter().map(|n| f.read(n)).collect();
    f.command("1.0").assert().success();
    let second: Vec<_> = ALL.iter().map(|n| f.read(n)).collect();
    assert_eq!(first, second);
}

#[test]
fn test_version_is_substituted_into_static_manifests() {
    let f = Fixture::new();
    f.command("4081.1.0").assert().success();
    let cmdline = f.read_json("kernel_cmdline.config");
    let group = &cmdline["8"]["asciivalues"][0];
    assert_eq!(group["prefix"], "grub_kernel_cmdline");
    assert_eq!(
        group["values"][0]["description"],
        "Flatcar kernel command line 4081.1.0"
    );
    let commands = f.read_json("grub_commands.config");
    let values = commands["8"]["asciivalues"][0]["values"]
        .as_array()
        .expect("values");
    assert_eq!(values.len(), 10);
    assert!(
        values
            .iter()
            .all(|v| v["description"] == "Flatcar Grub configuration 4081.1.0")
    );
    assert_eq!(values[0]["value"], r"\[.*\]");
}

#[test]
fn test_non_ascii_module_name_is_escaped() {
    let f = Fixture::new();
    std::fs::write(f.modules.join("caf\u{e9}.mod"), b"x").expect("write");
    f.command("1.0").assert().success();
    let raw = String::from_utf8(f.read("grub_modules.config")).expect("utf8");
    assert!(raw.is_ascii());
    assert!(raw.contains(r"Flatcar Grub caf\u00e9.mod 1.0"), "{raw}");
}

#[test]
fn test_sha256_option_changes_digest_width() {
    let f = Fixture::new();
    f.command("1.0")
        .args(["--algorithm", "sha256"])
        .assert()
        .success();
    let loader = f.read_json("grub_loader.config");
    let value = loader["4"]["binaryvalues"][0]["values"][0]["value"]
        .as_str()
        .expect("value");
    assert_eq!(value.len(), 64);
}

#[test]
fn test_config_file_supplies_distributor() {
    let f = Fixture::new();
    let config = f.path("grub-hashes.yaml");
    std::fs::write(&config, "distributor: Acme\n").expect("write config");
    f.command("1.0").arg("--config").arg(&config).assert().success();
    let loader = f.read_json("grub_loader.config");
    assert_eq!(
        loader["4"]["binaryvalues"][0]["values"][0]["description"],
        "Acme Grub boot.img 1.0"
    );
}

#[test]
fn test_no_color_env_accepts_conventional_values() {
    for value in ["1", "yes", "true"] {
        let f = Fixture::new();
        f.command("1.0").env("NO_COLOR", value).assert().success();
        assert_eq!(f.written(), ALL, "NO_COLOR={value}");
    }
}

#[test]
fn test_quiet_suppresses_progress() {
    let f = Fixture::new();
    f.command("1.0")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert_eq!(f.written(), ALL);
}

// --- Failure paths ---

#[test]
fn test_missing_image_writes_nothing() {
    let f = Fixture::new();
    std::fs::remove_file(&f.image).expect("rm image");
    f.command("1.0")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("input: cannot read"));
    assert!(f.written().is_empty());
}

#[test]
fn test_failing_partition_tool_writes_nothing() {
    let f = Fixture::new();
    f.set_tool("echo 'ERROR: bad table' >&2\nexit 1");
    f.command("1.0")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERROR: bad table"));
    assert!(f.written().is_empty());
}

#[test]
fn test_unparseable_tool_output_writes_nothing() {
    let f = Fixture::new();
    f.set_tool("echo 'Start: 4096'");
    f.command("1.0")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected a decimal start sector"));
    assert!(f.written().is_empty());
}

#[test]
fn test_missing_partition_tool_is_reported() {
    let f = Fixture::new();
    f.command_with_tool("1.0", &f.path("absent-cgpt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("partition tool: failed to run"));
    assert!(f.written().is_empty());
}

#[test]
fn test_truncated_image_writes_nothing() {
    let f = Fixture::new();
    let mut img = disk_image(SECTOR, CORELEN);
    img.truncate(usize::try_from(SECTOR * 512).expect("offset") + 512 + 512);
    std::fs::write(&f.image, img).expect("write image");
    f.command("1.0")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("core.img truncated"));
    assert!(f.written().is_empty());
}

#[test]
fn test_missing_output_dir_fails() {
    let f = Fixture::new();
    std::fs::remove_dir(&f.out).expect("rm out");
    f.command("1.0")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("output: cannot write"));
    assert!(!f.out.exists());
}
