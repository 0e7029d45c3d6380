//! Application service — full manifest generation.
//!
//! Every manifest is built and encoded in memory before the first file is
//! written, so a failure while reading inputs never leaves output behind.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::{
    BootRegionReader, ManifestSink, ModuleStore, PartitionTable, ProgressReporter,
};
use crate::application::services::{loader, modules};
use crate::domain::GeneratorConfig;
use crate::domain::encode::{KeyOrder, to_manifest_json};
use crate::domain::manifest::{
    COMMANDS_FILE, KERNEL_CMDLINE_FILE, LOADER_FILE, MODULES_FILE, Manifest,
    grub_commands_manifest, kernel_cmdline_manifest, loader_manifest, module_manifest,
    value_count,
};

/// Inputs of one generator run.
pub struct GenerateRequest<'a> {
    pub image: &'a Path,
    pub module_dir: &'a Path,
    pub version: &'a str,
    pub config: &'a GeneratorConfig,
}

/// Injected adapters for [`generate`].
pub struct GeneratePorts<'a, T, B, M, S, R> {
    pub partitions: &'a T,
    pub image_reader: &'a B,
    pub modules: &'a M,
    pub sink: &'a S,
    pub reporter: &'a R,
}

/// One manifest file that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenManifest {
    pub name: &'static str,
    pub path: PathBuf,
    pub values: usize,
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub offset: u64,
    pub corelen: u16,
    pub modules: usize,
    pub written: Vec<WrittenManifest>,
}

struct Encoded {
    name: &'static str,
    bytes: Vec<u8>,
    values: usize,
}

fn encode(name: &'static str, manifest: &Manifest, order: KeyOrder) -> Result<Encoded> {
    Ok(Encoded {
        name,
        bytes: to_manifest_json(manifest, order)?,
        values: value_count(manifest),
    })
}

/// Generate all four manifests and write them to the sink.
///
/// # Errors
///
/// Returns the first error of any stage. Input, partition-tool, and
/// truncated-read errors happen before anything is written.
pub async fn generate<T, B, M, S, R>(
    request: &GenerateRequest<'_>,
    ports: &GeneratePorts<'_, T, B, M, S, R>,
) -> Result<GenerationReport>
where
    T: PartitionTable,
    B: BootRegionReader,
    M: ModuleStore,
    S: ManifestSink,
    R: ProgressReporter,
{
    let GenerateRequest {
        image,
        module_dir,
        version,
        config,
    } = *request;
    let distributor = config.distributor.as_str();

    ports.sink.ensure_writable()?;

    ports.reporter.step("hashing boot regions...");
    let scan = loader::scan_loader(ports.partitions, ports.image_reader, image, config.algorithm)
        .await?;

    ports.reporter.step("hashing modules...");
    let module_digests = modules::scan_modules(
        ports.modules,
        module_dir,
        &config.module_suffix,
        config.algorithm,
    )?;
    if module_digests.is_empty() {
        ports.reporter.warn(&format!(
            "no '*{}' files under {}",
            config.module_suffix,
            module_dir.display()
        ));
    }

    let encoded = [
        encode(
            LOADER_FILE,
            &loader_manifest(&scan.digests, version, distributor),
            KeyOrder::Sorted,
        )?,
        encode(
            MODULES_FILE,
            &module_manifest(&module_digests, version, distributor),
            KeyOrder::Declared,
        )?,
        encode(
            KERNEL_CMDLINE_FILE,
            &kernel_cmdline_manifest(version, distributor),
            KeyOrder::Declared,
        )?,
        encode(
            COMMANDS_FILE,
            &grub_commands_manifest(version, distributor),
            KeyOrder::Declared,
        )?,
    ];

    let mut written = Vec::with_capacity(encoded.len());
    for Encoded {
        name,
        bytes,
        values,
    } in encoded
    {
        let path = ports.sink.write_manifest(name, &bytes)?;
        tracing::info!(manifest = name, path = %path.display(), values, "wrote manifest");
        ports
            .reporter
            .success(&format!("{name} ({values} values)"));
        written.push(WrittenManifest { name, path, values });
    }

    Ok(GenerationReport {
        offset: scan.offset,
        corelen: scan.corelen,
        modules: module_digests.len(),
        written,
    })
}
