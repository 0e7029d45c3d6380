//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use crate::commands;
use crate::domain::{ConfigOverrides, DigestAlgorithm};
use crate::infra::config::load_config;
use crate::output::OutputContext;

/// Generate reference hash and pattern manifests for a GRUB boot disk
#[derive(Parser)]
#[command(name = "grub-hashes", version, arg_required_else_help = true)]
pub struct Cli {
    /// Disk image containing the GRUB BIOS install
    pub disk_image: PathBuf,

    /// Directory tree holding the GRUB module (`*.mod`) files
    pub module_dir: PathBuf,

    /// Existing directory the manifests are written into
    pub output_dir: PathBuf,

    /// Release version embedded in every description
    #[arg(id = "release", value_name = "VERSION")]
    pub version: String,

    /// YAML file with generator settings
    #[arg(long, env = "GRUB_HASHES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Partition-table tool invoked as `<tool> show -i N -b IMAGE` [default: cgpt]
    #[arg(long, env = "GRUB_HASHES_PARTITION_TOOL")]
    pub partition_tool: Option<String>,

    /// Index of the BIOS boot partition [default: 2]
    #[arg(long)]
    pub partition: Option<u32>,

    /// Digest for binary manifests: sha1 or sha256 [default: sha1]
    #[arg(long)]
    pub algorithm: Option<DigestAlgorithm>,

    /// File-name suffix selecting module files [default: .mod]
    #[arg(long)]
    pub module_suffix: Option<String>,

    /// OS name prefixed to every description [default: Flatcar]
    #[arg(long)]
    pub distributor: Option<String>,

    /// Seconds to wait for the partition tool [default: 30]
    #[arg(long, value_name = "SECS")]
    pub tool_timeout: Option<u64>,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,
}

impl Cli {
    /// Execute the generator.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or any generation stage fails.
    pub async fn run(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?.with_overrides(ConfigOverrides {
            partition_tool: self.partition_tool,
            partition: self.partition,
            algorithm: self.algorithm,
            module_suffix: self.module_suffix,
            distributor: self.distributor,
            tool_timeout_secs: self.tool_timeout,
        });
        tracing::debug!(?config, "effective configuration");

        let ctx = OutputContext::new(self.no_color, self.quiet);
        let args = commands::generate::GenerateArgs {
            disk_image: self.disk_image,
            module_dir: self.module_dir,
            output_dir: self.output_dir,
            version: self.version,
            tool_timeout: Duration::from_secs(config.tool_timeout_secs),
        };
        commands::generate::run(&ctx, &args, &config).await
    }
}
