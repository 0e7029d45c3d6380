//! Generate command — wires production adapters into the generate service
//! and renders the summary.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::application::services::generate::{
    GeneratePorts, GenerateRequest, GenerationReport, generate,
};
use crate::domain::GeneratorConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::{DirSink, LocalFs};
use crate::infra::image::FileImageReader;
use crate::infra::partition::CgptPartitionTable;
use crate::output::{OutputContext, TerminalReporter};

/// Positional inputs of the generate command.
pub struct GenerateArgs {
    pub disk_image: PathBuf,
    pub module_dir: PathBuf,
    pub output_dir: PathBuf,
    pub version: String,
    pub tool_timeout: Duration,
}

/// Run the generate command.
///
/// # Errors
///
/// Returns an error if any generation stage fails.
pub async fn run(ctx: &OutputContext, args: &GenerateArgs, config: &GeneratorConfig) -> Result<()> {
    let partitions = CgptPartitionTable::new(
        TokioCommandRunner,
        config.partition_tool.clone(),
        config.partition,
        args.tool_timeout,
    );
    let sink = DirSink::new(&args.output_dir);
    let reporter = TerminalReporter::new(ctx);

    let request = GenerateRequest {
        image: &args.disk_image,
        module_dir: &args.module_dir,
        version: &args.version,
        config,
    };
    let ports = GeneratePorts {
        partitions: &partitions,
        image_reader: &FileImageReader,
        modules: &LocalFs,
        sink: &sink,
        reporter: &reporter,
    };

    let report = generate(&request, &ports).await?;
    render(ctx, &report, config);
    Ok(())
}

fn render(ctx: &OutputContext, report: &GenerationReport, config: &GeneratorConfig) {
    ctx.header("Summary");
    ctx.kv("diskboot offset:", &report.offset.to_string());
    ctx.kv("core sectors:", &report.corelen.to_string());
    ctx.kv("modules:", &report.modules.to_string());
    ctx.kv("algorithm:", &config.algorithm.to_string());
}
