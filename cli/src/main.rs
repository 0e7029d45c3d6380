//! grub-hashes - reference hash and pattern manifests for GRUB boot disks

use clap::Parser;
use tracing_subscriber::EnvFilter;

use grub_hashes::cli::Cli;
use grub_hashes::domain::GeneratorError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr; stdout carries only the command's own output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        if let Some(err) = e.downcast_ref::<GeneratorError>() {
            tracing::debug!(stage = err.stage(), "generation failed");
        }
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
