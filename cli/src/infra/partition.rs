//! `PartitionTable` backed by `cgpt show`.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, PartitionTable};
use crate::domain::GeneratorError;
use crate::domain::layout::parse_start_sector;

/// Queries a GPT disk image with `<tool> show -i <partition> -b <image>`.
pub struct CgptPartitionTable<R> {
    runner: R,
    tool: String,
    partition: u32,
    timeout: Duration,
}

impl<R: CommandRunner> CgptPartitionTable<R> {
    #[must_use]
    pub fn new(runner: R, tool: impl Into<String>, partition: u32, timeout: Duration) -> Self {
        Self {
            runner,
            tool: tool.into(),
            partition,
            timeout,
        }
    }
}

impl<R: CommandRunner> PartitionTable for CgptPartitionTable<R> {
    async fn start_sector(&self, image: &Path) -> Result<u64> {
        let partition = self.partition.to_string();
        let image = image.to_string_lossy();
        let args = ["show", "-i", partition.as_str(), "-b", &*image];
        let output = self
            .runner
            .run_with_timeout(&self.tool, &args, self.timeout)
            .await?;

        if !output.status.success() {
            return Err(GeneratorError::ToolFailed {
                tool: self.tool.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let sector = parse_start_sector(&stdout)?;
        tracing::debug!(tool = %self.tool, partition = self.partition, sector, "queried partition table");
        Ok(sector)
    }
}
