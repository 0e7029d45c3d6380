//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` spawns external tools with tokio so a hung tool is
//! killed after its timeout instead of hanging the generator.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::application::ports::CommandRunner;
use crate::domain::GeneratorError;

/// Production `CommandRunner` backed by `tokio::process`.
///
/// Uses `tokio::select!` with an explicit `child.kill()` so the process is
/// terminated when the timeout fires, not merely detached.
pub struct TokioCommandRunner;

impl CommandRunner for TokioCommandRunner {
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        tracing::debug!(program, ?args, "spawning");
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| GeneratorError::ToolSpawn {
                tool: program.to_string(),
                source,
            })?;

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        // Drain both pipes while waiting; a child that fills a pipe buffer
        // would otherwise block forever.
        tokio::select! {
            result = async {
                let (status, stdout, stderr) =
                    tokio::join!(child.wait(), drain(stdout_pipe), drain(stderr_pipe));
                Ok::<_, anyhow::Error>(Output {
                    status: status.with_context(|| format!("waiting for {program}"))?,
                    stdout: stdout.with_context(|| format!("reading stdout of {program}"))?,
                    stderr: stderr.with_context(|| format!("reading stderr of {program}"))?,
                })
            } => result,
            () = tokio::time::sleep(timeout) => {
                let _ = child.kill().await;
                Err(GeneratorError::ToolTimeout {
                    tool: program.to_string(),
                    secs: timeout.as_secs(),
                }
                .into())
            }
        }
    }
}

/// Read a child pipe to EOF; a missing pipe reads as empty.
async fn drain(pipe: Option<impl AsyncRead + Unpin>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}
