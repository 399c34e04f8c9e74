use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::{Output, Stdio};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Run `program` in `cwd` and collect its output.
///
/// The child is killed as soon as `cancel` fires, so a timed-out segment
/// does not leave its subprocess running.
pub async fn run_command(
    cancel: &CancellationToken,
    cwd: &Path,
    program: &str,
    args: &[&str],
) -> Result<Output> {
    let child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("Failed to spawn `{}`", program))?;

    tokio::select! {
        output = child.wait_with_output() => {
            output.with_context(|| format!("Failed to wait for `{}`", program))
        }
        _ = cancel.cancelled() => bail!("`{}` cancelled", program),
    }
}

/// Stdout of a successful run, `None` on spawn failure or non-zero exit
pub async fn command_stdout(
    cancel: &CancellationToken,
    cwd: &Path,
    program: &str,
    args: &[&str],
) -> Option<String> {
    match run_command(cancel, cwd, program, args).await {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            tracing::debug!(program, status = %output.status, "command exited unsuccessfully");
            None
        }
        Err(err) => {
            tracing::debug!(program, error = %err, "command failed");
            None
        }
    }
}

/// Stdout followed by stderr of a successful run
pub async fn command_combined_output(
    cancel: &CancellationToken,
    cwd: &Path,
    program: &str,
    args: &[&str],
) -> Option<String> {
    let output = run_command(cancel, cwd, program, args).await.ok()?;
    if !output.status.success() {
        return None;
    }
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    Some(combined)
}
