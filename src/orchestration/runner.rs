//! Blocking execution of external commands with forwarded output

use crate::error::{XgoError, XgoResult};
use crate::orchestration::invocation::InvocationSpec;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, info};

/// Build the command executing an invocation
pub fn command(spec: &InvocationSpec, engine: &str) -> Command {
    let mut cmd = Command::new(spec.program(engine));
    cmd.args(spec.args());
    if spec.containerless {
        cmd.envs(&spec.env);
    }
    cmd
}

/// Execute an invocation, forwarding stdout/stderr, until it exits
pub async fn run(spec: &InvocationSpec, engine: &str) -> XgoResult<()> {
    info!("Running: {}", spec.command_line(engine));
    let status = forward(command(spec, engine), spec.program(engine)).await?;
    check_status(status)
}

/// Run a command with inherited stdio and return its exit status
pub(crate) async fn forward(mut cmd: Command, name: &str) -> XgoResult<ExitStatus> {
    debug!("Executing: {:?}", cmd.as_std());
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| XgoError::command_failed(name, e))
}

/// Map a build exit status onto the run result
pub fn check_status(status: ExitStatus) -> XgoResult<()> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(XgoError::BuildFailed(code)),
        None => Err(XgoError::ProcessSignaled),
    }
}
