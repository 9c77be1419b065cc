//! Docker CLI container engine
//!
//! Works with any engine exposing docker's CLI (`version`, `image inspect`,
//! `pull`, `run`), which makes podman a drop-in replacement.

use crate::error::{XgoError, XgoResult};
use crate::orchestration::engine::ContainerEngine;
use crate::orchestration::invocation::InvocationSpec;
use crate::orchestration::runner;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Container engine driving the docker CLI
pub struct DockerEngine {
    binary: String,
}

impl DockerEngine {
    /// Create an engine using the given CLI binary
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl ContainerEngine for DockerEngine {
    async fn ensure_ready(&self) -> XgoResult<()> {
        info!("Checking {} installation...", self.binary);

        let mut cmd = Command::new(&self.binary);
        cmd.arg("version");
        let status = match runner::forward(cmd, &self.binary).await {
            Err(XgoError::CommandFailed { source, .. }) if source.kind() == ErrorKind::NotFound => {
                return Err(XgoError::EngineNotFound(self.binary.clone()));
            }
            other => other?,
        };

        if status.success() {
            Ok(())
        } else {
            Err(XgoError::EngineUnavailable {
                binary: self.binary.clone(),
                code: status.code().unwrap_or(-1),
            })
        }
    }

    async fn image_exists(&self, image: &str) -> XgoResult<bool> {
        debug!("Executing: {} image inspect {}", self.binary, image);
        let status = Command::new(&self.binary)
            .args(["image", "inspect", image])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| XgoError::command_failed(format!("{} image inspect", self.binary), e))?;
        Ok(status.success())
    }

    async fn pull(&self, image: &str) -> XgoResult<()> {
        info!("Pulling {} from docker registry...", image);

        let mut cmd = Command::new(&self.binary);
        cmd.args(["pull", image]);
        let status = runner::forward(cmd, &self.binary).await?;

        if status.success() {
            Ok(())
        } else {
            Err(XgoError::ImagePull {
                image: image.to_string(),
                reason: match status.code() {
                    Some(code) => format!("{} pull exited with code {}", self.binary, code),
                    None => format!("{} pull terminated by signal", self.binary),
                },
            })
        }
    }

    async fn run(&self, spec: &InvocationSpec) -> XgoResult<()> {
        runner::run(spec, &self.binary).await
    }

    fn binary(&self) -> &str {
        &self.binary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_keeps_configured_binary() {
        assert_eq!(DockerEngine::new("podman").binary(), "podman");
    }

    #[tokio::test]
    async fn missing_binary_is_reported() {
        let engine = DockerEngine::new("xgo-test-no-such-engine");
        let err = engine.ensure_ready().await.unwrap_err();
        assert!(matches!(err, XgoError::EngineNotFound(ref b) if b == "xgo-test-no-such-engine"));
    }

    #[tokio::test]
    async fn missing_binary_fails_image_check() {
        let engine = DockerEngine::new("xgo-test-no-such-engine");
        assert!(matches!(
            engine.image_exists("img").await,
            Err(XgoError::CommandFailed { .. })
        ));
    }
}
