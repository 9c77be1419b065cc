//! Container engine abstraction
//!
//! The build image is launched through an engine CLI. The trait keeps the
//! build command independent of which binary is behind it.

use crate::error::XgoResult;
use crate::orchestration::invocation::InvocationSpec;
use async_trait::async_trait;
use tracing::info;

/// Abstract container engine interface
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Check that the engine is installed and functional
    async fn ensure_ready(&self) -> XgoResult<()>;

    /// Check whether an image is available locally
    async fn image_exists(&self, image: &str) -> XgoResult<bool>;

    /// Pull an image from its registry
    async fn pull(&self, image: &str) -> XgoResult<()>;

    /// Run a containerized invocation to completion
    async fn run(&self, spec: &InvocationSpec) -> XgoResult<()>;

    /// Engine binary name for display
    fn binary(&self) -> &str;

    /// Pull the image unless it is already present
    async fn ensure_image(&self, image: &str) -> XgoResult<()> {
        info!("Checking for required docker image {}...", image);
        if self.image_exists(image).await? {
            info!("Docker image found!");
            return Ok(());
        }
        info!("Image not found, pulling {}...", image);
        self.pull(image).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XgoError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Engine with a fixed local image state and scripted pull result
    struct StubEngine {
        present: bool,
        pull_fails: bool,
        pulls: AtomicUsize,
    }

    impl StubEngine {
        fn new(present: bool, pull_fails: bool) -> Self {
            Self {
                present,
                pull_fails,
                pulls: AtomicUsize::new(0),
            }
        }

        fn pulls(&self) -> usize {
            self.pulls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContainerEngine for StubEngine {
        async fn ensure_ready(&self) -> XgoResult<()> {
            Ok(())
        }

        async fn image_exists(&self, _image: &str) -> XgoResult<bool> {
            Ok(self.present)
        }

        async fn pull(&self, image: &str) -> XgoResult<()> {
            self.pulls.fetch_add(1, Ordering::SeqCst);
            if self.pull_fails {
                return Err(XgoError::ImagePull {
                    image: image.to_string(),
                    reason: "manifest unknown".to_string(),
                });
            }
            Ok(())
        }

        async fn run(&self, _spec: &InvocationSpec) -> XgoResult<()> {
            Ok(())
        }

        fn binary(&self) -> &str {
            "stub"
        }
    }

    #[tokio::test]
    async fn present_image_is_not_pulled() {
        let engine = StubEngine::new(true, true);
        engine.ensure_image("xgo:latest").await.unwrap();
        assert_eq!(engine.pulls(), 0);
    }

    #[tokio::test]
    async fn missing_image_is_pulled_once() {
        let engine = StubEngine::new(false, false);
        engine.ensure_image("xgo:latest").await.unwrap();
        assert_eq!(engine.pulls(), 1);
    }

    #[tokio::test]
    async fn pull_failure_reaches_caller() {
        let engine = StubEngine::new(false, true);
        let err = engine.ensure_image("xgo:1.99").await.unwrap_err();

        assert_eq!(engine.pulls(), 1);
        assert!(matches!(err, XgoError::ImagePull { ref image, .. } if image == "xgo:1.99"));
    }
}
