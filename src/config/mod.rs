//! Configuration for xgo
//!
//! A single optional TOML file. `--config`/`XGO_CONFIG` override its
//! location; otherwise it lives under the platform config directory. A
//! missing file is the same as an empty one.

pub mod schema;

pub use schema::Config;

use crate::error::{XgoError, XgoResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Result of `xgo config init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Written,
    /// A file was already there and `force` was not given
    Kept,
}

/// Location of the xgo config file
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    /// Use `explicit` when given, the per-user default otherwise
    pub fn locate(explicit: Option<PathBuf>) -> Self {
        let path = explicit.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("xgo")
                .join("config.toml")
        });
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the file; defaults when it does not exist
    pub async fn load(&self) -> XgoResult<Config> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", self.path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(XgoError::io(
                    format!("reading config from {}", self.path.display()),
                    e,
                ))
            }
        };

        toml::from_str(&content).map_err(|e| XgoError::ConfigInvalid {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Write the default configuration, leaving an existing file alone
    /// unless `force` is set
    pub async fn init(&self, force: bool) -> XgoResult<InitOutcome> {
        let present = fs::try_exists(&self.path)
            .await
            .map_err(|e| XgoError::io(format!("checking {}", self.path.display()), e))?;
        if present && !force {
            return Ok(InitOutcome::Kept);
        }
        self.write(&Config::default()).await?;
        Ok(InitOutcome::Written)
    }

    async fn write(&self, config: &Config) -> XgoResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .map_err(|source| XgoError::ConfigDirCreate {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        let rendered = toml::to_string_pretty(config)?;
        fs::write(&self.path, rendered)
            .await
            .map_err(|e| XgoError::io(format!("writing config to {}", self.path.display()), e))?;

        info!("Configuration written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_path_wins() {
        let file = ConfigFile::locate(Some(PathBuf::from("/etc/xgo.toml")));
        assert_eq!(file.path(), Path::new("/etc/xgo.toml"));
        assert!(ConfigFile::locate(None).path().ends_with("xgo/config.toml"));
    }

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let file = ConfigFile::locate(Some(temp.path().join("absent.toml")));

        let config = file.load().await.unwrap();
        assert_eq!(config.engine.binary, "docker");
        assert_eq!(config.build.targets, "*/*");
    }

    #[tokio::test]
    async fn init_creates_parent_and_respects_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let file = ConfigFile::locate(Some(path.clone()));

        assert_eq!(file.init(false).await.unwrap(), InitOutcome::Written);
        assert!(file.load().await.is_ok());

        std::fs::write(&path, "[engine]\nbinary = \"podman\"\n").unwrap();
        assert_eq!(file.init(false).await.unwrap(), InitOutcome::Kept);
        assert_eq!(file.load().await.unwrap().engine.binary, "podman");

        assert_eq!(file.init(true).await.unwrap(), InitOutcome::Written);
        assert_eq!(file.load().await.unwrap().engine.binary, "docker");
    }

    #[tokio::test]
    async fn invalid_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[engine\nbinary = ").unwrap();

        let err = ConfigFile::locate(Some(path.clone())).load().await.unwrap_err();
        match err {
            XgoError::ConfigInvalid { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }
}
