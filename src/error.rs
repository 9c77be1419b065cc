//! Error types for xgo
//!
//! All modules use `XgoResult<T>` as their return type. Nothing below `main`
//! terminates the process; errors propagate up and `main` reports them.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for xgo operations
pub type XgoResult<T> = Result<T, XgoError>;

/// All errors that can occur in xgo
#[derive(Error, Debug)]
pub enum XgoError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid path: {path}: {reason}")]
    PathInvalid { path: PathBuf, reason: String },

    #[error("Project {0} is not inside any GOPATH workspace and has no go.mod")]
    NotInWorkspace(PathBuf),

    #[error("No GOPATH is set or forwarded to xgo")]
    WorkspaceUnset,

    // External tool errors
    #[error("Container engine not found: {0}")]
    EngineNotFound(String),

    #[error("Container engine {binary} is not functional (exit code {code})")]
    EngineUnavailable { binary: String, code: i32 },

    #[error("Image pull failed: {image}: {reason}")]
    ImagePull { image: String, reason: String },

    // Network errors
    #[error("Failed to retrieve dependency {url}: {reason}")]
    DependencyFetch { url: String, reason: String },

    // Build errors
    #[error("Cross compilation failed with exit code {0}")]
    BuildFailed(i32),

    #[error("Process terminated by signal")]
    ProcessSignaled,

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl XgoError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a dependency fetch error
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::DependencyFetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Exit code the process should report for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::BuildFailed(code) => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::EngineNotFound(_) => Some("Install Docker from https://docs.docker.com/get-docker/"),
            Self::EngineUnavailable { .. } => Some("Start the Docker daemon and retry"),
            Self::WorkspaceUnset => Some("Export GOPATH or add a go.mod to the project"),
            Self::NotInWorkspace(_) => {
                Some("Move the project under $GOPATH/src or initialise it with: go mod init")
            }
            _ => None,
        }
    }
}
