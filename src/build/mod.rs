//! Build configuration
//!
//! [`BuildConfig`] is the single immutable value produced from command-line
//! flags, the config file and the forwarded environment. Every downstream
//! component receives it explicitly.

mod flags;

pub use flags::BuildFlags;

use crate::config::schema::ImageConfig;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Everything a single build run needs to know
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Project reference: filesystem path or remote import path
    pub project: String,
    /// Sub-package to build if not root import
    pub package: String,
    /// Version control remote repository to build
    pub remote: String,
    /// Version control branch to build
    pub branch: String,
    /// Prefix to use for output naming
    pub prefix: String,
    /// CGO dependencies (space separated archive URLs)
    pub dependencies: String,
    /// CGO dependency configure arguments
    pub arguments: String,
    /// Requested os/arch targets
    pub targets: Vec<String>,
    /// Command directory relative to the project root
    pub cmd_path: String,
    /// Output directory for built binaries
    pub bin_path: PathBuf,
    /// Build image reference
    pub image: String,
    /// Container engine binary
    pub engine: String,
    /// Module proxy forwarded as GOPROXY
    pub go_proxy: Option<String>,
    /// Host dependency cache root
    pub cache_root: PathBuf,
    /// Legacy GOPATH workspace roots, in configured order
    pub workspace_roots: Vec<PathBuf>,
    /// Already running inside the build image
    pub contained: bool,
    /// Flags forwarded to `go build`
    pub flags: BuildFlags,
}

impl BuildConfig {
    /// Dependency URLs to cache, in the order given
    pub fn dependency_urls(&self) -> Vec<&str> {
        self.dependencies.split_whitespace().collect()
    }

    /// Targets as passed to the build script: space joined, `*` replaced by `.`
    pub fn targets_value(&self) -> String {
        self.targets.join(" ").replace('*', ".")
    }
}

/// Split a comma separated target list, dropping empty items
pub fn parse_targets(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Pick the build image: explicit image, then custom repo, then official dist
pub fn select_image(
    image: &ImageConfig,
    go_version: Option<&str>,
    repo: Option<&str>,
    custom_image: Option<&str>,
) -> String {
    let version = go_version.unwrap_or(image.go_version.as_str());

    if let Some(custom) = custom_image.or(image.image.as_deref()) {
        return custom.to_string();
    }
    match repo.or(image.repo.as_deref()) {
        Some(repo) => format!("{repo}:{version}"),
        None => format!("{}:{}", image.dist, version),
    }
}

/// Split a GOPATH value into workspace roots, defaulting to `$HOME/go`
pub fn workspace_roots(gopath: Option<&OsStr>) -> Vec<PathBuf> {
    match gopath.filter(|v| !v.is_empty()) {
        Some(value) => std::env::split_paths(value)
            .filter(|p| !p.as_os_str().is_empty())
            .collect(),
        None => dirs::home_dir()
            .map(|home| vec![home.join("go")])
            .unwrap_or_default(),
    }
}
