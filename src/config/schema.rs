//! Configuration schema for xgo
//!
//! Configuration is stored at `~/.config/xgo/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Official cross compilation image repository
pub const DEFAULT_DIST: &str = "ghcr.io/crazy-max/xgo";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Container engine settings
    pub engine: EngineConfig,

    /// Build image selection
    pub image: ImageConfig,

    /// Go toolchain settings forwarded into the container
    pub go: GoConfig,

    /// Dependency cache settings
    pub cache: CacheConfig,

    /// Build defaults
    pub build: BuildDefaults,
}

/// Container engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine CLI binary (docker or a compatible replacement)
    pub binary: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
        }
    }
}

/// Build image selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Official image repository
    pub dist: String,

    /// Go version tag
    pub go_version: String,

    /// Custom repository used instead of the official one
    pub repo: Option<String>,

    /// Full custom image reference (wins over everything else)
    pub image: Option<String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            dist: DEFAULT_DIST.to_string(),
            go_version: "latest".to_string(),
            repo: None,
            image: None,
        }
    }
}

/// Go settings forwarded into the build container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GoConfig {
    /// Module proxy (GOPROXY)
    pub proxy: Option<String>,
}

/// Dependency cache settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache root (defaults to `<tmp>/xgo-cache`)
    pub dir: Option<PathBuf>,
}

impl CacheConfig {
    /// Effective cache root on the host
    pub fn root(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("xgo-cache"))
    }
}

/// Defaults for build flags
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildDefaults {
    /// Comma separated os/arch targets
    pub targets: String,

    /// Output directory for built binaries
    pub bin_path: PathBuf,
}

impl Default for BuildDefaults {
    fn default() -> Self {
        Self {
            targets: "*/*".to_string(),
            bin_path: PathBuf::from("bin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[engine]"));
        assert!(toml.contains("[image]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.engine.binary, "docker");
        assert_eq!(config.image.dist, DEFAULT_DIST);
        assert_eq!(config.build.targets, "*/*");
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [image]
            go_version = "1.22"

            [go]
            proxy = "https://goproxy.io"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.image.go_version, "1.22");
        assert_eq!(config.go.proxy.as_deref(), Some("https://goproxy.io"));
        assert_eq!(config.image.dist, DEFAULT_DIST); // default preserved
    }

    #[test]
    fn cache_root_defaults_to_tmp() {
        let cache = CacheConfig::default();
        assert!(cache.root().ends_with("xgo-cache"));

        let cache = CacheConfig {
            dir: Some(PathBuf::from("/var/cache/xgo")),
        };
        assert_eq!(cache.root(), PathBuf::from("/var/cache/xgo"));
    }
}
