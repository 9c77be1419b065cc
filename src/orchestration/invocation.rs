//! Invocation assembly
//!
//! Combines the build configuration, the resolved project and (for GOPATH
//! projects) the workspace mount plan into one [`InvocationSpec`]. The same
//! function serves both execution modes so the environment handed to the
//! build script is identical apart from mount-related entries.

use crate::build::BuildConfig;
use crate::cache::CONTAINER_CACHE_ROOT;
use crate::project::{plan_mounts, MountEntry, ProjectLocation, ProjectMode};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Build script shipped inside the image
pub const BUILD_SCRIPT: &str = "xgo-build";

/// Output directory inside the container
pub const OUTPUT_DIR: &str = "/build";

/// Module project mount point inside the container
pub const SOURCE_DIR: &str = "/source";

/// `EXT_GOPATH` value telling a contained build that the sources are local
pub const LOCAL_BUILD_SENTINEL: &str = "/non-existent-path-to-signal-local-build";

/// How the build script is reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Launch a fresh container from `image`
    Containerized { image: String },
    /// Already inside the build image; run the script directly
    Contained,
}

/// A fully specified build execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    /// Image to launch (containerized only)
    pub image: Option<String>,
    /// Output directory mount (containerized only)
    pub output: Option<MountEntry>,
    /// Project, workspace and cache mounts
    pub mounts: Vec<MountEntry>,
    /// Environment for the build script
    pub env: BTreeMap<String, String>,
    /// Requested os/arch targets
    pub targets: Vec<String>,
    /// Working directory inside the container
    pub workdir: Option<String>,
    /// Package argument handed to the build script
    pub package: String,
    /// Run the build script directly instead of through the engine
    pub containerless: bool,
}

impl InvocationSpec {
    /// Program to execute for this invocation
    pub fn program<'a>(&'a self, engine: &'a str) -> &'a str {
        if self.containerless {
            BUILD_SCRIPT
        } else {
            engine
        }
    }

    /// Arguments for [`InvocationSpec::program`].
    ///
    /// Contained invocations only take the package; their environment is set
    /// on the child process instead.
    pub fn args(&self) -> Vec<String> {
        if self.containerless {
            return vec![self.package.clone()];
        }

        let mut args = vec!["run".to_string(), "--rm".to_string()];
        for mount in self.output.iter().chain(&self.mounts) {
            args.push("-v".to_string());
            args.push(mount.volume_arg());
        }
        for (key, value) in &self.env {
            args.push("-e".to_string());
            args.push(format!("{key}={value}"));
        }
        if let Some(workdir) = &self.workdir {
            args.push("-w".to_string());
            args.push(workdir.clone());
        }
        args.extend(self.image.iter().cloned());
        args.push(self.package.clone());
        args
    }

    /// Printable command line
    pub fn command_line(&self, engine: &str) -> String {
        let mut line = self.program(engine).to_string();
        for arg in self.args() {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}

/// Assemble the invocation for one build run
pub fn assemble(
    config: &BuildConfig,
    location: &ProjectLocation,
    output_dir: &Path,
    mode: ExecutionMode,
) -> InvocationSpec {
    let containerized = matches!(mode, ExecutionMode::Containerized { .. });
    let mut env = build_env(config, location);
    let mut mounts = Vec::new();
    let mut workdir = None;

    match location.mode {
        ProjectMode::Module => {
            env.insert("GO111MODULE".into(), "on".into());
            if let Some(proxy) = &config.go_proxy {
                env.insert("GOPROXY".into(), proxy.clone());
            }
            if location.has_vendor() {
                info!("Using vendored Go module dependencies");
                env.insert("FLAG_MOD".into(), "vendor".into());
            }
            if let (true, Some(root)) = (containerized, &location.root) {
                mounts.push(MountEntry::read_write(root, SOURCE_DIR));
                workdir = Some(SOURCE_DIR.to_string());
            }
        }
        ProjectMode::Legacy => {
            env.insert("GO111MODULE".into(), "off".into());
            if containerized {
                let plan = plan_mounts(&config.workspace_roots);
                env.insert("EXT_GOPATH".into(), plan.ext_gopath());
                mounts.extend(plan.mounts);
            }
        }
    }

    if !containerized && location.is_local {
        env.insert("EXT_GOPATH".into(), LOCAL_BUILD_SENTINEL.into());
    }

    let package = package_arg(config, location, containerized);
    debug!("Build package argument: {}", package);

    let (image, output) = match mode {
        ExecutionMode::Containerized { image } => {
            mounts.push(MountEntry::read_only(&config.cache_root, CONTAINER_CACHE_ROOT));
            (Some(image), Some(MountEntry::read_write(output_dir, OUTPUT_DIR)))
        }
        ExecutionMode::Contained => (None, None),
    };

    InvocationSpec {
        image,
        output,
        mounts,
        env,
        targets: config.targets.clone(),
        workdir,
        package,
        containerless: !containerized,
    }
}

/// Environment shared by both execution modes
fn build_env(config: &BuildConfig, location: &ProjectLocation) -> BTreeMap<String, String> {
    let (remote, branch) = if location.is_local {
        (String::new(), String::new())
    } else {
        (config.remote.clone(), config.branch.clone())
    };

    let mut env: BTreeMap<String, String> = [
        ("REPO_REMOTE", remote),
        ("REPO_BRANCH", branch),
        ("PACK", config.package.clone()),
        ("DEPS", config.dependencies.clone()),
        ("ARGS", config.arguments.clone()),
        ("OUT", config.prefix.clone()),
        ("TARGETS", config.targets_value()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    env.extend(config.flags.env());
    env
}

fn package_arg(config: &BuildConfig, location: &ProjectLocation, containerized: bool) -> String {
    let base = match location.mode {
        ProjectMode::Module if location.is_local && containerized => SOURCE_DIR,
        _ => location.identity.as_str(),
    };
    join_package(base, &config.cmd_path)
}

/// Append a relative command directory to a package base
fn join_package(base: &str, cmd_path: &str) -> String {
    let cmd = cmd_path.trim_start_matches("./").trim_matches('/');
    if cmd.is_empty() || cmd == "." {
        base.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), cmd)
    }
}
