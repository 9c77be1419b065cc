//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

/// xgo - CGO cross compiler front end
///
/// Prepares mounts and environment for the xgo build image and runs the
/// cross compilation for every requested os/arch target.
#[derive(Parser, Debug)]
#[command(name = "xgo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log detail (--debug debug, --debug --debug trace)
    #[arg(long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Configuration file path
    #[arg(long, global = true, env = "XGO_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cross compile a project
    Build(BuildArgs),

    /// Inspect the dependency cache
    Cache(CacheArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Project directory or remote import path
    #[arg(default_value = ".")]
    pub project: String,

    /// Go version tag of the build image
    #[arg(long)]
    pub go_version: Option<String>,

    /// Module proxy forwarded as GOPROXY
    #[arg(long)]
    pub go_proxy: Option<String>,

    /// Sub-package to build if not root import
    #[arg(long = "pkg", default_value = "")]
    pub package: String,

    /// Version control remote repository to build
    #[arg(long, default_value = "")]
    pub remote: String,

    /// Version control branch to build
    #[arg(long, default_value = "")]
    pub branch: String,

    /// CGO dependencies (space separated configure/make based archive URLs)
    #[arg(long, default_value = "")]
    pub deps: String,

    /// CGO dependency configure arguments
    #[arg(long, default_value = "")]
    pub depsargs: String,

    /// Comma separated os/arch targets, e.g. */* or linux/amd64,darwin/arm64
    #[arg(long)]
    pub targets: Option<String>,

    /// Custom image repository used instead of the official one
    #[arg(long)]
    pub docker_repo: Option<String>,

    /// Custom image used instead of the official one
    #[arg(long)]
    pub docker_image: Option<String>,

    /// Command directory relative to the project root, e.g. cmd/app
    #[arg(long, default_value = ".")]
    pub cmd_path: String,

    /// Output directory for built binaries
    #[arg(long)]
    pub bin_path: Option<PathBuf>,

    /// Prefix to use for output naming
    #[arg(long, visible_alias = "command-prefix", default_value = "")]
    pub out: String,

    /// Print the names of packages as they are compiled
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Print the commands as the build executes them
    #[arg(short = 'x')]
    pub steps: bool,

    /// Enable data race detection (supported only on amd64)
    #[arg(long)]
    pub race: bool,

    /// Build tags to consider satisfied during the build
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Arguments to pass on each go tool link invocation
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub ldflags: String,

    /// Kind of object file to build (default|archive|exe|pie)
    #[arg(long, default_value = "default")]
    pub buildmode: String,

    /// Version control stamping (none|git|hg|svn|bzr)
    #[arg(long, default_value = "")]
    pub buildvcs: String,

    /// Remove all file system paths from the resulting executable
    #[arg(long)]
    pub trimpath: bool,

    /// GOPATH workspace roots for projects without go.mod
    #[arg(long, env = "GOPATH")]
    pub gopath: Option<OsString>,

    /// Run the build script directly (set when already inside the build image)
    #[arg(
        long,
        env = "XGO_IN_XGO",
        hide = true,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub contained: bool,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Print the cache directory
    Path,

    /// List cached dependency archives
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
