//! Build command - cross compile a project inside the build image

use crate::build::{self, BuildConfig, BuildFlags};
use crate::cache::{DependencyCache, HttpFetcher, CONTAINER_CACHE_ROOT};
use crate::cli::args::BuildArgs;
use crate::config::Config;
use crate::error::{XgoError, XgoResult};
use crate::orchestration::{
    assemble, runner, ContainerEngine, DockerEngine, ExecutionMode, InvocationSpec,
};
use crate::project::{self, ProjectLocation};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Execute the build command
pub async fn execute(args: BuildArgs, config: &Config) -> XgoResult<()> {
    info!("Starting xgo/{}", env!("CARGO_PKG_VERSION"));

    let build = build_config(args, config);
    debug!("Build configuration: {:?}", build);

    let cwd = env::current_dir().map_err(|e| XgoError::io("getting current directory", e))?;
    let location = project::resolve(&build.project, &cwd, &build.workspace_roots)?;
    debug!("Project location: {:?}", location);

    let output_dir = resolve_output_dir(&build.bin_path, &cwd);

    let engine = DockerEngine::new(&build.engine);
    if !build.contained {
        tokio::fs::create_dir_all(&output_dir).await.map_err(|e| {
            XgoError::io(format!("creating output directory {}", output_dir.display()), e)
        })?;
        engine.ensure_ready().await?;
        engine.ensure_image(&build.image).await?;
    }

    cache_dependencies(&build).await?;

    let mode = if build.contained {
        ExecutionMode::Contained
    } else {
        ExecutionMode::Containerized {
            image: build.image.clone(),
        }
    };
    let spec = assemble(&build, &location, &output_dir, mode);
    info!(
        "Cross compiling project {} package {} ...",
        location.identity, spec.package
    );

    launch(&engine, &spec, &location).await?;
    info!("Completed!");
    Ok(())
}

/// Merge command-line flags, config file and forwarded environment
pub fn build_config(args: BuildArgs, config: &Config) -> BuildConfig {
    let image = build::select_image(
        &config.image,
        args.go_version.as_deref(),
        args.docker_repo.as_deref(),
        args.docker_image.as_deref(),
    );
    let cache_root = if args.contained {
        PathBuf::from(CONTAINER_CACHE_ROOT)
    } else {
        config.cache.root()
    };
    let targets = args
        .targets
        .unwrap_or_else(|| config.build.targets.clone());

    BuildConfig {
        project: args.project,
        package: args.package,
        remote: args.remote,
        branch: args.branch,
        prefix: args.out,
        dependencies: args.deps,
        arguments: args.depsargs,
        targets: build::parse_targets(&targets),
        cmd_path: args.cmd_path,
        bin_path: args.bin_path.unwrap_or_else(|| config.build.bin_path.clone()),
        image,
        engine: config.engine.binary.clone(),
        go_proxy: args.go_proxy.or_else(|| config.go.proxy.clone()),
        cache_root,
        workspace_roots: build::workspace_roots(args.gopath.as_deref()),
        contained: args.contained,
        flags: BuildFlags {
            verbose: args.verbose,
            steps: args.steps,
            race: args.race,
            tags: args.tags,
            ld_flags: args.ldflags,
            mode: args.buildmode,
            vcs: args.buildvcs,
            trim_path: args.trimpath,
        },
    }
}

fn resolve_output_dir(bin_path: &Path, cwd: &Path) -> PathBuf {
    if bin_path.is_absolute() {
        bin_path.to_path_buf()
    } else {
        cwd.join(bin_path)
    }
}

async fn cache_dependencies(build: &BuildConfig) -> XgoResult<()> {
    let urls: Vec<String> = build
        .dependency_urls()
        .into_iter()
        .map(String::from)
        .collect();
    if urls.is_empty() {
        return Ok(());
    }

    let cache = DependencyCache::new(&build.cache_root);
    tokio::task::spawn_blocking(move || {
        let urls: Vec<&str> = urls.iter().map(String::as_str).collect();
        cache.populate(&urls, &HttpFetcher).map(|_| ())
    })
    .await
    .map_err(|e| XgoError::Internal(format!("dependency download task failed: {e}")))?
}

async fn launch(
    engine: &DockerEngine,
    spec: &InvocationSpec,
    location: &ProjectLocation,
) -> XgoResult<()> {
    if spec.containerless {
        if !location.is_module_based() {
            info!("Don't use go modules (go.mod not found)");
        }
        runner::run(spec, engine.binary()).await
    } else {
        engine.run(spec).await
    }
}
