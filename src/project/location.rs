//! Project location resolution
//!
//! Turns the raw project reference given on the command line into a
//! [`ProjectLocation`]: either an opaque remote import path, a module
//! project (a `go.mod` sits in its root) or a legacy GOPATH project whose
//! import path is derived from its position under a workspace root.

use crate::error::{XgoError, XgoResult};
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};
use tracing::{debug, info};

/// Marker file selecting module mode
pub const MANIFEST_FILE: &str = "go.mod";

/// Directory under the project root selecting vendored dependencies
pub const VENDOR_DIR: &str = "vendor";

/// Dependency resolution model of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectMode {
    /// `go.mod` driven
    Module,
    /// GOPATH workspace driven
    Legacy,
}

/// Resolved project identity, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocation {
    /// Reference as given by the user
    pub raw: String,
    /// Whether the reference is a filesystem path
    pub is_local: bool,
    /// Dependency resolution model
    pub mode: ProjectMode,
    /// Absolute directory for module projects, import path otherwise
    pub identity: String,
    /// Project directory on the host (local references only)
    pub root: Option<PathBuf>,
}

impl ProjectLocation {
    /// Whether the project resolves dependencies through `go.mod`
    pub fn is_module_based(&self) -> bool {
        self.mode == ProjectMode::Module
    }

    /// Whether the project root carries a vendor directory
    pub fn has_vendor(&self) -> bool {
        self.root
            .as_deref()
            .map(|root| root.join(VENDOR_DIR).is_dir())
            .unwrap_or(false)
    }
}

/// Whether a reference names a filesystem path rather than an import path
pub fn looks_local(raw: &str) -> bool {
    raw.starts_with('/') || raw.starts_with('.') || raw.starts_with(MAIN_SEPARATOR)
}

/// Resolve a project reference against the current directory and workspace roots
pub fn resolve(raw: &str, cwd: &Path, workspace_roots: &[PathBuf]) -> XgoResult<ProjectLocation> {
    if !looks_local(raw) {
        debug!("Treating {} as a remote import path", raw);
        return Ok(ProjectLocation {
            raw: raw.to_string(),
            is_local: false,
            mode: ProjectMode::Module,
            identity: raw.to_string(),
            root: None,
        });
    }

    let dir = absolute(Path::new(raw), cwd);
    let meta = std::fs::metadata(&dir).map_err(|_| XgoError::PathNotFound(dir.clone()))?;
    if !meta.is_dir() {
        return Err(XgoError::PathInvalid {
            path: dir,
            reason: "not a directory".to_string(),
        });
    }

    if dir.join(MANIFEST_FILE).is_file() {
        debug!("Found {} in {}", MANIFEST_FILE, dir.display());
        return Ok(module_location(raw, dir));
    }

    if workspace_roots.is_empty() {
        return Err(XgoError::WorkspaceUnset);
    }

    let (resolved, import_path) =
        import_identity(&dir, workspace_roots).ok_or_else(|| XgoError::NotInWorkspace(dir.clone()))?;
    debug!("Resolved {} to import path {}", dir.display(), import_path);

    if resolved.join(MANIFEST_FILE).is_file() {
        return Ok(module_location(raw, resolved));
    }

    info!("{} not found, building without go modules", MANIFEST_FILE);
    Ok(ProjectLocation {
        raw: raw.to_string(),
        is_local: true,
        mode: ProjectMode::Legacy,
        identity: import_path,
        root: Some(resolved),
    })
}

fn module_location(raw: &str, dir: PathBuf) -> ProjectLocation {
    ProjectLocation {
        raw: raw.to_string(),
        is_local: true,
        mode: ProjectMode::Module,
        identity: dir.to_string_lossy().into_owned(),
        root: Some(dir),
    }
}

/// Map a directory to its import path under the first workspace root containing it.
///
/// Returns the directory as seen from that root together with the import path.
/// The lexical path is tried first, then the symlink-resolved one.
fn import_identity(dir: &Path, workspace_roots: &[PathBuf]) -> Option<(PathBuf, String)> {
    let real_dir = dir.canonicalize().ok();

    for root in workspace_roots {
        let sources = root.join("src");
        let real_sources = sources.canonicalize().ok();

        let candidates = [
            Some((dir, sources.as_path())),
            real_dir.as_deref().zip(real_sources.as_deref()),
        ];
        for (candidate, src) in candidates.into_iter().flatten() {
            if let Ok(rel) = candidate.strip_prefix(src) {
                let import_path = slash_path(rel);
                if !import_path.is_empty() {
                    return Some((src.join(rel), import_path));
                }
            }
        }
    }
    None
}

/// Join a relative path's components with `/`
pub(crate) fn slash_path(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Make a path absolute and lexically clean
fn absolute(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut clean = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                clean.pop();
            }
            other => clean.push(other),
        }
    }
    clean
}
