//! GOPATH mount planning
//!
//! Container engines do not follow symlinks out of a bind mount, so every
//! package linked into a GOPATH from elsewhere needs its own mount. Each
//! mount gets an external root `/ext-go/<n>` whose ordinal is assigned in
//! discovery order; the roots are later joined into `EXT_GOPATH`.
//!
//! Discovery is a pure walk over each workspace (`discover_links`); ordinals
//! and mount entries are assigned afterwards in `plan_mounts`.

use crate::project::location::slash_path;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Namespace for external roots inside the container
pub const EXT_ROOT: &str = "/ext-go";

/// One bind mount into the build container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    /// Path on the host
    pub host_path: PathBuf,
    /// Path inside the container
    pub container_path: String,
    /// Ordinal of the `/ext-go/<n>` root this mount lives under
    pub external_root: Option<usize>,
    /// Mount read-only
    pub read_only: bool,
}

impl MountEntry {
    /// Read-write mount outside the external root namespace
    pub fn read_write(host_path: impl Into<PathBuf>, container_path: impl Into<String>) -> Self {
        Self {
            host_path: host_path.into(),
            container_path: container_path.into(),
            external_root: None,
            read_only: false,
        }
    }

    /// Read-only mount outside the external root namespace
    pub fn read_only(host_path: impl Into<PathBuf>, container_path: impl Into<String>) -> Self {
        Self {
            read_only: true,
            ..Self::read_write(host_path, container_path)
        }
    }

    /// Volume specification in `host:container[:ro]` form
    pub fn volume_arg(&self) -> String {
        let mut arg = format!("{}:{}", self.host_path.display(), self.container_path);
        if self.read_only {
            arg.push_str(":ro");
        }
        arg
    }
}

/// A symlink under a workspace `src` tree pointing outside of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedPackage {
    /// Link location relative to the workspace `src` directory
    pub link: PathBuf,
    /// Fully resolved link target
    pub target: PathBuf,
}

/// Mounts for all workspace roots plus the matching external roots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountPlan {
    /// Mounts in ordinal order
    pub mounts: Vec<MountEntry>,
    /// `/ext-go/<n>` for each mount, same order
    pub ext_roots: Vec<String>,
}

impl MountPlan {
    /// External roots joined for `EXT_GOPATH`
    pub fn ext_gopath(&self) -> String {
        self.ext_roots.join(":")
    }

    fn push(&mut self, host_path: PathBuf, link: Option<&Path>) {
        let ordinal = self.mounts.len() + 1;
        let ext_root = format!("{EXT_ROOT}/{ordinal}");

        let mut container_path = format!("{ext_root}/src");
        if let Some(link) = link {
            container_path.push('/');
            container_path.push_str(&slash_path(link));
        }

        debug!("Mounting {} at {}", host_path.display(), container_path);
        self.mounts.push(MountEntry {
            host_path,
            container_path,
            external_root: Some(ordinal),
            read_only: true,
        });
        self.ext_roots.push(ext_root);
    }
}

/// Find symlinked directories under `sources` whose targets live outside it.
///
/// Dangling links, links to files and links back into `sources` are skipped.
/// Entries are visited in file name order so the result is stable.
pub fn discover_links(sources: &Path) -> Vec<LinkedPackage> {
    let real_sources = sources.canonicalize().ok();
    let walker = WalkDir::new(sources)
        .follow_links(false)
        .min_depth(1)
        .sort_by_file_name();

    let mut links = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to access GOPATH element: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_symlink() {
            continue;
        }

        let Ok(target) = fs::canonicalize(entry.path()) else {
            continue;
        };
        if !target.is_dir() {
            continue;
        }
        let inside = target.starts_with(sources)
            || real_sources
                .as_deref()
                .is_some_and(|real| target.starts_with(real));
        if inside {
            continue;
        }

        let Ok(link) = entry.path().strip_prefix(sources) else {
            continue;
        };
        links.push(LinkedPackage {
            link: link.to_path_buf(),
            target,
        });
    }
    links
}

/// Plan the mounts exposing every workspace root inside the container.
///
/// For each root, its externally linked packages come first, followed by the
/// root's own `src` tree. Ordinals run across all roots and are only spent on
/// emitted mounts.
pub fn plan_mounts(workspace_roots: &[PathBuf]) -> MountPlan {
    let mut plan = MountPlan::default();

    for root in workspace_roots {
        let sources = root.join("src");
        for linked in discover_links(&sources) {
            plan.push(linked.target, Some(&linked.link));
        }
        plan.push(sources, None);
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/github.com/user/app")).unwrap();
        dir
    }

    #[test]
    fn volume_arg_marks_read_only() {
        let ro = MountEntry::read_only("/host/cache", "/deps-cache");
        assert_eq!(ro.volume_arg(), "/host/cache:/deps-cache:ro");

        let rw = MountEntry::read_write("/host/out", "/build");
        assert_eq!(rw.volume_arg(), "/host/out:/build");
    }

    #[test]
    fn one_mount_per_root_without_links() {
        let first = workspace();
        let second = workspace();
        let roots = vec![first.path().to_path_buf(), second.path().to_path_buf()];

        let plan = plan_mounts(&roots);

        assert_eq!(plan.mounts.len(), 2);
        assert_eq!(plan.mounts[0].host_path, first.path().join("src"));
        assert_eq!(plan.mounts[0].container_path, "/ext-go/1/src");
        assert_eq!(plan.mounts[0].external_root, Some(1));
        assert_eq!(plan.mounts[1].host_path, second.path().join("src"));
        assert_eq!(plan.mounts[1].container_path, "/ext-go/2/src");
        assert!(plan.mounts.iter().all(|m| m.read_only));
        assert_eq!(plan.ext_gopath(), "/ext-go/1:/ext-go/2");
    }

    #[test]
    fn missing_src_still_mounts_root() {
        let empty = TempDir::new().unwrap();
        let plan = plan_mounts(&[empty.path().to_path_buf()]);
        assert_eq!(plan.mounts.len(), 1);
        assert_eq!(plan.mounts[0].container_path, "/ext-go/1/src");
    }

    #[cfg(unix)]
    mod symlinks {
        use super::*;
        use std::os::unix::fs::symlink;

        #[test]
        fn external_link_precedes_root_mount() {
            let gopath = workspace();
            let external = TempDir::new().unwrap();
            let lib = external.path().join("lib");
            fs::create_dir(&lib).unwrap();
            symlink(&lib, gopath.path().join("src/github.com/user/lib")).unwrap();

            let plan = plan_mounts(&[gopath.path().to_path_buf()]);

            assert_eq!(plan.mounts.len(), 2);
            let link = &plan.mounts[0];
            assert_eq!(link.host_path, lib.canonicalize().unwrap());
            assert_eq!(link.container_path, "/ext-go/1/src/github.com/user/lib");
            assert_eq!(link.external_root, Some(1));
            assert!(link.read_only);
            assert_eq!(plan.mounts[1].container_path, "/ext-go/2/src");
            assert_eq!(plan.mounts[1].external_root, Some(2));
        }

        #[test]
        fn link_inside_workspace_is_skipped() {
            let gopath = workspace();
            symlink(
                gopath.path().join("src/github.com/user/app"),
                gopath.path().join("src/alias"),
            )
            .unwrap();

            let plan = plan_mounts(&[gopath.path().to_path_buf()]);
            assert_eq!(plan.mounts.len(), 1);
        }

        #[test]
        fn dangling_and_file_links_do_not_consume_ordinals() {
            let gopath = workspace();
            let external = TempDir::new().unwrap();
            let file = external.path().join("notes.txt");
            fs::write(&file, "x").unwrap();
            let lib = external.path().join("lib");
            fs::create_dir(&lib).unwrap();

            let src = gopath.path().join("src");
            symlink(external.path().join("gone"), src.join("a-dangling")).unwrap();
            symlink(&file, src.join("b-file")).unwrap();
            symlink(&lib, src.join("c-lib")).unwrap();

            let plan = plan_mounts(&[gopath.path().to_path_buf()]);

            assert_eq!(plan.mounts.len(), 2);
            assert_eq!(plan.mounts[0].container_path, "/ext-go/1/src/c-lib");
            assert_eq!(plan.mounts[1].container_path, "/ext-go/2/src");
        }

        #[test]
        fn ordinals_continue_across_roots() {
            let first = workspace();
            let second = workspace();
            let external = TempDir::new().unwrap();
            symlink(external.path(), second.path().join("src/ext")).unwrap();

            let plan = plan_mounts(&[first.path().to_path_buf(), second.path().to_path_buf()]);

            let paths: Vec<_> = plan.mounts.iter().map(|m| m.container_path.as_str()).collect();
            assert_eq!(paths, vec!["/ext-go/1/src", "/ext-go/2/src/ext", "/ext-go/3/src"]);
            assert_eq!(plan.ext_gopath(), "/ext-go/1:/ext-go/2:/ext-go/3");
        }

        #[test]
        fn planning_is_deterministic() {
            let gopath = workspace();
            let external = TempDir::new().unwrap();
            for name in ["zeta", "alpha", "mid"] {
                let dir = external.path().join(name);
                fs::create_dir(&dir).unwrap();
                symlink(&dir, gopath.path().join("src").join(name)).unwrap();
            }
            let roots = vec![gopath.path().to_path_buf()];

            let first = plan_mounts(&roots);
            let second = plan_mounts(&roots);

            assert_eq!(first, second);
            assert_eq!(first.ext_gopath(), second.ext_gopath());
            let names: Vec<_> = first.mounts[..3]
                .iter()
                .map(|m| m.container_path.rsplit('/').next().unwrap().to_string())
                .collect();
            assert_eq!(names, vec!["alpha", "mid", "zeta"]);
        }
    }
}
