//! Local cache of CGO dependency archives
//!
//! Archives are keyed by the last path segment of their URL. A file already
//! present is trusted as is: no checksum, no refetch. Downloads land in a
//! per-process partial file and are renamed into place once complete, so an
//! interrupted run never leaves a truncated archive under its final name.
//!
//! There is no locking between concurrent runs. Two runs fetching the same
//! missing archive both download it and the last rename wins. Two URLs with
//! the same file name share one cache slot; whichever is cached first is used.

use crate::cache::fetch::Fetcher;
use crate::error::{XgoError, XgoResult};
use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Cache root as seen from inside the build image
pub const CONTAINER_CACHE_ROOT: &str = "/deps-cache";

const PARTIAL_MARKER: &str = ".part-";

/// A dependency URL and its cached file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub url: String,
    pub path: PathBuf,
}

/// Whether an entry was already cached or had to be downloaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Fetched,
}

/// A cached archive as reported by `xgo cache list`
#[derive(Debug, Clone)]
pub struct CachedArchive {
    pub name: String,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Filesystem cache of dependency archives
#[derive(Debug, Clone)]
pub struct DependencyCache {
    root: PathBuf,
}

impl DependencyCache {
    /// Create a cache rooted at `root`; nothing is touched until first use
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a URL is cached under
    pub fn entry_path(&self, url: &str) -> XgoResult<PathBuf> {
        Ok(self.root.join(file_name(url)?))
    }

    /// Create the cache root if missing
    pub fn ensure_root(&self) -> XgoResult<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o751);
        }
        builder.create(&self.root).map_err(|e| {
            XgoError::io(
                format!("creating dependency cache {}", self.root.display()),
                e,
            )
        })
    }

    /// Make sure every URL is cached, stopping at the first failure
    pub fn populate<F: Fetcher + ?Sized>(
        &self,
        urls: &[&str],
        fetcher: &F,
    ) -> XgoResult<Vec<CacheEntry>> {
        self.ensure_root()?;
        urls.iter()
            .map(|url| self.ensure(url, fetcher).map(|(entry, _)| entry))
            .collect()
    }

    /// Make sure a single URL is cached
    pub fn ensure<F: Fetcher + ?Sized>(
        &self,
        url: &str,
        fetcher: &F,
    ) -> XgoResult<(CacheEntry, CacheOutcome)> {
        let path = self.entry_path(url)?;
        let entry = CacheEntry {
            url: url.to_string(),
            path: path.clone(),
        };

        if path.exists() {
            info!("Dependency already cached: {}", path.display());
            return Ok((entry, CacheOutcome::Hit));
        }

        info!("Downloading new dependency: {}...", url);
        let partial = self.partial_path(&path);
        if let Err(e) = download(url, &partial, fetcher) {
            let _ = fs::remove_file(&partial);
            return Err(e);
        }
        fs::rename(&partial, &path)
            .map_err(|e| XgoError::io(format!("storing dependency {}", path.display()), e))?;

        info!("New dependency cached: {}", path.display());
        Ok((entry, CacheOutcome::Fetched))
    }

    /// Cached archives, sorted by name; partial downloads are left out
    pub fn list(&self) -> XgoResult<Vec<CachedArchive>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let context = || format!("reading dependency cache {}", self.root.display());
        let dir = fs::read_dir(&self.root).map_err(|e| XgoError::io(context(), e))?;

        let mut archives = Vec::new();
        for entry in dir {
            let entry = entry.map_err(|e| XgoError::io(context(), e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.contains(PARTIAL_MARKER) {
                continue;
            }
            let meta = entry.metadata().map_err(|e| XgoError::io(context(), e))?;
            if !meta.is_file() {
                continue;
            }
            archives.push(CachedArchive {
                name,
                size: meta.len(),
                modified: meta.modified().ok().map(DateTime::<Utc>::from),
            });
        }
        archives.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(archives)
    }

    fn partial_path(&self, path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.root
            .join(format!(".{name}{PARTIAL_MARKER}{}", std::process::id()))
    }
}

fn download<F: Fetcher + ?Sized>(url: &str, dest: &Path, fetcher: &F) -> XgoResult<()> {
    let file = File::create(dest)
        .map_err(|e| XgoError::io(format!("creating dependency file {}", dest.display()), e))?;
    let mut writer = BufWriter::new(file);
    fetcher.fetch(url, &mut writer)?;
    writer
        .flush()
        .map_err(|e| XgoError::io(format!("writing dependency file {}", dest.display()), e))
}

/// Final path segment of a URL
fn file_name(url: &str) -> XgoResult<&str> {
    let name = url.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    if name.is_empty() || name == "." || name == ".." {
        return Err(XgoError::fetch(url, "URL has no file name"));
    }
    Ok(name)
}
