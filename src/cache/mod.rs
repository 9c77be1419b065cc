//! Dependency cache for CGO archives
//!
//! Archives listed with `--deps` are fetched once into a host directory and
//! mounted read-only into the build container at `/deps-cache`.
//!
//! | Situation | Action |
//! |-----------|--------|
//! | File with the URL's name exists | Reused as is |
//! | File missing | Downloaded, then renamed into place |
//! | Download fails | Run aborts, partial file removed |

pub mod deps;
pub mod fetch;

pub use deps::{
    CacheEntry, CacheOutcome, CachedArchive, DependencyCache, CONTAINER_CACHE_ROOT,
};
pub use fetch::{Fetcher, HttpFetcher};

/// Format bytes as human-readable size (e.g., "1.5 MB")
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
