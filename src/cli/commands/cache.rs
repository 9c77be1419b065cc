//! Cache command - inspect the dependency cache

use crate::cache::{format_bytes, CachedArchive, DependencyCache};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::Config;
use crate::error::XgoResult;
use console::style;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> XgoResult<()> {
    let cache = DependencyCache::new(config.cache.root());

    match args.action {
        CacheAction::Path => {
            println!("{}", cache.root().display());
            Ok(())
        }
        CacheAction::List { format } => list_archives(&cache, format),
    }
}

fn list_archives(cache: &DependencyCache, format: OutputFormat) -> XgoResult<()> {
    let archives = cache.list()?;

    match format {
        OutputFormat::Table => print_table(cache, &archives),
        OutputFormat::Json => print_json(&archives)?,
        OutputFormat::Plain => {
            for archive in &archives {
                println!("{}", archive.name);
            }
        }
    }
    Ok(())
}

fn print_table(cache: &DependencyCache, archives: &[CachedArchive]) {
    if archives.is_empty() {
        println!("No cached dependencies in {}", cache.root().display());
        return;
    }

    println!("{:<48} {:>10} {:<20}", "ARCHIVE", "SIZE", "MODIFIED");
    println!("{}", "-".repeat(80));

    let mut total = 0;
    for archive in archives {
        total += archive.size;
        let modified = archive
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<48} {:>10} {:<20}",
            archive.name,
            format_bytes(archive.size),
            modified
        );
    }

    println!();
    println!(
        "Total: {} archive(s), {}",
        archives.len(),
        style(format_bytes(total)).cyan()
    );
}

fn print_json(archives: &[CachedArchive]) -> XgoResult<()> {
    #[derive(serde::Serialize)]
    struct ArchiveJson<'a> {
        name: &'a str,
        size_bytes: u64,
        modified: Option<String>,
    }

    let json: Vec<ArchiveJson<'_>> = archives
        .iter()
        .map(|a| ArchiveJson {
            name: &a.name,
            size_bytes: a.size,
            modified: a.modified.map(|m| m.to_rfc3339()),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
