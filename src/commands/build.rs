//! Build the site index and write its JSON snapshot

use anyhow::{Context, Result};
use notify::Watcher;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::index::SiteIndex;
use crate::Site;

/// Options for the `build` command
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Padding seed, overriding the configured one
    pub seed: Option<u64>,
    /// Snapshot path, defaults to `Site::index_path`
    pub output: Option<PathBuf>,
}

/// Build the index once and write the snapshot
pub fn run(site: &Site, options: &BuildOptions) -> Result<SiteIndex> {
    let start = std::time::Instant::now();

    let index = site.build_index(options.seed)?;
    log_summary(&index);

    let output = options.output.clone().unwrap_or_else(|| site.index_path());
    write_snapshot(&index, &output)?;

    tracing::info!(
        "Wrote {:?} in {:.2}s",
        output,
        start.elapsed().as_secs_f64()
    );

    Ok(index)
}

/// Serialize the index snapshot as pretty JSON
pub fn write_snapshot(index: &SiteIndex, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(&index.snapshot())?;
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

fn log_summary(index: &SiteIndex) {
    let summary = index.summary();
    tracing::info!(
        "Indexed {} posts ({} authors, {} editors, {} topics, {} funnel stages)",
        summary.posts,
        index.primary.by_author.len(),
        index.primary.by_editor.len(),
        index.primary.by_topic.len(),
        index.primary.by_funnel.len()
    );
    tracing::info!(
        "Padding pool: {} posts; {} related lists padded, {} still short",
        summary.pool_size,
        summary.padded_lists,
        summary.short_lists
    );
    if summary.dropped_refs > 0 {
        tracing::info!("Dropped {} unknown related/popular slugs", summary.dropped_refs);
    }
    if summary.carried_popular > 0 {
        tracing::info!(
            "{} posts reuse the previous post's popular list",
            summary.carried_popular
        );
    }
    if !index.categories.is_empty() {
        tracing::info!("{} category pages", index.categories.len());
    }
}

/// Watch for file changes and rebuild
pub fn watch(site: &Site, options: &BuildOptions) -> Result<()> {
    let mut site = site.clone();
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;
    watch_inputs(&mut watcher, &site)?;

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                // The snapshot may live under a watched directory
                let own_output = options.output.clone().unwrap_or_else(|| site.index_path());
                if event.paths.iter().all(|p| p == &own_output) {
                    continue;
                }

                if let Err(e) = reload_on_config_change(&mut site, &event.paths) {
                    tracing::error!("Failed to reload _config.yml: {}", e);
                    continue;
                }

                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, rebuilding index...");
                    if let Err(e) = run(&site, options) {
                        tracing::error!("Index build failed: {}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

/// Register the posts dir, data dir and `_config.yml`, skipping any that
/// do not exist yet
fn watch_inputs<W: Watcher>(watcher: &mut W, site: &Site) -> Result<usize> {
    let mut watched = 0;
    for dir in [&site.posts_dir, &site.data_dir] {
        if dir.exists() {
            watcher.watch(dir, notify::RecursiveMode::Recursive)?;
            watched += 1;
        } else {
            tracing::debug!("Not watching missing directory {:?}", dir);
        }
    }

    let config_path = config_path(site);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
        watched += 1;
    }

    Ok(watched)
}

fn config_path(site: &Site) -> PathBuf {
    site.base_dir.join("_config.yml")
}

/// Re-read the site when `_config.yml` is among `changed`.
/// Returns whether the site was reloaded; on error `site` is left as is.
fn reload_on_config_change(site: &mut Site, changed: &[PathBuf]) -> Result<bool> {
    let config_path = config_path(site);
    // notify may report a canonicalized path, so match on the file name
    if !changed.iter().any(|p| p.file_name() == config_path.file_name()) {
        return Ok(false);
    }

    *site = Site::new(&site.base_dir)?;
    tracing::info!("Reloaded {:?}", config_path);
    Ok(true)
}
