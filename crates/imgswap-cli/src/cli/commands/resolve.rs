//! `imgswap resolve` – resolve media URLs through the cache.

use anyhow::{Context, Result};
use imgswap_core::classify::Category;
use imgswap_core::config::ImgswapConfig;
use imgswap_core::media::{local_src, MediaCache, Resolution, RunCounters};
use std::path::Path;

/// Resolve each URL in order, print where it now lives, then persist the ledger.
/// Per-URL failures are reported inline; only storage/ledger errors abort.
pub fn run_resolve(
    cfg: &ImgswapConfig,
    media_dir: &Path,
    kind: Category,
    urls: &[String],
) -> Result<RunCounters> {
    let mut cache = MediaCache::open(media_dir, cfg)
        .with_context(|| format!("open media directory {}", media_dir.display()))?;
    let label = media_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cfg.media_dir_name.clone());

    for url in urls {
        let resolution = cache.resolve_detailed(kind, url)?;
        match &resolution {
            Resolution::Failed(failure) => println!("{url} -> unavailable ({failure})"),
            Resolution::Known(None) => println!("{url} -> unavailable (failed in an earlier run)"),
            Resolution::Known(Some(id)) | Resolution::Fetched(id) => {
                println!("{url} -> {}", local_src(&label, id))
            }
        }
    }

    cache.persist()?;
    let counters = cache.counters();
    println!("{}", counters);
    Ok(counters)
}
