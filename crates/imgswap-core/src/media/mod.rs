//! Media acquisition and deduplication cache.
//!
//! Given a URL and an expected [`Category`], returns the name of a local,
//! content-addressed copy of that media:
//! - ledger hits are returned as-is (no network, no re-validation)
//! - on a miss the URL is fetched once after a fixed politeness delay,
//!   classified by magic bytes, hashed, and stored as `<sha256>.<ext>`
//! - every outcome, success or failure, is recorded in the ledger and never revisited
//!
//! The cache is single-threaded by construction (`resolve` takes `&mut self`);
//! one instance serves one run and the ledger is written back by [`MediaCache::persist`].

mod counters;
mod ledger;
mod store;

pub use counters::RunCounters;
pub use ledger::{Iter as LedgerIter, Ledger, LEDGER_FILE};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::checksum::sha256_hex;
use crate::classify::{classify, Category, Classification, UNKNOWN_MIME};
use crate::config::ImgswapConfig;
use crate::error::{MediaError, MediaResult};
use crate::fetch::{CurlFetcher, FetchError, Fetcher};

/// Attribute that keeps the original remote URL on a rewritten element.
pub const ORIGINAL_SRC_ATTR: &str = "data-imgswap-src";

/// `src` value for a rewritten element: `<media_dir_name>/<identifier>`.
pub fn local_src(media_dir_name: &str, identifier: &str) -> String {
    let dir = media_dir_name.trim_end_matches('/');
    if dir.is_empty() {
        identifier.to_string()
    } else {
        format!("{}/{}", dir, identifier)
    }
}

/// Why a URL ended up with a sticky failure marker.
#[derive(Debug)]
pub enum ResolveFailure {
    /// Transport error, invalid URL, or non-2xx status.
    Fetch(FetchError),
    /// Body did not sniff as a MIME type accepted for the requested category.
    Unrecognized {
        category: Category,
        mime: Option<&'static str>,
    },
}

impl fmt::Display for ResolveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveFailure::Fetch(e) => write!(f, "fetch failed: {}", e),
            ResolveFailure::Unrecognized { category, mime } => write!(
                f,
                "unrecognized {} content ({})",
                category,
                mime.unwrap_or(UNKNOWN_MIME)
            ),
        }
    }
}

/// Detailed outcome of a resolve call.
#[derive(Debug)]
pub enum Resolution {
    /// Served from the ledger; `None` is a sticky failure from an earlier attempt.
    Known(Option<String>),
    /// Fetched, classified and stored during this call.
    Fetched(String),
    /// Attempted during this call and failed; now recorded as a sticky failure.
    Failed(ResolveFailure),
}

impl Resolution {
    /// Local identifier, if there is one.
    pub fn into_identifier(self) -> Option<String> {
        match self {
            Resolution::Known(name) => name,
            Resolution::Fetched(name) => Some(name),
            Resolution::Failed(_) => None,
        }
    }
}

/// Content-addressed media cache rooted at one directory.
pub struct MediaCache<F = CurlFetcher> {
    dir: PathBuf,
    ledger: Ledger,
    counters: RunCounters,
    fetcher: F,
    fetch_delay: Duration,
}

impl MediaCache<CurlFetcher> {
    /// Open the cache at `dir` with a libcurl fetcher and the configured delay.
    pub fn open(dir: &Path, cfg: &ImgswapConfig) -> MediaResult<Self> {
        Self::open_with(dir, CurlFetcher::new(cfg.fetch_config()), cfg.fetch_delay())
    }
}

impl<F: Fetcher> MediaCache<F> {
    /// Open the cache at `dir`, creating the directory if needed and loading
    /// `known.json` if present.
    pub fn open_with(dir: &Path, fetcher: F, fetch_delay: Duration) -> MediaResult<Self> {
        if dir.exists() {
            if !dir.is_dir() {
                return Err(MediaError::NotADirectory(dir.to_path_buf()));
            }
        } else {
            std::fs::create_dir_all(dir).map_err(|e| MediaError::storage(dir, e))?;
            tracing::info!("created media directory {}", dir.display());
        }
        let dir = dir
            .canonicalize()
            .map_err(|e| MediaError::storage(dir, e))?;

        let ledger = Ledger::load(&dir.join(LEDGER_FILE))?;
        tracing::debug!(
            "opened media cache at {} ({} known URLs)",
            dir.display(),
            ledger.len()
        );

        Ok(Self {
            dir,
            ledger,
            counters: RunCounters::default(),
            fetcher,
            fetch_delay,
        })
    }

    /// Local filename for `url`, fetching it first if it has never been seen.
    /// `Ok(None)` means the media is unavailable (now or from an earlier attempt).
    /// `Err` is reserved for storage failures, which abort the run.
    pub fn resolve(&mut self, category: Category, url: &str) -> MediaResult<Option<String>> {
        Ok(self.resolve_detailed(category, url)?.into_identifier())
    }

    /// Like [`resolve`](Self::resolve), but reports how the result was obtained.
    pub fn resolve_detailed(&mut self, category: Category, url: &str) -> MediaResult<Resolution> {
        if let Some(known) = self.ledger.get(url) {
            self.counters.cached += 1;
            let known = known.map(str::to_string);
            match &known {
                Some(name) => tracing::debug!("{}: from known", name),
                None => tracing::debug!("{}: known unavailable", url),
            }
            return Ok(Resolution::Known(known));
        }

        if !self.fetch_delay.is_zero() {
            std::thread::sleep(self.fetch_delay);
        }

        let response = match self.fetcher.get(url) {
            Ok(r) => r,
            Err(e) => return Ok(self.record_failure(url, ResolveFailure::Fetch(e))),
        };

        let extension = match classify(category, &response.body) {
            Classification::Accepted { extension, .. } => extension,
            Classification::Unrecognized { mime } => {
                return Ok(self.record_failure(url, ResolveFailure::Unrecognized { category, mime }))
            }
        };

        let filename = store::content_filename(&sha256_hex(&response.body), extension);
        let written = store::store_content(&self.dir, &filename, &response.body)
            .map_err(|e| MediaError::storage(self.dir.join(&filename), e))?;
        if !written {
            tracing::debug!("{}: content already stored, reusing", filename);
        }

        self.ledger.record(url, Some(filename.clone()));
        self.counters.fetched += 1;
        tracing::info!("{}: from remote {}", filename, url);
        Ok(Resolution::Fetched(filename))
    }

    fn record_failure(&mut self, url: &str, failure: ResolveFailure) -> Resolution {
        tracing::warn!("{}: {}", url, failure);
        self.ledger.record(url, None);
        self.counters.failed += 1;
        Resolution::Failed(failure)
    }

    /// Write the full ledger to `<dir>/known.json`, replacing what was there.
    pub fn persist(&self) -> MediaResult<()> {
        let path = self.ledger_path();
        self.ledger.save(&path)?;
        tracing::debug!("saved {} ledger entries to {}", self.ledger.len(), path.display());
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.dir.join(LEDGER_FILE)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn counters(&self) -> RunCounters {
        self.counters
    }
}

impl<F> fmt::Debug for MediaCache<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaCache")
            .field("dir", &self.dir)
            .field("known", &self.ledger.len())
            .field("counters", &self.counters)
            .finish()
    }
}
