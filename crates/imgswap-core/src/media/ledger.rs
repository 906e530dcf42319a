//! URL -> cached filename ledger, persisted as `known.json` in the media dir.
//!
//! A `None` value is a sticky failure marker: the URL was tried once and will
//! not be fetched again, in this run or any later one.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{MediaError, MediaResult};
use crate::media::store::temp_path;

/// File name of the ledger inside the media directory.
pub const LEDGER_FILE: &str = "known.json";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: BTreeMap<String, Option<String>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the ledger from `path`. A missing file is an empty ledger; a file
    /// that is not a JSON object of string -> string-or-null is `CorruptLedger`.
    pub fn load(path: &Path) -> MediaResult<Self> {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => {
                return Err(MediaError::LedgerRead {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };
        let entries: BTreeMap<String, Option<String>> =
            serde_json::from_slice(&bytes).map_err(|e| MediaError::CorruptLedger {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self { entries })
    }

    /// Write the whole ledger to `path`, replacing any previous contents.
    /// Goes through a `.part` file and a rename so readers never see a half-written ledger.
    pub fn save(&self, path: &Path) -> MediaResult<()> {
        let json = serde_json::to_vec_pretty(&self.entries)
            .map_err(|e| MediaError::storage(path, std::io::Error::other(e)))?;
        let tmp = temp_path(path);
        let written = std::fs::write(&tmp, json)
            .map_err(|e| MediaError::storage(&tmp, e))
            .and_then(|()| {
                std::fs::rename(&tmp, path).map_err(|e| MediaError::storage(path, e))
            });
        if written.is_err() {
            let _ = std::fs::remove_file(&tmp);
        }
        written
    }

    /// Recorded outcome for `url`: `None` if never seen, `Some(None)` for a
    /// sticky failure, `Some(Some(name))` for a cached file.
    pub fn get(&self, url: &str) -> Option<Option<&str>> {
        self.entries.get(url).map(|v| v.as_deref())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Record the outcome for a URL that has not been seen yet.
    /// Existing entries are never overwritten.
    pub(crate) fn record(&mut self, url: &str, outcome: Option<String>) {
        self.entries.entry(url.to_string()).or_insert(outcome);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Number of entries pointing at a cached file.
    pub fn successes(&self) -> usize {
        self.entries.values().filter(|v| v.is_some()).count()
    }

    /// Number of sticky failure markers.
    pub fn failures(&self) -> usize {
        self.entries.values().filter(|v| v.is_none()).count()
    }
}

/// Iterator over `(url, outcome)` in URL order.
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, Option<String>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, Option<&'a str>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}
