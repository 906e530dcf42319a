use std::fmt;

/// Per-instance run counters. Reset only by constructing a new cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Ledger hits (success or sticky failure) served without network I/O.
    pub cached: u64,
    /// Newly fetched and stored media.
    pub fetched: u64,
    /// Fetch or classification failures recorded this run.
    pub failed: u64,
}

impl fmt::Display for RunCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} new media fetched, {} duplicate media inserted, {} media inaccessible",
            self.fetched, self.cached, self.failed
        )
    }
}
