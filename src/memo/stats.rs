//! Diagnostic snapshot of a single memo cache.

use std::fmt;

/// `(name, size)` snapshot of a memo cache.
///
/// Produced by [`MemoStatsSource::stats`](crate::traits::MemoStatsSource::stats)
/// and collected by [`CacheRegistry::all_stats`](crate::memo::CacheRegistry::all_stats).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoStats {
    /// Name given at construction, if any.
    pub name: Option<String>,
    /// Entry count at snapshot time.
    pub size: usize,
}

impl MemoStats {
    pub fn new(name: Option<String>, size: usize) -> Self {
        Self { name, size }
    }

    /// Returns the name, or `"<anonymous>"` for unnamed caches.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

impl fmt::Display for MemoStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} entries", self.display_name(), self.size)
    }
}
