//! Usage counters reported by providers.

use serde::Serialize;

/// Point-in-time usage snapshot of a provider.
///
/// Counters are read without synchronization and may lag slightly behind
/// concurrent operations; they never decrease.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries currently stored.
    pub len: usize,
    /// Maximum entries retained; 0 means unbounded.
    pub capacity: usize,
    /// Lookups that found their key.
    pub hits: u64,
    /// All lookups, hits and misses.
    pub accesses: u64,
}

impl CacheStats {
    pub const fn misses(&self) -> u64 {
        self.accesses.saturating_sub(self.hits)
    }

    /// Fraction of lookups that hit, or 0.0 before any lookup.
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_ratio(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }
}
