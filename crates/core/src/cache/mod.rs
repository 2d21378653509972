//! Set-associative cache engine.
//!
//! This module holds the only real state in the simulator: which block
//! (tag + set) currently occupies each line slot, and the logical clock that
//! orders accesses for LRU replacement. It provides:
//! 1. **Storage:** One contiguous allocation of `num_sets * ways` line slots,
//!    sized once from the configuration.
//! 2. **Classification:** [`Cache::access`] decides hit, miss, or miss with
//!    eviction, and mutates the touched set accordingly.
//! 3. **Replacement:** Strict LRU via a monotonically increasing counter
//!    stamped into each line, which makes replay exactly reproducible.

/// Address-to-(tag, set) decomposition.
pub mod decode;

pub use decode::BlockAddr;

use crate::config::CacheConfig;

/// Classification of one cache access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The block was resident.
    Hit,
    /// The block was not resident and filled an empty slot.
    Miss,
    /// The block was not resident and displaced the least recently used line.
    MissWithEviction,
}

impl AccessOutcome {
    /// True for both miss variants.
    #[inline]
    pub const fn is_miss(self) -> bool {
        !matches!(self, Self::Hit)
    }

    /// True only when a resident line was displaced.
    #[inline]
    pub const fn evicted(self) -> bool {
        matches!(self, Self::MissWithEviction)
    }
}

/// One line slot: the tag of the resident block, a validity flag, and the
/// clock value of its most recent use.
#[derive(Debug, Clone, Default)]
struct CacheLine {
    tag: u64,
    valid: bool,
    last_used: u64,
}

/// Set-associative cache state with LRU replacement.
///
/// Lines are stored in a single `Vec` indexed `(set * ways) + way`; the
/// allocation happens once at construction and never grows. The logical
/// clock is owned here and advances exactly once per [`access`](Self::access)
/// call, hit or miss, so `last_used` values totally order the lines of a set
/// without any wall-clock nondeterminism.
#[derive(Debug)]
pub struct Cache {
    lines: Vec<CacheLine>, // index = (set * ways) + way
    config: CacheConfig,
    clock: u64,
}

impl Cache {
    /// Allocates an empty cache for the given geometry.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            lines: vec![CacheLine::default(); config.total_lines()],
            config,
            clock: 0,
        }
    }

    /// The geometry this cache was built from.
    #[inline]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Classifies one access and updates the touched set.
    ///
    /// The scan walks the set's slots left to right. A valid slot with a
    /// matching tag is a hit; tags are unique among the valid lines of a set,
    /// so at most one slot can match. Otherwise the first invalid slot (if
    /// any) receives the block, and a full set displaces the slot with the
    /// smallest `last_used` stamp, ties going to the lowest way index.
    pub fn access(&mut self, addr: u64) -> AccessOutcome {
        self.clock += 1;
        let block = BlockAddr::decompose(addr, &self.config);
        let base = block.set * self.config.ways();

        let mut first_empty = None;
        for way in 0..self.config.ways() {
            let idx = base + way;
            if self.lines[idx].valid {
                if self.lines[idx].tag == block.tag {
                    self.lines[idx].last_used = self.clock;
                    return AccessOutcome::Hit;
                }
            } else if first_empty.is_none() {
                first_empty = Some(idx);
            }
        }

        if let Some(idx) = first_empty {
            self.lines[idx] = CacheLine {
                tag: block.tag,
                valid: true,
                last_used: self.clock,
            };
            return AccessOutcome::Miss;
        }

        let mut victim = base;
        for way in 1..self.config.ways() {
            let idx = base + way;
            if self.lines[idx].last_used < self.lines[victim].last_used {
                victim = idx;
            }
        }
        self.lines[victim].tag = block.tag;
        self.lines[victim].last_used = self.clock;
        AccessOutcome::MissWithEviction
    }

    /// Whether the block containing `addr` is currently resident.
    ///
    /// Read-only: no clock tick, no LRU update.
    pub fn contains(&self, addr: u64) -> bool {
        let block = BlockAddr::decompose(addr, &self.config);
        let base = block.set * self.config.ways();
        self.lines[base..base + self.config.ways()]
            .iter()
            .any(|line| line.valid && line.tag == block.tag)
    }

    /// Tags of the valid lines in `set`, in way order.
    ///
    /// # Panics
    ///
    /// Panics if `set >= num_sets`.
    pub fn resident_tags(&self, set: usize) -> Vec<u64> {
        let base = set * self.config.ways();
        self.lines[base..base + self.config.ways()]
            .iter()
            .filter(|line| line.valid)
            .map(|line| line.tag)
            .collect()
    }
}
