//! Simulation session.
//!
//! A [`Session`] owns the cache and the counters for one run and is the only
//! writer of either. Construct one per trace replay; replaying the same trace
//! against a fresh session with the same geometry always produces identical
//! counters.

use tracing::{debug, warn};

use crate::cache::{AccessOutcome, Cache};
use crate::config::CacheConfig;
use crate::error::TraceError;
use crate::stats::Stats;
use crate::trace::{Operation, TraceRecord};

/// What one trace record did to the cache.
///
/// Instruction fetches touch nothing; loads and stores are a single access;
/// a modify is a read followed by a write of the same address, so it carries
/// two outcomes. The second of those is always a hit: the first access leaves
/// the block resident and nothing intervenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// The record was an instruction fetch; no access, no clock tick.
    Ignored,
    /// One access (load or store).
    One(AccessOutcome),
    /// Two accesses (modify): read outcome, then write outcome.
    Two(AccessOutcome, AccessOutcome),
}

/// One simulation run: a cache plus its counters.
#[derive(Debug)]
pub struct Session {
    cache: Cache,
    stats: Stats,
}

impl Session {
    /// Creates a session with an empty cache of the given geometry.
    pub fn new(config: CacheConfig) -> Self {
        debug!(
            sets = config.num_sets(),
            ways = config.ways(),
            block_bits = config.block_bits(),
            "cache session created"
        );
        Self {
            cache: Cache::new(config),
            stats: Stats::new(),
        }
    }

    /// Routes one trace record through the cache and folds the outcome(s)
    /// into the counters.
    ///
    /// The record's `size` has no effect here; only block identity matters.
    pub fn process(&mut self, record: &TraceRecord) -> Response {
        match record.op {
            Operation::Instruction => Response::Ignored,
            Operation::Load | Operation::Store => {
                let outcome = self.cache.access(record.addr);
                self.stats.record(outcome);
                Response::One(outcome)
            }
            Operation::Modify => {
                let read = self.cache.access(record.addr);
                self.stats.record(read);
                let write = self.cache.access(record.addr);
                self.stats.record(write);
                Response::Two(read, write)
            }
        }
    }

    /// Drains a record stream through [`process`](Self::process).
    ///
    /// Stops at the first error the stream yields and returns it; counters
    /// reflect everything processed before the stop.
    ///
    /// # Errors
    ///
    /// Propagates the stream's first [`TraceError`].
    pub fn run<I>(&mut self, records: I) -> Result<(), TraceError>
    where
        I: IntoIterator<Item = Result<TraceRecord, TraceError>>,
    {
        for record in records {
            match record {
                Ok(record) => {
                    let _ = self.process(&record);
                }
                Err(e) => {
                    warn!(error = %e, "trace replay stopped early");
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// The counters accumulated so far.
    #[inline]
    pub const fn stats(&self) -> &Stats {
        &self.stats
    }

    /// The cache state, for inspection.
    #[inline]
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }
}
