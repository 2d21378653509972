//! Shared test helpers.
//!
//! Tests describe traces as inline text in the same format the tool reads
//! from disk, so the parser is exercised on every replay.

use std::io::Cursor;

use cachetrace_core::{CacheConfig, Session, TraceReader};

/// Builds a geometry, panicking on invalid parameters.
pub fn cfg(set_bits: u32, ways: usize, block_bits: u32) -> CacheConfig {
    CacheConfig::new(set_bits, ways, block_bits).unwrap()
}

/// Replays an inline trace against a fresh session and returns it.
pub fn replay(config: CacheConfig, trace: &str) -> Session {
    let mut session = Session::new(config);
    session.run(TraceReader::new(Cursor::new(trace))).unwrap();
    session
}

/// Replays an inline trace and returns the final `(hits, misses, evictions)`.
pub fn counters(config: CacheConfig, trace: &str) -> (u64, u64, u64) {
    replay(config, trace).stats().snapshot()
}
