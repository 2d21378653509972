//! Cache-trace simulator library.
//!
//! This crate replays a recorded stream of memory accesses against a modeled
//! set-associative cache and classifies every access. It provides:
//! 1. **Geometry:** [`CacheConfig`] — set-index bits, associativity, and block-offset bits.
//! 2. **Engine:** [`Cache`] — the resident-block state, LRU replacement, and access classification.
//! 3. **Traces:** Valgrind-style trace records, a line parser, and a file-backed reader.
//! 4. **Sessions:** [`Session`] — drives records through the engine and accumulates [`Stats`].
//!
//! Only block identity (tag and set) is modeled. There is no timing, no data
//! movement, and no multi-level hierarchy; the simulator answers exactly one
//! question per access: hit, miss, or miss with eviction.
//!
//! # Examples
//!
//! ```
//! use cachetrace_core::{CacheConfig, Operation, Session, TraceRecord};
//!
//! let config = CacheConfig::new(1, 2, 4)?;
//! let mut session = Session::new(config);
//!
//! let record = TraceRecord { op: Operation::Load, addr: 0x10, size: 4 };
//! let _ = session.process(&record);
//! let _ = session.process(&record);
//!
//! assert_eq!(session.stats().snapshot(), (1, 1, 0));
//! # Ok::<(), cachetrace_core::ConfigError>(())
//! ```

/// Cache geometry (set bits, associativity, block bits) and validation.
pub mod config;
/// Set-associative cache state, address decomposition, and LRU replacement.
pub mod cache;
/// Error taxonomy for configuration and trace ingestion.
pub mod error;
/// Simulation session: routes trace records through the cache engine.
pub mod session;
/// Hit/miss/eviction counters and the end-of-run summary.
pub mod stats;
/// Valgrind-style trace records, line parsing, and trace readers.
pub mod trace;

pub use crate::cache::{AccessOutcome, BlockAddr, Cache};
pub use crate::config::CacheConfig;
pub use crate::error::{ConfigError, Error, TraceError};
pub use crate::session::{Response, Session};
pub use crate::stats::Stats;
pub use crate::trace::{Operation, TraceReader, TraceRecord};
