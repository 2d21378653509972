//! Error taxonomy.
//!
//! All failure in this crate originates at the boundary: either the cache
//! geometry is rejected before any state is built, or the trace source cannot
//! be read or parsed. The cache engine itself is total over well-formed
//! inputs and has no error paths.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid cache geometry, rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Associativity of zero would make every set slotless.
    #[error("associativity must be at least 1")]
    ZeroWays,

    /// The set-index and block-offset fields leave no tag bits.
    #[error(
        "set bits ({set_bits}) plus block bits ({block_bits}) must be less than the 64-bit address width"
    )]
    AddressOverflow {
        /// Requested set-index bit count.
        set_bits: u32,
        /// Requested block-offset bit count.
        block_bits: u32,
    },
}

/// Failure while reading or parsing a trace source.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened.
    #[error("cannot open trace file '{}': {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An I/O error occurred mid-stream.
    #[error("trace read failed: {0}")]
    Io(#[from] io::Error),

    /// A line did not match the `op address,size` record shape.
    ///
    /// Processing stops at the first such record; everything recorded up to
    /// that point remains valid.
    #[error("malformed trace record at line {line}: {text:?}")]
    Malformed {
        /// 1-based line number of the offending record.
        line: usize,
        /// The offending line, verbatim.
        text: String,
    },
}

/// Any failure a simulation run can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cache geometry.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Trace source failure.
    #[error(transparent)]
    Trace(#[from] TraceError),
}
