//! Address decomposition.
//!
//! Splits a 64-bit memory address into the (tag, set index) pair that
//! identifies a cache block. The block-offset bits below the set-index field
//! select a byte within the block and are irrelevant to hit/miss
//! classification, so they are discarded here.

use crate::config::CacheConfig;

/// The cache-visible identity of a memory address: which set it maps to and
/// which tag distinguishes its block within that set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockAddr {
    /// Address bits above the set-index and block-offset fields.
    pub tag: u64,
    /// Set selected by the address, in `0..config.num_sets()`.
    pub set: usize,
}

impl BlockAddr {
    /// Decomposes an address under the given geometry.
    ///
    /// Pure and total: any 64-bit address decomposes under any valid
    /// configuration. The set index is masked to `num_sets - 1`, which is
    /// exact because the set count is a power of two.
    #[inline]
    pub const fn decompose(addr: u64, config: &CacheConfig) -> Self {
        let set_mask = (config.num_sets() - 1) as u64;
        Self {
            tag: addr >> (config.block_bits() + config.set_bits()),
            set: ((addr >> config.block_bits()) & set_mask) as usize,
        }
    }
}
