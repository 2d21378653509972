//! Cache geometry configuration.
//!
//! This module defines the immutable parameters of a simulated cache. It provides:
//! 1. **Geometry:** Set-index bits, associativity, and block-offset bits.
//! 2. **Validation:** Construction fails before any cache state exists when the
//!    geometry cannot address a 64-bit space.
//! 3. **Deserialization:** Configuration may be supplied as JSON; the same
//!    validation runs on that path.

use serde::Deserialize;

use crate::error::ConfigError;

/// Width of a simulated memory address in bits.
pub const ADDRESS_BITS: u32 = 64;

/// Immutable geometry of a simulated set-associative cache.
///
/// A configuration is fixed for the lifetime of a simulation run. The number
/// of sets is always a power of two, derived from the set-index bit count, so
/// set selection is a mask rather than a modulo.
///
/// # Examples
///
/// ```
/// use cachetrace_core::CacheConfig;
///
/// let config = CacheConfig::new(4, 2, 6)?;
/// assert_eq!(config.num_sets(), 16);
/// assert_eq!(config.ways(), 2);
/// # Ok::<(), cachetrace_core::ConfigError>(())
/// ```
///
/// Deserializing from JSON runs the same validation:
///
/// ```
/// use cachetrace_core::CacheConfig;
///
/// let json = r#"{ "set_bits": 4, "ways": 2, "block_bits": 6 }"#;
/// let config: CacheConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.num_sets(), 16);
///
/// let bad = r#"{ "set_bits": 40, "ways": 2, "block_bits": 30 }"#;
/// assert!(serde_json::from_str::<CacheConfig>(bad).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct CacheConfig {
    set_bits: u32,
    ways: usize,
    block_bits: u32,
}

/// Unvalidated mirror of [`CacheConfig`] used as the serde entry point.
#[derive(Debug, Deserialize)]
struct RawConfig {
    set_bits: u32,
    ways: usize,
    block_bits: u32,
}

impl TryFrom<RawConfig> for CacheConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Self::new(raw.set_bits, raw.ways, raw.block_bits)
    }
}

impl CacheConfig {
    /// Creates a validated cache geometry.
    ///
    /// # Arguments
    ///
    /// * `set_bits` - Number of set-index bits; the cache has `2^set_bits` sets.
    /// * `ways` - Associativity: line slots per set.
    /// * `block_bits` - Number of block-offset bits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWays`] when `ways` is zero, and
    /// [`ConfigError::AddressOverflow`] when `set_bits + block_bits` leaves no
    /// tag bits in a 64-bit address.
    pub fn new(set_bits: u32, ways: usize, block_bits: u32) -> Result<Self, ConfigError> {
        if ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if set_bits.saturating_add(block_bits) >= ADDRESS_BITS {
            return Err(ConfigError::AddressOverflow {
                set_bits,
                block_bits,
            });
        }
        Ok(Self {
            set_bits,
            ways,
            block_bits,
        })
    }

    /// Number of set-index bits.
    #[inline]
    pub const fn set_bits(&self) -> u32 {
        self.set_bits
    }

    /// Associativity: line slots per set.
    #[inline]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of block-offset bits.
    #[inline]
    pub const fn block_bits(&self) -> u32 {
        self.block_bits
    }

    /// Number of sets, always `2^set_bits`.
    #[inline]
    pub const fn num_sets(&self) -> usize {
        1 << self.set_bits
    }

    /// Number of tag bits above the set-index and block-offset fields.
    #[inline]
    pub const fn tag_bits(&self) -> u32 {
        ADDRESS_BITS - (self.set_bits + self.block_bits)
    }

    /// Total line slots in the cache (`num_sets * ways`).
    #[inline]
    pub const fn total_lines(&self) -> usize {
        self.num_sets() * self.ways
    }
}
