//! # Cache Engine Tests
//!
//! Exercises classification and LRU replacement directly against the engine,
//! one access at a time. Geometries use zero block bits unless offsets are
//! the point, so addresses and blocks coincide and the arithmetic stays
//! readable.

use cachetrace_core::{AccessOutcome, Cache};

use crate::common::cfg;

// ──────────────────────────────────────────────────────────
// Classification basics
// ──────────────────────────────────────────────────────────

#[test]
fn cold_access_misses_without_eviction() {
    let mut cache = Cache::new(cfg(2, 2, 4));
    assert_eq!(cache.access(0x1000), AccessOutcome::Miss);
}

#[test]
fn repeat_access_hits() {
    let mut cache = Cache::new(cfg(2, 2, 4));
    let _ = cache.access(0x1000);
    assert_eq!(cache.access(0x1000), AccessOutcome::Hit);
}

/// Any byte of a resident block hits; the offset bits carry no identity.
#[test]
fn same_block_different_offset_hits() {
    let mut cache = Cache::new(cfg(2, 2, 6));
    let _ = cache.access(0x1000);
    assert_eq!(cache.access(0x1000 + 32), AccessOutcome::Hit);
    assert_eq!(cache.access(0x1000 + 63), AccessOutcome::Hit);
    assert_eq!(cache.access(0x1000 + 64), AccessOutcome::Miss);
}

// ──────────────────────────────────────────────────────────
// Filling and eviction
// ──────────────────────────────────────────────────────────

/// A set fills its empty slots before anything is displaced.
#[test]
fn set_fills_before_evicting() {
    let mut cache = Cache::new(cfg(0, 4, 0));
    for addr in 0..4 {
        assert_eq!(cache.access(addr), AccessOutcome::Miss);
    }
    assert_eq!(cache.access(4), AccessOutcome::MissWithEviction);
}

/// The victim is the line whose last use is oldest, not the one filled first.
#[test]
fn eviction_selects_least_recently_used() {
    let mut cache = Cache::new(cfg(0, 2, 0));
    let _ = cache.access(0xa); // fill way 0
    let _ = cache.access(0xb); // fill way 1
    let _ = cache.access(0xa); // refresh a; b is now LRU

    assert_eq!(cache.access(0xc), AccessOutcome::MissWithEviction);
    assert!(cache.contains(0xa), "refreshed line must survive");
    assert!(!cache.contains(0xb), "stale line must be displaced");
    assert!(cache.contains(0xc));
}

/// Re-accessing an evicted block is a cold start again.
#[test]
fn evicted_block_restarts_cold() {
    let mut cache = Cache::new(cfg(0, 2, 0));
    let _ = cache.access(0xa);
    let _ = cache.access(0xb);
    let _ = cache.access(0xc); // evicts a

    assert_eq!(cache.access(0xa), AccessOutcome::MissWithEviction);
    assert!(!cache.contains(0xb), "b was LRU once c landed");
}

/// Direct-mapped single-set cache: alternating blocks thrash.
#[test]
fn direct_mapped_thrash() {
    let mut cache = Cache::new(cfg(0, 1, 0));
    assert_eq!(cache.access(0), AccessOutcome::Miss);
    assert_eq!(cache.access(1), AccessOutcome::MissWithEviction);
    assert_eq!(cache.access(0), AccessOutcome::MissWithEviction);
}

/// Conflict only happens within a set; other sets are untouched.
#[test]
fn eviction_is_per_set() {
    let mut cache = Cache::new(cfg(1, 1, 0));
    let _ = cache.access(0); // set 0
    let _ = cache.access(1); // set 1
    let _ = cache.access(2); // set 0, evicts block 0

    assert!(cache.contains(1), "set 1 must be unaffected");
    assert!(!cache.contains(0));
    assert!(cache.contains(2));
}

// ──────────────────────────────────────────────────────────
// Inspection
// ──────────────────────────────────────────────────────────

/// `contains` is a pure read: it must not refresh LRU state.
#[test]
fn contains_does_not_refresh_lru() {
    let mut cache = Cache::new(cfg(0, 2, 0));
    let _ = cache.access(0xa);
    let _ = cache.access(0xb);

    assert!(cache.contains(0xa));
    let _ = cache.access(0xc); // a is still LRU; contains() was not an access

    assert!(!cache.contains(0xa));
    assert!(cache.contains(0xb));
}

#[test]
fn resident_tags_reflect_set_contents() {
    let config = cfg(1, 2, 2);
    let mut cache = Cache::new(config);
    assert!(cache.resident_tags(0).is_empty());
    assert!(cache.resident_tags(1).is_empty());

    // block size 4, two sets: addr 0x00 -> set 0 tag 0, addr 0x14 -> set 1 tag 2.
    let _ = cache.access(0x00);
    let _ = cache.access(0x14);
    assert_eq!(cache.resident_tags(0), vec![0]);
    assert_eq!(cache.resident_tags(1), vec![2]);
}

#[test]
fn config_is_preserved() {
    let config = cfg(3, 2, 5);
    let cache = Cache::new(config);
    assert_eq!(*cache.config(), config);
}

#[test]
fn outcome_predicates() {
    assert!(!AccessOutcome::Hit.is_miss());
    assert!(AccessOutcome::Miss.is_miss());
    assert!(AccessOutcome::MissWithEviction.is_miss());

    assert!(AccessOutcome::MissWithEviction.evicted());
    assert!(!AccessOutcome::Miss.evicted());
    assert!(!AccessOutcome::Hit.evicted());
}
