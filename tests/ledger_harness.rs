#![allow(unused)]
//! Ledger store integration harness.
//!
//! # What this covers
//!
//! - **Accumulation**: the first miss for a query creates exactly one record
//!   with count 1; repeat misses increment in place and refresh `latest`,
//!   never duplicating the key.
//! - **Empty state**: an absent persisted record loads as an empty ledger,
//!   not an error.
//! - **Round-trip**: `save(load())` leaves the ledger content unchanged.
//! - **File-backed store**: the JSON file store survives process handoff
//!   (new store instance over the same directory sees the same ledger).
//!
//! # What this does NOT cover
//!
//! - Rank resolution and removal (see view_harness)
//! - The HTTP surface (see admin_harness)
//!
//! # Running
//!
//! ```sh
//! cargo test --test ledger_harness
//! ```

mod common;
use common::*;

use misslog_core::{JsonFileKv, Ledger, LedgerStore};

// ---------------------------------------------------------------------------
// Accumulation
// ---------------------------------------------------------------------------

/// A previously unseen query gets exactly one record `{count: 1, latest: now}`.
#[test]
fn first_miss_creates_single_record() {
    let store = empty_store();

    store.record_miss_at("blue widgets", 1_000).unwrap();

    let ledger = store.load().unwrap();
    assert_ledger_keys!(ledger, ["blue widgets"]);
    assert_record!(ledger, "blue widgets", count = 1, latest = 1_000);
}

/// Re-observing the same query increments the count and refreshes `latest`
/// without creating a second record.
#[test]
fn repeat_miss_accumulates_in_place() {
    let store = empty_store();

    store.record_miss_at("blue widgets", 1_000).unwrap();
    store.record_miss_at("blue widgets", 2_500).unwrap();

    let ledger = store.load().unwrap();
    assert_ledger_keys!(ledger, ["blue widgets"]);
    assert_record!(ledger, "blue widgets", count = 2, latest = 2_500);
}

/// Distinct query strings accumulate independently; matching is
/// case-sensitive and untrimmed.
#[test]
fn distinct_queries_get_distinct_records() {
    let store = empty_store();

    store.record_miss_at("widgets", 10).unwrap();
    store.record_miss_at("Widgets", 20).unwrap();
    store.record_miss_at("widgets ", 30).unwrap();

    let ledger = store.load().unwrap();
    assert_ledger_keys!(ledger, ["widgets", "Widgets", "widgets "]);
    assert_record!(ledger, "widgets", count = 1, latest = 10);
}

/// `record_miss` (wall clock) stamps a plausible current timestamp.
#[test]
fn record_miss_uses_current_time() {
    let store = empty_store();
    let before = chrono::Utc::now().timestamp();

    store.record_miss("gadgets").unwrap();

    let after = chrono::Utc::now().timestamp();
    let ledger = store.load().unwrap();
    let latest = ledger["gadgets"].latest;
    assert!(
        (before..=after).contains(&latest),
        "latest {latest} outside [{before}, {after}]"
    );
}

// ---------------------------------------------------------------------------
// Empty state and round-trip
// ---------------------------------------------------------------------------

/// Nothing persisted yet is a valid empty ledger, never an error.
#[test]
fn absent_record_is_empty_ledger() {
    let store = empty_store();
    assert_eq!(store.load().unwrap(), Ledger::new());
}

/// `save(load())` is a no-op on ledger content.
#[test]
fn save_load_round_trip() {
    let store = LedgerBuilder::new()
        .record("blue widgets", 3, 100)
        .record("gadget manual", 5, 50)
        .into_store();

    let loaded = store.load().unwrap();
    store.save(&loaded).unwrap();

    assert_eq!(store.load().unwrap(), loaded);
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// The JSON file store persists across store instances over the same
/// directory, as a restart of the binary would see it.
#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = LedgerStore::new(JsonFileKv::new(dir.path()), RECORD_KEY);
        store.record_miss_at("blue widgets", 100).unwrap();
        store.record_miss_at("blue widgets", 200).unwrap();
    }

    let reopened = LedgerStore::new(JsonFileKv::new(dir.path()), RECORD_KEY);
    let ledger = reopened.load().unwrap();
    assert_record!(ledger, "blue widgets", count = 2, latest = 200);
}

/// A directory that was never written reads as the empty state.
#[test]
fn file_store_fresh_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = LedgerStore::new(JsonFileKv::new(dir.path().join("nested")), RECORD_KEY);
    assert_eq!(store.load().unwrap(), Ledger::new());
}
