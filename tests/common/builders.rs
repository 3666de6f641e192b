//! Test builders — ergonomic constructors for ledgers and stores.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on store failures rather than returning
//! `Result`.

use misslog_core::{Ledger, LedgerStore, MemoryKv, MissRecord};

/// Record key every harness store uses.
pub const RECORD_KEY: &str = "missed_searches";

// ---------------------------------------------------------------------------
// LedgerBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Ledger`] fixtures.
///
/// # Example
///
/// ```rust
/// let store = LedgerBuilder::new()
///     .record("blue widgets", 3, 100)
///     .record("gadget manual", 5, 50)
///     .into_store();
/// ```
#[derive(Default)]
pub struct LedgerBuilder {
    ledger: Ledger,
}

impl LedgerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(mut self, query: &str, count: u64, latest: i64) -> Self {
        self.ledger
            .insert(query.to_string(), MissRecord { count, latest });
        self
    }

    pub fn build(self) -> Ledger {
        self.ledger
    }

    /// Persist the ledger into a fresh in-memory store.
    pub fn into_store(self) -> LedgerStore<MemoryKv> {
        let store = empty_store();
        store.save(&self.ledger).expect("memory store save cannot fail");
        store
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A store with no ledger persisted yet.
pub fn empty_store() -> LedgerStore<MemoryKv> {
    LedgerStore::new(MemoryKv::default(), RECORD_KEY)
}

/// The three-record fixture used across the sort and removal tests:
/// A count=3 latest=100, B count=5 latest=50, C count=1 latest=200.
///
/// Date order is [C, A, B], count order [B, A, C], alpha order [A, B, C].
pub fn abc_ledger() -> Ledger {
    LedgerBuilder::new()
        .record("A", 3, 100)
        .record("B", 5, 50)
        .record("C", 1, 200)
        .build()
}

/// [`abc_ledger`] persisted into an in-memory store.
pub fn abc_store() -> LedgerStore<MemoryKv> {
    LedgerBuilder::new()
        .record("A", 3, 100)
        .record("B", 5, 50)
        .record("C", 1, 200)
        .into_store()
}
