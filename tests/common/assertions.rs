//! Domain-specific assertion macros for misslog harnesses.
//!
//! These add context-rich failure messages that make it clear *which* ledger
//! invariant was violated, instead of a bare slice comparison.

// ---------------------------------------------------------------------------
// View assertions
// ---------------------------------------------------------------------------

/// Assert that a ranked view contains exactly these queries, in order.
///
/// ```rust
/// assert_view_order!(view, ["C", "A", "B"]);
/// ```
#[macro_export]
macro_rules! assert_view_order {
    ($view:expr, $expected:expr) => {{
        let view: &[misslog_core::RankedEntry] = &$view;
        let got: Vec<&str> = view.iter().map(|e| e.query.as_str()).collect();
        let expected: Vec<&str> = $expected.to_vec();
        if got != expected {
            panic!(
                "assert_view_order! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, got
            );
        }
        for (i, entry) in view.iter().enumerate() {
            if entry.rank != i + 1 {
                panic!(
                    "assert_view_order! failed: entry {:?} at position {} carries rank {} (ranks must be 1-based and sequential)",
                    entry.query, i, entry.rank
                );
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Ledger assertions
// ---------------------------------------------------------------------------

/// Assert that a ledger holds exactly these queries (order-independent).
///
/// ```rust
/// assert_ledger_keys!(store.load().unwrap(), ["A"]);
/// ```
#[macro_export]
macro_rules! assert_ledger_keys {
    ($ledger:expr, $expected:expr) => {{
        let ledger: &misslog_core::Ledger = &$ledger;
        let mut got: Vec<&str> = ledger.keys().map(String::as_str).collect();
        got.sort_unstable();
        let mut expected: Vec<&str> = $expected.to_vec();
        expected.sort_unstable();
        if got != expected {
            panic!(
                "assert_ledger_keys! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, got
            );
        }
    }};
}

/// Assert one record's count and latest timestamp.
#[macro_export]
macro_rules! assert_record {
    ($ledger:expr, $query:expr, count = $count:expr, latest = $latest:expr) => {{
        let ledger: &misslog_core::Ledger = &$ledger;
        let query: &str = $query;
        match ledger.get(query) {
            Some(record) => {
                if record.count != $count || record.latest != $latest {
                    panic!(
                        "assert_record! failed for {:?}:\n  expected: count={} latest={}\n  actual:   count={} latest={}",
                        query, $count, $latest, record.count, record.latest
                    );
                }
            }
            None => panic!(
                "assert_record! failed: no record for {:?}.\n  Present: {:?}",
                query,
                ledger.keys().collect::<Vec<_>>()
            ),
        }
    }};
}
