//! Ranked view engine — derives ordered views of the ledger and resolves
//! rank-addressed removals.
//!
//! A rank is a transient 1-based position under a [`SortMode`], recomputed
//! from the live ledger on every call. It is a deletion handle, not an
//! identifier: callers hand back ranks from a previously rendered view, and
//! removal maps them onto a freshly recomputed ordering at delete time.
//!
//! Removal always resolves against the date-descending ordering — the same
//! order the admin table renders by default — no matter which sort mode the
//! caller last displayed. See DESIGN.md for why this inherited behavior is
//! kept rather than fixed.

use crate::error::StoreError;
use crate::store::{KvStore, LedgerStore};
use crate::types::{Ledger, MissRecord, SortMode};
use std::cmp::Ordering;
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Sorted view
// ---------------------------------------------------------------------------

/// One row of a ranked view: position, query text, and the record behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// 1-based position under the sort mode the view was computed with.
    pub rank: usize,
    /// The raw query text. Not escaped; output encoding is the renderer's job.
    pub query: String,
    pub record: MissRecord,
}

type Entry<'a> = (&'a String, &'a MissRecord);

// Date and count ties break by query text. The ledger map is rebuilt on
// every load with its own iteration order, so without a total order two
// loads of identical persisted content would render differently.
fn by_latest_desc(a: &Entry<'_>, b: &Entry<'_>) -> Ordering {
    b.1.latest
        .cmp(&a.1.latest)
        .then_with(|| a.0.as_bytes().cmp(b.0.as_bytes()))
}

fn by_count_desc(a: &Entry<'_>, b: &Entry<'_>) -> Ordering {
    b.1.count
        .cmp(&a.1.count)
        .then_with(|| a.0.as_bytes().cmp(b.0.as_bytes()))
}

fn by_query_alpha(a: &Entry<'_>, b: &Entry<'_>) -> Ordering {
    a.0.as_bytes().cmp(b.0.as_bytes())
}

/// Order the ledger under `sort` and assign 1-based ranks.
///
/// Pure function of ledger *content*, recomputed on every call — ranks are
/// never cached or persisted. Ties under `Date` and `Count` break by query
/// text, so two views of equal ledgers are always identical.
pub fn sorted_view(ledger: &Ledger, sort: SortMode) -> Vec<RankedEntry> {
    let mut entries: Vec<Entry<'_>> = ledger.iter().collect();
    let comparator = match sort {
        SortMode::Date => by_latest_desc,
        SortMode::Count => by_count_desc,
        SortMode::Alpha => by_query_alpha,
    };
    entries.sort_by(comparator);
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (query, record))| RankedEntry {
            rank: i + 1,
            query: query.clone(),
            record: *record,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Rank sets
// ---------------------------------------------------------------------------

/// A set of ranks requested for removal, parsed from a single integer or a
/// comma-delimited list.
///
/// Each token is coerced to a non-negative integer; non-numeric or negative
/// tokens coerce to 0, which can never match a row (the minimum valid rank
/// is 1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankSet(HashSet<usize>);

impl RankSet {
    pub fn parse(input: &str) -> Self {
        Self(input.split(',').map(coerce_rank).collect())
    }

    /// Build directly from known ranks (used by tests and the CLI).
    pub fn from_ranks(ranks: impl IntoIterator<Item = usize>) -> Self {
        Self(ranks.into_iter().collect())
    }

    pub fn contains(&self, rank: usize) -> bool {
        self.0.contains(&rank)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn coerce_rank(token: &str) -> usize {
    token
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 0)
        .map(|n| n as usize)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Rank-addressed removal
// ---------------------------------------------------------------------------

/// Delete the records sitting at the requested ranks and persist the result.
///
/// Ranks resolve against a freshly computed date-descending view of the
/// ledger as it is *now*, not as the caller last saw it. Out-of-range ranks
/// (and the never-matching rank 0) are skipped silently; the return value is
/// the number of records actually removed, which may be less than the number
/// of ranks requested.
pub fn remove_by_rank<S: KvStore>(
    store: &LedgerStore<S>,
    ranks: &RankSet,
) -> Result<usize, StoreError> {
    let mut ledger = store.load()?;

    let mut removed = 0;
    for entry in sorted_view(&ledger, SortMode::Date) {
        if ranks.contains(entry.rank) {
            ledger.remove(&entry.query);
            removed += 1;
        }
    }

    store.save(&ledger)?;
    Ok(removed)
}
