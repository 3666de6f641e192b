//! Core types for misslog-core — Missed Search Log.
//!
//! This module defines the data structures shared across both components:
//! the per-query [`MissRecord`], the [`Ledger`] mapping, and the [`SortMode`]
//! discriminant used by the ranked view.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cumulative stats for one search query that returned zero results.
///
/// The query text itself is the [`Ledger`] key, not a field here: exactly one
/// record exists per distinct query string (case-sensitive, untrimmed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissRecord {
    /// How many times this query has been searched with no results. Never
    /// below 1; only ever incremented in place.
    pub count: u64,
    /// Unix timestamp (seconds) of the most recent miss.
    pub latest: i64,
}

impl MissRecord {
    /// A fresh record for a query seen for the first time at `ts`.
    pub fn first_seen(ts: i64) -> Self {
        Self { count: 1, latest: ts }
    }

    /// Register one more miss at `ts`.
    pub fn touch(&mut self, ts: i64) {
        self.count += 1;
        self.latest = ts;
    }
}

/// The full missed-query record set, keyed by exact query text.
///
/// Order is a presentation-time derivative (see [`crate::view::sorted_view`])
/// and is never persisted.
pub type Ledger = HashMap<String, MissRecord>;

/// Sort order for the ranked view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Most recent miss first. This is the canonical default and the order
    /// rank-addressed removal always resolves against.
    #[default]
    Date,
    /// Highest cumulative count first.
    Count,
    /// Byte-wise ascending on query text.
    Alpha,
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortMode::Date => write!(f, "date"),
            SortMode::Count => write!(f, "count"),
            SortMode::Alpha => write!(f, "alpha"),
        }
    }
}

/// Error returned when parsing an unrecognised sort mode string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode {0:?} (expected \"date\", \"count\", or \"alpha\")")]
pub struct ParseSortModeError(pub String);

impl std::str::FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortMode::Date),
            "count" => Ok(SortMode::Count),
            "alpha" => Ok(SortMode::Alpha),
            other => Err(ParseSortModeError(other.to_string())),
        }
    }
}
