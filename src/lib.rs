//! misslog — Missed Search Log.
//!
//! Tracks site-search queries that returned zero results and exposes a
//! rank-addressable admin view with single and bulk removal. This crate is
//! the outer surface; the ledger store and ranked view engine live in
//! `misslog-core`.
//!
//! # Architecture
//!
//! ```text
//! POST /api/misses ──► LedgerStore ──► sorted_view ──► admin table
//!                           ▲                              │
//!                           └──── remove_by_rank ◄── guarded removal
//! ```
//!
//! The admin handlers are deliberately thin: every precondition branch
//! produces an explicit [`admin::RemoveOutcome`] before the HTTP layer
//! decides to answer it silently.

pub mod admin;
pub mod guard;
pub mod page;
