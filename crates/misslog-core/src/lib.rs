//! misslog-core — Missed Search Log core library.
//!
//! This crate holds the two components that do the real work, plus the
//! shared types used across both:
//!
//! # Architecture
//!
//! ```text
//! miss event ──► LedgerStore ──► RankedView ──► admin surface
//!                     ▲               │
//!                     └── remove ◄────┘
//! ```
//!
//! The [`store::LedgerStore`] persists the entire ledger as one record in an
//! opaque key-value collaborator; the view engine in [`view`] derives ranked
//! orderings from it on demand and resolves rank-addressed removals. Ranks
//! are never persisted — they are recomputed from the current sort order on
//! every call.

pub mod config;
pub mod error;
pub mod store;
pub mod types;
pub mod view;

pub use error::StoreError;
pub use store::{JsonFileKv, KvStore, LedgerStore, MemoryKv};
pub use types::{Ledger, MissRecord, SortMode};
pub use view::{remove_by_rank, sorted_view, RankSet, RankedEntry};
