//! Shared test utilities for misslog integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. All helpers are deterministic: timestamps are fixed
//! integers, never wall-clock reads.

pub mod assertions;
pub mod builders;

pub use builders::*;
