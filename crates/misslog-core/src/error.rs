//! Error taxonomy for the ledger store.
//!
//! Store failures are fatal to the operation that hit them: no retries, no
//! partial writes. Precondition failures (missing ranks, bad tokens) are not
//! errors — they are modelled as explicit rejected outcomes at the admin
//! layer, not here.

/// Failure while loading or saving the ledger record.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing key-value store could not be reached or read/written.
    #[error("store unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    /// The ledger could not be serialized for persistence.
    #[error("failed to serialize ledger: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A persisted ledger record exists but could not be decoded.
    #[error("failed to decode ledger record {key:?}: {source}")]
    Deserialize {
        /// The store key the corrupt record lives under.
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
