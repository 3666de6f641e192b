//! Request guards for the admin surface.
//!
//! Authorization and anti-replay tokens are external collaborators in a real
//! deployment; these are thin stand-ins so the removal preconditions stay
//! testable. [`Nonce`] is a per-process token scoped to one action name, not
//! a cryptographic CSRF scheme.

use std::hash::{Hash, Hasher};

/// Action name the removal nonce is scoped to.
pub const REMOVE_ACTION: &str = "missed-search-remove";

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// Whether a caller may remove ledger records.
#[derive(Debug, Clone)]
pub enum Capability {
    /// Every caller is authorized (default for local deployments, where the
    /// real check lives in front of this service).
    AllowAll,
    /// Caller must present this bearer token.
    Bearer(String),
}

impl Capability {
    /// An empty configured token means allow-all.
    pub fn from_token(token: &str) -> Self {
        if token.is_empty() {
            Capability::AllowAll
        } else {
            Capability::Bearer(token.to_string())
        }
    }

    pub fn allows(&self, presented: Option<&str>) -> bool {
        match self {
            Capability::AllowAll => true,
            Capability::Bearer(token) => presented == Some(token.as_str()),
        }
    }
}

// ---------------------------------------------------------------------------
// Nonce
// ---------------------------------------------------------------------------

/// Per-process anti-replay token for one named action.
///
/// Issued once at startup, rendered into every removal link, and required on
/// every removal request. Restarting the process invalidates outstanding
/// links, which is acceptable for an admin tool.
#[derive(Debug, Clone)]
pub struct Nonce {
    token: String,
}

impl Nonce {
    pub fn issue(action: &str) -> Self {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        action.hash(&mut hasher);
        std::process::id().hash(&mut hasher);
        if let Ok(elapsed) = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
            elapsed.as_nanos().hash(&mut hasher);
        }
        Self {
            token: format!("{:016x}", hasher.finish()),
        }
    }

    /// The token to embed in removal links.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn verify(&self, presented: Option<&str>) -> bool {
        presented == Some(self.token.as_str())
    }
}
