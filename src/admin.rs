//! Admin / intake HTTP surface.
//!
//! Three routes: miss intake, the ranked ledger view, and guarded
//! rank-addressed removal. Removal preconditions are resolved by
//! [`resolve_removal`] into an explicit [`RemoveOutcome`] so the policy is
//! testable without HTTP; the handlers then preserve the inherited UX of
//! answering rejected requests with a silent redirect back to the view.
//!
//! Store access is synchronous filesystem I/O, so every handler runs it
//! under `spawn_blocking` instead of on the async workers.

use crate::guard::{Capability, Nonce};
use crate::page;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use misslog_core::{remove_by_rank, sorted_view, KvStore, LedgerStore, RankSet, SortMode, StoreError};
use serde::Deserialize;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// State and router
// ---------------------------------------------------------------------------

/// Everything the handlers need, shared across requests. The ledger itself
/// is never cached here — every operation loads it fresh from the store.
pub struct AdminState<S> {
    pub store: LedgerStore<S>,
    pub capability: Capability,
    pub nonce: Nonce,
    pub default_sort: SortMode,
}

pub fn router<S: KvStore + 'static>(state: Arc<AdminState<S>>) -> Router {
    Router::new()
        .route("/api/misses", post(record_miss::<S>))
        .route("/tools/missed-searches", get(show_ledger::<S>))
        .route("/tools/missed-searches/remove", get(remove_ranks::<S>))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Miss intake
// ---------------------------------------------------------------------------

/// Body of the "search executed with zero results" event.
#[derive(Debug, Deserialize)]
pub struct MissBody {
    pub query: String,
}

async fn record_miss<S: KvStore + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Json(body): Json<MissBody>,
) -> StatusCode {
    let result = tokio::task::spawn_blocking({
        let state = Arc::clone(&state);
        move || state.store.record_miss(&body.query)
    })
    .await;

    match result {
        Ok(Ok(())) => StatusCode::NO_CONTENT,
        Ok(Err(err)) => {
            tracing::error!(%err, "failed to record missed search");
            StatusCode::INTERNAL_SERVER_ERROR
        }
        Err(err) => {
            tracing::error!(%err, "store task failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger view
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    pub sort: Option<String>,
    pub removed: Option<u64>,
}

async fn show_ledger<S: KvStore + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Query(params): Query<ViewParams>,
) -> Result<Html<String>, StatusCode> {
    let sort = params
        .sort
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(state.default_sort);

    let ledger = tokio::task::spawn_blocking({
        let state = Arc::clone(&state);
        move || state.store.load()
    })
    .await
    .map_err(|err| {
        tracing::error!(%err, "store task failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .map_err(|err| {
        tracing::error!(%err, "failed to load ledger for rendering");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let view = sorted_view(&ledger, sort);
    Ok(Html(page::render(&view, params.removed, state.nonce.token())))
}

// ---------------------------------------------------------------------------
// Guarded removal
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct RemoveParams {
    /// Single rank or comma-delimited ranks, as rendered into removal links.
    pub ranks: Option<String>,
    pub nonce: Option<String>,
    pub capability: Option<String>,
}

/// What a removal request resolved to, before the HTTP layer decides how
/// (or whether) to surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Preconditions held; this many records were actually removed.
    Applied(usize),
    /// A precondition failed; the ledger was not touched.
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingRanks,
    Unauthorized,
    InvalidNonce,
}

/// Check the removal preconditions in order and apply the removal if they
/// all hold. Precondition failures are outcomes, not errors; only store
/// failures surface as `Err`.
pub fn resolve_removal<S: KvStore>(
    store: &LedgerStore<S>,
    capability: &Capability,
    nonce: &Nonce,
    params: &RemoveParams,
) -> Result<RemoveOutcome, StoreError> {
    let Some(raw_ranks) = params.ranks.as_deref().filter(|s| !s.trim().is_empty()) else {
        return Ok(RemoveOutcome::Rejected(RejectReason::MissingRanks));
    };
    if !capability.allows(params.capability.as_deref()) {
        return Ok(RemoveOutcome::Rejected(RejectReason::Unauthorized));
    }
    if !nonce.verify(params.nonce.as_deref()) {
        return Ok(RemoveOutcome::Rejected(RejectReason::InvalidNonce));
    }

    let removed = remove_by_rank(store, &RankSet::parse(raw_ranks))?;
    Ok(RemoveOutcome::Applied(removed))
}

async fn remove_ranks<S: KvStore + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Query(params): Query<RemoveParams>,
) -> Response {
    let result = tokio::task::spawn_blocking({
        let state = Arc::clone(&state);
        move || resolve_removal(&state.store, &state.capability, &state.nonce, &params)
    })
    .await;

    match result {
        Err(err) => {
            tracing::error!(%err, "store task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Ok(Ok(RemoveOutcome::Applied(removed))) => {
            tracing::info!(removed, "removed missed-search records by rank");
            Redirect::to(&format!("/tools/missed-searches?removed={removed}")).into_response()
        }
        Ok(Ok(RemoveOutcome::Rejected(reason))) => {
            // Inherited UX: rejected requests look identical to skipped ones
            // from the outside. The reason is only visible in the logs.
            tracing::debug!(?reason, "missed-search removal rejected");
            Redirect::to("/tools/missed-searches").into_response()
        }
        Ok(Err(err)) => {
            tracing::error!(%err, "missed-search removal failed against the store");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
