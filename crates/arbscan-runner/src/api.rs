//! HTTP query interface over the published snapshot.
//!
//! | Route                         | Answer                                     |
//! |-------------------------------|--------------------------------------------|
//! | `GET /api/prices?exchanges=`  | prices, groups and ranked opportunities    |
//! | `GET /api/sources`            | configured sources and last-cycle status   |
//! | `GET /api/health`             | snapshot sequence and age                  |
//!
//! Every body is wrapped as `{"success": bool, "data": .., "error": ..}`.

use std::sync::Arc;

use arbscan_core::time_util::age_ms;
use arbscan_core::{Exchange, Selection, SourceReport};
use arbscan_engine::{SnapshotPublisher, SpreadParams, query};
use arbscan_feed::registry::SourceRegistry;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Response envelope shared by every route.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(msg.into()) }
    }
}

/// Shared handler state.
#[derive(Clone)]
pub struct ApiState {
    pub publisher: Arc<SnapshotPublisher>,
    pub registry: Arc<SourceRegistry>,
    /// Selection the cycle driver reads before each cycle.
    pub selection: Arc<watch::Sender<Selection>>,
    pub params: SpreadParams,
}

/// Create the API router with all endpoints.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/prices", get(get_prices))
        .route("/api/sources", get(get_sources))
        .route("/api/health", get(get_health))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

/// Bind `listen` and serve until `shutdown` resolves.
pub async fn serve(
    listen: &str,
    state: ApiState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!("query API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_router(state)).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PricesQuery {
    /// Comma-separated exchange ids.
    exchanges: Option<String>,
}

/// GET /api/prices?exchanges=binance,hyperliquid
///
/// A given list narrows this answer and becomes the selection for the
/// following cycles.
async fn get_prices(State(state): State<ApiState>, Query(params): Query<PricesQuery>) -> Response {
    let selection = match params
        .exchanges
        .as_deref()
        .map(|csv| parse_selection(&state.registry, csv))
        .transpose()
    {
        Ok(selection) => selection,
        Err(msg) => {
            return (StatusCode::BAD_REQUEST, Json(ApiResponse::<()>::error(msg))).into_response();
        }
    };

    if let Some(selection) = &selection {
        state.selection.send_if_modified(|current| {
            let changed = current != selection;
            if changed {
                info!("selection changed to [{selection}]");
                *current = selection.clone();
            }
            changed
        });
    }

    let snapshot = state.publisher.current();
    Json(ApiResponse::success(query(&snapshot, selection.as_ref(), &state.params))).into_response()
}

fn parse_selection(registry: &SourceRegistry, csv: &str) -> Result<Selection, String> {
    let selection = Selection::parse_csv(csv).map_err(|e| e.to_string())?;
    registry.resolve(&selection).map_err(|e| e.to_string())?;
    Ok(selection)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub id: Exchange,
    pub name: &'static str,
    pub enabled_by_default: bool,
    /// Part of the selection cycles currently fetch.
    pub selected: bool,
    /// How the source fared in the last published cycle.
    pub last_cycle: Option<SourceReport>,
}

/// GET /api/sources
async fn get_sources(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.publisher.current();
    let selection = state.selection.borrow().clone();
    let sources: Vec<SourceInfo> = state
        .registry
        .descriptors()
        .iter()
        .map(|d| SourceInfo {
            id: d.exchange,
            name: d.exchange.display_name(),
            enabled_by_default: d.enabled,
            selected: selection.contains(d.exchange),
            last_cycle: snapshot.report(d.exchange).cloned(),
        })
        .collect();
    Json(ApiResponse::success(sources))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub sequence: u64,
    pub generated_at_ms: u64,
    /// `None` until the first cycle completes.
    pub age_ms: Option<u64>,
    pub sources_ok: usize,
    pub sources_queried: usize,
}

/// GET /api/health
async fn get_health(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.publisher.current();
    Json(ApiResponse::success(Health {
        sequence: snapshot.sequence,
        generated_at_ms: snapshot.generated_at_ms,
        age_ms: (snapshot.sequence > 0).then(|| age_ms(snapshot.generated_at_ms)),
        sources_ok: snapshot.sources.iter().filter(|r| r.status.is_ok()).count(),
        sources_queried: snapshot.meta.sources_queried,
    }))
}
