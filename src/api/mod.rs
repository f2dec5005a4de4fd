//! REST API over the computed design state.
//!
//! Endpoints:
//! - `GET /devices` — catalog snapshot (OLTs and ONTs)
//! - `GET /budget` — power budget for the active design
//! - `GET /bom` — bill of materials for the active design
//! - `POST /budget` — compute budget and BOM for a posted parameter set

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::budget::bom::BomLine;
use crate::budget::types::{DesignParameters, PowerBudgetResult};
use crate::budget::{compute_budget, generate_bom};
use crate::devices::{CatalogStore, InMemoryCatalog};

/// Immutable application state shared across all request handlers.
///
/// Constructed once from the active design and wrapped in `Arc` — no locks
/// needed since all data is read-only; `POST /budget` computes from the
/// posted body without touching the stored design.
pub struct AppState {
    /// Device catalog snapshot.
    pub catalog: InMemoryCatalog,
    /// Active design parameters.
    pub params: DesignParameters,
    /// Budget computed for the active design.
    pub budget: PowerBudgetResult,
    /// BOM generated for the active design.
    pub bom: Vec<BomLine>,
}

impl AppState {
    /// Resolves the design against the catalog and precomputes budget and
    /// BOM.
    pub fn from_design(catalog: InMemoryCatalog, params: DesignParameters) -> Self {
        let olt = catalog.olt(&params.olt_id);
        let ont = catalog.ont(&params.ont_id);
        let tx = olt.map_or(0.0, |o| o.tx_power_for(&params.sfp_selection));
        let rx = ont.map_or(0.0, |o| o.rx_sensitivity_dbm);
        let budget = compute_budget(&params, tx, rx);
        let bom = generate_bom(&params, olt, ont);
        Self {
            catalog,
            params,
            budget,
            bom,
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/devices", get(handlers::get_devices))
        .route(
            "/budget",
            get(handlers::get_budget).post(handlers::post_budget),
        )
        .route("/bom", get(handlers::get_bom))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
