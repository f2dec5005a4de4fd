//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{BudgetResponse, DesignResponse, DevicesResponse, ErrorResponse};
use crate::budget::types::DesignParameters;
use crate::budget::{compute_budget, generate_bom};
use crate::devices::CatalogStore;

/// Returns the full device catalog.
///
/// `GET /devices` → 200 + `DevicesResponse` JSON
pub async fn get_devices(State(state): State<Arc<AppState>>) -> Json<DevicesResponse> {
    Json(DevicesResponse {
        olts: state.catalog.olts().to_vec(),
        onts: state.catalog.onts().to_vec(),
    })
}

/// Returns the precomputed budget for the active design.
///
/// `GET /budget` → 200 + `BudgetResponse` JSON
pub async fn get_budget(State(state): State<Arc<AppState>>) -> Json<BudgetResponse> {
    Json(BudgetResponse {
        parameters: state.params.clone(),
        budget: state.budget,
        margin_status: state.budget.margin_status(),
    })
}

/// Returns the precomputed BOM for the active design.
///
/// `GET /bom` → 200 + `Vec<BomLine>` JSON
pub async fn get_bom(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.bom.clone())
}

/// Computes budget and BOM for a posted parameter set.
///
/// `POST /budget` → 200 + `DesignResponse` JSON
/// Unresolvable device ids → 400 + `ErrorResponse`
pub async fn post_budget(
    State(state): State<Arc<AppState>>,
    Json(params): Json<DesignParameters>,
) -> impl IntoResponse {
    let olt = state.catalog.olt(&params.olt_id);
    let ont = state.catalog.ont(&params.ont_id);

    let (Some(olt), Some(ont)) = (olt, ont) else {
        let missing = if olt.is_none() {
            &params.olt_id
        } else {
            &params.ont_id
        };
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("device \"{missing}\" is not in the catalog"),
            }),
        ));
    };

    let budget = compute_budget(
        &params,
        olt.tx_power_for(&params.sfp_selection),
        ont.rx_sensitivity_dbm,
    );
    let bom = generate_bom(&params, Some(olt), Some(ont));

    Ok(Json(DesignResponse {
        budget,
        margin_status: budget.margin_status(),
        bom,
    }))
}
