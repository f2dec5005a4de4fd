//! API response types.

use serde::Serialize;

use crate::budget::bom::BomLine;
use crate::budget::types::{DesignParameters, MarginStatus, PowerBudgetResult};
use crate::devices::{OltDevice, OntDevice};

/// Catalog snapshot: every known OLT and ONT record.
#[derive(Debug, Serialize)]
pub struct DevicesResponse {
    pub olts: Vec<OltDevice>,
    pub onts: Vec<OntDevice>,
}

/// Budget for the active design, with the parameters echoed back.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    /// Design parameters the budget was computed from.
    pub parameters: DesignParameters,
    /// Loss, received power, and margin.
    pub budget: PowerBudgetResult,
    /// Margin classification against the display thresholds.
    pub margin_status: MarginStatus,
}

/// Full computation result for a posted parameter set.
#[derive(Debug, Serialize)]
pub struct DesignResponse {
    /// Loss, received power, and margin.
    pub budget: PowerBudgetResult,
    /// Margin classification against the display thresholds.
    pub margin_status: MarginStatus,
    /// Bill of materials; quantities serialize as number or string per
    /// line.
    pub bom: Vec<BomLine>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
