//! Optical power budget computation.

use super::loss::{FIBER_LOSS_DB_PER_KM, splitter_loss_db};
use super::types::{DesignParameters, PowerBudgetResult, SplitterTopology};

/// Splice count assumed outside expert mode (2 backbone + 2 drop).
const DEFAULT_SPLICE_COUNT: u32 = 4;
/// Connector count assumed outside expert mode.
const DEFAULT_CONNECTOR_COUNT: u32 = 2;

/// Computes total link loss, received power, and power margin for a design.
///
/// Pure arithmetic over the snapshot: identical inputs always produce
/// identical outputs, and no finite input causes a panic. Transmit power and
/// receiver sensitivity arrive pre-resolved from the selected device records
/// (see [`crate::devices::OltDevice::tx_power_for`]).
///
/// Loss contributions:
/// - fiber: `(backbone + drop) / 1000 km` at [`FIBER_LOSS_DB_PER_KM`]
/// - splitters: level-1 insertion loss, plus level-2 for cascaded topologies
/// - connectors and splices: per-unit losses times the effective counts
/// - safety margin: only applied in expert mode
///
/// Outside expert mode the counts are fixed at 4 splices and 2 connectors
/// and the safety margin is 0, regardless of the values carried in
/// `params`. In expert mode the connector count reuses the
/// `backbone_splices + drop_splices` sum rather than an independent
/// connector count.
///
/// # Returns
///
/// A [`PowerBudgetResult`]; a negative margin signals an unviable design,
/// not an error.
pub fn compute_budget(
    params: &DesignParameters,
    olt_tx_power_dbm: f32,
    ont_rx_sensitivity_dbm: f32,
) -> PowerBudgetResult {
    let total_distance_km =
        (params.backbone_distance_m + params.drop_cable_length_m) as f32 / 1000.0;
    let fiber_loss = total_distance_km * FIBER_LOSS_DB_PER_KM;

    let splitter = &params.splitter;
    let splitter_loss = match splitter.topology {
        SplitterTopology::Centralized => splitter_loss_db(&splitter.level1_ratio),
        SplitterTopology::Cascaded => {
            splitter_loss_db(&splitter.level1_ratio) + splitter_loss_db(&splitter.level2_ratio)
        }
    };

    let total_splices = if params.expert_mode {
        params.backbone_splices + params.drop_splices
    } else {
        DEFAULT_SPLICE_COUNT
    };
    let total_connectors = if params.expert_mode {
        params.backbone_splices + params.drop_splices
    } else {
        DEFAULT_CONNECTOR_COUNT
    };

    let splice_loss_total = total_splices as f32 * params.splice_loss_db;
    let connector_loss_total = total_connectors as f32 * params.connector_loss_db;

    let safety_margin = if params.expert_mode {
        params.safety_margin_db
    } else {
        0.0
    };

    let total_loss =
        fiber_loss + splitter_loss + connector_loss_total + splice_loss_total + safety_margin;
    let received_power = olt_tx_power_dbm - total_loss;
    let power_margin = received_power - ont_rx_sensitivity_dbm;

    PowerBudgetResult {
        total_loss_db: total_loss,
        received_power_dbm: received_power,
        power_margin_db: power_margin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::types::{MarginStatus, SplitterConfig};

    fn baseline_params() -> DesignParameters {
        DesignParameters {
            backbone_distance_m: 500,
            drop_cable_length_m: 50,
            splitter: SplitterConfig {
                topology: SplitterTopology::Centralized,
                level1_ratio: "1:32".to_string(),
                ..SplitterConfig::default()
            },
            expert_mode: false,
            connector_loss_db: 0.5,
            splice_loss_db: 0.1,
            ..DesignParameters::default()
        }
    }

    #[test]
    fn baseline_centralized_design() {
        // fiber 0.55 km * 0.35 = 0.1925; splitter 17.2; connectors 2*0.5;
        // splices 4*0.1 → total 18.7925
        let r = compute_budget(&baseline_params(), 5.0, -28.0);
        assert!((r.total_loss_db - 18.7925).abs() < 1e-4);
        assert!((r.received_power_dbm - (-13.7925)).abs() < 1e-4);
        assert!((r.power_margin_db - 14.2075).abs() < 1e-4);
        assert_eq!(r.margin_status(), MarginStatus::Healthy);
    }

    #[test]
    fn cascaded_sums_both_stage_losses() {
        let mut params = baseline_params();
        params.splitter = SplitterConfig {
            topology: SplitterTopology::Cascaded,
            level1_ratio: "1:8".to_string(),
            level2_ratio: "1:4".to_string(),
        };
        let centralized = compute_budget(&baseline_params(), 5.0, -28.0);
        let cascaded = compute_budget(&params, 5.0, -28.0);
        // 10.5 + 7.5 = 18.0 dB vs 17.2 dB for the 1:32 single stage
        assert!((cascaded.total_loss_db - centralized.total_loss_db - 0.8).abs() < 1e-4);
    }

    #[test]
    fn unknown_ratio_is_treated_as_no_splitter() {
        let mut params = baseline_params();
        params.splitter.level1_ratio = "1:128".to_string();
        let r = compute_budget(&params, 5.0, -28.0);
        assert!((r.total_loss_db - (0.1925 + 1.0 + 0.4)).abs() < 1e-4);
    }

    #[test]
    fn non_expert_ignores_override_fields() {
        let mut params = baseline_params();
        params.safety_margin_db = 99.0;
        params.backbone_splices = 50;
        params.drop_splices = 50;
        let r = compute_budget(&params, 5.0, -28.0);
        let reference = compute_budget(&baseline_params(), 5.0, -28.0);
        assert_eq!(r, reference);
    }

    #[test]
    fn expert_mode_uses_manual_counts_and_margin() {
        let mut params = baseline_params();
        params.expert_mode = true;
        params.backbone_splices = 3;
        params.drop_splices = 1;
        params.safety_margin_db = 2.0;
        let r = compute_budget(&params, 5.0, -28.0);
        // 4 splices * 0.1 + 4 connectors * 0.5 + margin 2.0 + fiber + splitter
        let expected = 0.1925 + 17.2 + 2.0 + 0.4 + 2.0;
        assert!((r.total_loss_db - expected).abs() < 1e-4);
    }

    #[test]
    fn expert_connector_count_mirrors_splice_sum() {
        let mut params = baseline_params();
        params.expert_mode = true;
        params.safety_margin_db = 0.0;
        params.backbone_splices = 2;
        params.drop_splices = 2;
        // Same counts as the defaults for splices, but 4 connectors
        // instead of 2, so the expert result is one connector-loss pair
        // higher.
        let expert = compute_budget(&params, 5.0, -28.0);
        let default = compute_budget(&baseline_params(), 5.0, -28.0);
        assert!(
            (expert.total_loss_db - default.total_loss_db - 2.0 * params.connector_loss_db).abs()
                < 1e-4
        );
    }

    #[test]
    fn negative_margin_is_reported_not_raised() {
        let mut params = baseline_params();
        params.backbone_distance_m = 60_000;
        let r = compute_budget(&params, 5.0, -28.0);
        assert!(r.power_margin_db < 0.0);
        assert_eq!(r.margin_status(), MarginStatus::Critical);
    }

    #[test]
    fn zero_tx_power_fallback_still_computes() {
        // An unmatched SFP degrades to 0 dBm upstream; the arithmetic is
        // unchanged.
        let r = compute_budget(&baseline_params(), 0.0, -28.0);
        assert!((r.received_power_dbm - (-18.7925)).abs() < 1e-4);
    }

    #[test]
    fn identities_hold_exactly() {
        let params = baseline_params();
        let tx = 3.5;
        let rx = -28.0;
        let r = compute_budget(&params, tx, rx);
        assert_eq!(r.received_power_dbm, tx - r.total_loss_db);
        assert_eq!(r.power_margin_db, r.received_power_dbm - rx);
    }

    #[test]
    fn identical_inputs_are_bit_identical() {
        let params = baseline_params();
        let a = compute_budget(&params, 3.5, -28.0);
        let b = compute_budget(&params, 3.5, -28.0);
        assert_eq!(a, b);
    }
}
