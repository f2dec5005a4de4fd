//! Parameter updates and the derived-field cascade.
//!
//! Every editable design field has its own [`ParamUpdate`] variant, and
//! [`apply`] encodes the transition rules that keep derived fields
//! consistent: selecting an OLT re-derives the PON port count and
//! transceiver choice, and ratio changes clamp the per-port ONT count.
//! Technology compatibility between OLT and ONT is enforced here, never
//! inside the calculators.

use crate::budget::types::{DesignParameters, SplitterTopology};
use crate::config::ConfigError;
use crate::devices::CatalogStore;

/// A single-field design change.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamUpdate {
    SelectOlt(String),
    SelectOnt(String),
    SelectSfp(String),
    SetBackboneDistance(u32),
    SetDropCableLength(u32),
    SetTopology(SplitterTopology),
    SetLevel1Ratio(String),
    SetLevel2Ratio(String),
    SetOntsPerPonPort(u32),
    SetExpertMode(bool),
    SetSafetyMargin(f32),
    SetConnectorLoss(f32),
    SetSpliceLoss(f32),
    SetBackboneSplices(u32),
    SetDropSplices(u32),
}

/// Applies one update to the parameter set, running the derived-field
/// cascade against the catalog.
///
/// Cascade rules:
/// - `SelectOlt` stores the id unconditionally; when the record resolves,
///   `pon_ports` is re-derived, `sfp_selection` resets to the record's
///   first transceiver option, and an ONT of the wrong technology is
///   replaced by the first compatible catalog ONT (cleared if none
///   exists).
/// - `SelectOnt` is ignored when the ONT's technology conflicts with the
///   resolved OLT.
/// - Topology and ratio changes clamp `onts_per_pon_port` down to the new
///   total split factor (when that factor is non-zero).
pub fn apply(params: &mut DesignParameters, update: ParamUpdate, catalog: &dyn CatalogStore) {
    match update {
        ParamUpdate::SelectOlt(id) => {
            params.olt_id = id;
            if let Some(olt) = catalog.olt(&params.olt_id) {
                params.pon_ports = olt.pon_ports;
                params.sfp_selection = olt
                    .sfp_options
                    .first()
                    .map_or_else(String::new, |opt| opt.name.clone());

                let ont_compatible = catalog
                    .ont(&params.ont_id)
                    .is_some_and(|ont| ont.technology == olt.technology);
                if !ont_compatible {
                    params.ont_id = catalog
                        .onts()
                        .iter()
                        .find(|ont| ont.technology == olt.technology)
                        .map_or_else(String::new, |ont| ont.id.clone());
                }
            }
        }
        ParamUpdate::SelectOnt(id) => {
            let conflict = match (catalog.olt(&params.olt_id), catalog.ont(&id)) {
                (Some(olt), Some(ont)) => olt.technology != ont.technology,
                _ => false,
            };
            if !conflict {
                params.ont_id = id;
            }
        }
        ParamUpdate::SelectSfp(name) => params.sfp_selection = name,
        ParamUpdate::SetBackboneDistance(m) => params.backbone_distance_m = m,
        ParamUpdate::SetDropCableLength(m) => params.drop_cable_length_m = m,
        ParamUpdate::SetTopology(topology) => {
            params.splitter.topology = topology;
            clamp_onts_to_split(params);
        }
        ParamUpdate::SetLevel1Ratio(ratio) => {
            params.splitter.level1_ratio = ratio;
            clamp_onts_to_split(params);
        }
        ParamUpdate::SetLevel2Ratio(ratio) => {
            params.splitter.level2_ratio = ratio;
            clamp_onts_to_split(params);
        }
        ParamUpdate::SetOntsPerPonPort(n) => {
            params.onts_per_pon_port = n;
            clamp_onts_to_split(params);
        }
        ParamUpdate::SetExpertMode(on) => params.expert_mode = on,
        ParamUpdate::SetSafetyMargin(db) => params.safety_margin_db = db,
        ParamUpdate::SetConnectorLoss(db) => params.connector_loss_db = db,
        ParamUpdate::SetSpliceLoss(db) => params.splice_loss_db = db,
        ParamUpdate::SetBackboneSplices(n) => params.backbone_splices = n,
        ParamUpdate::SetDropSplices(n) => params.drop_splices = n,
    }
}

/// Clamps `onts_per_pon_port` to the total split factor. A zero factor
/// (malformed ratio) clamps nothing; the calculators handle that case on
/// their own.
fn clamp_onts_to_split(params: &mut DesignParameters) {
    let factor = params.splitter.total_split_factor();
    if factor > 0 && params.onts_per_pon_port > factor {
        params.onts_per_pon_port = factor;
    }
}

/// Checks a parameter set against the catalog and returns a list of
/// advisory errors.
///
/// The calculators stay garbage-in/garbage-out; this is the
/// assembly-layer check a front end runs before presenting results.
pub fn validate(params: &DesignParameters, catalog: &dyn CatalogStore) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    let olt = catalog.olt(&params.olt_id);
    let ont = catalog.ont(&params.ont_id);

    if olt.is_none() {
        errors.push(ConfigError {
            field: "olt_id".into(),
            message: format!("\"{}\" is not in the catalog", params.olt_id),
        });
    }
    if ont.is_none() {
        errors.push(ConfigError {
            field: "ont_id".into(),
            message: format!("\"{}\" is not in the catalog", params.ont_id),
        });
    }

    if let Some(olt) = olt {
        if !olt
            .sfp_options
            .iter()
            .any(|opt| opt.name == params.sfp_selection)
        {
            errors.push(ConfigError {
                field: "sfp_selection".into(),
                message: format!(
                    "\"{}\" is not offered by {}; transmit power degrades to 0 dBm",
                    params.sfp_selection, olt.model
                ),
            });
        }
        if params.pon_ports > olt.pon_ports {
            errors.push(ConfigError {
                field: "pon_ports".into(),
                message: format!(
                    "{} exceeds the {} ports on {}",
                    params.pon_ports, olt.pon_ports, olt.model
                ),
            });
        }
    }

    if let (Some(olt), Some(ont)) = (olt, ont)
        && olt.technology != ont.technology
    {
        errors.push(ConfigError {
            field: "ont_id".into(),
            message: format!("{} cannot terminate a {} OLT", ont.model, olt.technology),
        });
    }

    if params.onts_per_pon_port == 0 {
        errors.push(ConfigError {
            field: "onts_per_pon_port".into(),
            message: "must be >= 1".into(),
        });
    }
    let factor = params.splitter.total_split_factor();
    if factor > 0 && params.onts_per_pon_port > factor {
        errors.push(ConfigError {
            field: "onts_per_pon_port".into(),
            message: format!("must be <= total split factor ({factor})"),
        });
    }

    errors
}
