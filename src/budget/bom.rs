//! Bill-of-materials generation from a design snapshot.

use std::fmt;

use serde::Serialize;

use super::types::{DesignParameters, SplitterTopology};
use crate::budget::loss::split_factor;
use crate::devices::{OltDevice, OntDevice};

/// Quantity column of a BOM line.
///
/// The BOM is a heterogeneous list by contract: hardware lines carry unit
/// counts while the fiber line carries a pre-formatted length string
/// (`"16.80 km"`). Serializes untagged, so JSON output is a number or a
/// string per line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BomQuantity {
    /// Orderable unit count.
    Count(u32),
    /// Formatted cable length, kilometers with two decimals.
    Length(String),
}

impl fmt::Display for BomQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BomQuantity::Count(n) => write!(f, "{n}"),
            BomQuantity::Length(s) => f.write_str(s),
        }
    }
}

/// One procurement line: item name and quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomLine {
    pub name: String,
    pub quantity: BomQuantity,
}

impl BomLine {
    fn count(name: String, quantity: u32) -> Self {
        Self {
            name,
            quantity: BomQuantity::Count(quantity),
        }
    }
}

/// Generates the itemized equipment list for a design.
///
/// Line order is part of the contract, in presentation order:
///
/// 1. OLT chassis components (or a single model-named line for whole-unit
///    OLTs with no separately orderable parts)
/// 2. PON SFP modules, one per active PON port
/// 3. uplink modules, one line per declared port group
/// 4. splitters (one line centralized, two lines cascaded)
/// 5. ONTs
/// 6. fiber cable, total length over backbone runs per PON port plus one
///    drop per ONT
///
/// A missing device selection yields an empty list; prompting for a
/// selection is the caller's concern. A zero combined split factor yields
/// no splitter lines rather than a division by zero.
pub fn generate_bom(
    params: &DesignParameters,
    olt: Option<&OltDevice>,
    ont: Option<&OntDevice>,
) -> Vec<BomLine> {
    let (Some(olt), Some(ont)) = (olt, ont) else {
        return Vec::new();
    };

    let total_onts = params.total_onts();
    let total_fiber_m = params.backbone_distance_m as u64 * params.pon_ports as u64
        + params.drop_cable_length_m as u64 * total_onts as u64;

    let mut lines = Vec::new();

    if olt.components.is_empty() {
        lines.push(BomLine::count(olt.model.clone(), 1));
    } else {
        for part in &olt.components {
            lines.push(BomLine::count(part.name.clone(), part.quantity));
        }
    }

    lines.push(BomLine::count(
        format!("PON SFP Module: {}", params.sfp_selection),
        params.pon_ports,
    ));

    for port in &olt.uplink_ports {
        lines.push(BomLine::count(
            format!("Uplink Module: {}", port.port_type),
            port.count,
        ));
    }

    lines.extend(splitter_lines(params, total_onts));

    lines.push(BomLine::count(format!("ONT: {}", ont.model), total_onts));

    lines.push(BomLine {
        name: "Singlemode OS2 Fiber Cable".to_string(),
        quantity: BomQuantity::Length(format!("{:.2} km", total_fiber_m as f32 / 1000.0)),
    });

    lines
}

/// Splitter quantities for the configured topology.
///
/// Centralized: enough level-1 splitters to feed every ONT. Cascaded: the
/// level-2 stage fans out of every level-1 leg, so its count is
/// `level1_count * level1_factor`.
fn splitter_lines(params: &DesignParameters, total_onts: u32) -> Vec<BomLine> {
    let splitter = &params.splitter;
    match splitter.topology {
        SplitterTopology::Centralized => {
            let factor = split_factor(&splitter.level1_ratio);
            if factor == 0 {
                return Vec::new();
            }
            vec![BomLine::count(
                format!("PLC Splitter {}", splitter.level1_ratio),
                total_onts.div_ceil(factor),
            )]
        }
        SplitterTopology::Cascaded => {
            let l1 = split_factor(&splitter.level1_ratio);
            let l2 = split_factor(&splitter.level2_ratio);
            let combined = l1 * l2;
            if combined == 0 {
                return Vec::new();
            }
            let l1_count = total_onts.div_ceil(combined);
            vec![
                BomLine::count(
                    format!("PLC Splitter {} (L1)", splitter.level1_ratio),
                    l1_count,
                ),
                BomLine::count(
                    format!("PLC Splitter {} (L2)", splitter.level2_ratio),
                    l1_count * l1,
                ),
            ]
        }
    }
}
