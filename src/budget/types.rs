//! Core budget types: design parameters, splitter configuration, and results.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::loss::split_factor;

/// Margin below which a viable design is reported as marginal (dB).
///
/// Design policy, not a physical law: links with less than 3 dB of headroom
/// work but leave no allowance for aging, repairs, or dirty connectors.
pub const MARGIN_WARN_DB: f32 = 3.0;

/// Splitter placement topology for the optical distribution network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitterTopology {
    /// Single splitter stage close to the OLT.
    Centralized,
    /// Two splitter stages: a level-1 splitter feeding level-2 splitters.
    Cascaded,
}

/// Splitter stage configuration.
///
/// Ratios are `"1:N"` strings; `level2_ratio` is only meaningful for the
/// [`SplitterTopology::Cascaded`] topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitterConfig {
    /// Placement topology.
    pub topology: SplitterTopology,
    /// Level-1 split ratio (e.g. `"1:32"`).
    pub level1_ratio: String,
    /// Level-2 split ratio, cascaded topology only.
    pub level2_ratio: String,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            topology: SplitterTopology::Centralized,
            level1_ratio: "1:32".to_string(),
            level2_ratio: "1:4".to_string(),
        }
    }
}

impl SplitterConfig {
    /// Total downstream fan-out of the configured splitter stages.
    ///
    /// Centralized: the level-1 factor. Cascaded: level-1 × level-2.
    /// Malformed ratios parse to 0, so the result can be 0; callers must
    /// not divide by it.
    pub fn total_split_factor(&self) -> u32 {
        match self.topology {
            SplitterTopology::Centralized => split_factor(&self.level1_ratio),
            SplitterTopology::Cascaded => {
                split_factor(&self.level1_ratio) * split_factor(&self.level2_ratio)
            }
        }
    }
}

/// Complete set of design inputs for one budget/BOM computation.
///
/// A value object: both calculators consume an immutable snapshot of this
/// struct and the resolved device records. Device resolution (id → record)
/// happens upstream in the catalog layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignParameters {
    /// Selected OLT device id.
    pub olt_id: String,
    /// Selected ONT device id.
    pub ont_id: String,
    /// Name of the chosen OLT transceiver; determines transmit power.
    pub sfp_selection: String,
    /// Active PON ports in use, derived from the OLT record.
    pub pon_ports: u32,
    /// Backbone fiber run per PON port (meters).
    pub backbone_distance_m: u32,
    /// Drop cable run per ONT (meters).
    pub drop_cable_length_m: u32,
    /// Splitter topology and ratios.
    pub splitter: SplitterConfig,
    /// ONTs served per active PON port.
    pub onts_per_pon_port: u32,
    /// Manual override of loss-contributing counts and safety margin.
    pub expert_mode: bool,
    /// Safety margin (dB), applied only in expert mode.
    pub safety_margin_db: f32,
    /// Loss per connector (dB).
    pub connector_loss_db: f32,
    /// Loss per fusion splice (dB).
    pub splice_loss_db: f32,
    /// Backbone splice count, expert mode only.
    pub backbone_splices: u32,
    /// Drop splice count, expert mode only.
    pub drop_splices: u32,
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self {
            olt_id: String::new(),
            ont_id: String::new(),
            sfp_selection: String::new(),
            pon_ports: 8,
            backbone_distance_m: 500,
            drop_cable_length_m: 50,
            splitter: SplitterConfig::default(),
            onts_per_pon_port: 32,
            expert_mode: false,
            safety_margin_db: 3.0,
            connector_loss_db: 0.5,
            splice_loss_db: 0.1,
            backbone_splices: 2,
            drop_splices: 2,
        }
    }
}

impl DesignParameters {
    /// Total number of ONTs across all active PON ports.
    pub fn total_onts(&self) -> u32 {
        self.pon_ports * self.onts_per_pon_port
    }
}

/// Health classification of a computed power margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarginStatus {
    /// Negative margin: the design is not viable as configured.
    Critical,
    /// Viable, but under [`MARGIN_WARN_DB`] of headroom.
    Marginal,
    /// At least [`MARGIN_WARN_DB`] of headroom.
    Healthy,
}

impl fmt::Display for MarginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarginStatus::Critical => "CRITICAL",
            MarginStatus::Marginal => "MARGINAL",
            MarginStatus::Healthy => "HEALTHY",
        };
        f.write_str(s)
    }
}

/// Output of the power budget calculation.
///
/// Holds the exact identities `received_power = tx_power - total_loss` and
/// `power_margin = received_power - rx_sensitivity`. A negative margin is a
/// valid result, not an error: it is how an unviable design is reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerBudgetResult {
    /// Sum of all loss contributions on the link (dB).
    pub total_loss_db: f32,
    /// Estimated optical power at the ONT receiver (dBm).
    pub received_power_dbm: f32,
    /// Headroom above the ONT receiver sensitivity (dB).
    pub power_margin_db: f32,
}

impl PowerBudgetResult {
    /// Classifies the margin against the display thresholds.
    pub fn margin_status(&self) -> MarginStatus {
        if self.power_margin_db < 0.0 {
            MarginStatus::Critical
        } else if self.power_margin_db < MARGIN_WARN_DB {
            MarginStatus::Marginal
        } else {
            MarginStatus::Healthy
        }
    }
}

impl fmt::Display for PowerBudgetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Power Budget ---")?;
        writeln!(f, "Total loss:       {:.2} dB", self.total_loss_db)?;
        writeln!(f, "Power at ONT:     {:.2} dBm", self.received_power_dbm)?;
        write!(
            f,
            "Power margin:     {:.2} dB [{}]",
            self.power_margin_db,
            self.margin_status()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centralized_factor_uses_level1_only() {
        let cfg = SplitterConfig {
            topology: SplitterTopology::Centralized,
            level1_ratio: "1:32".to_string(),
            level2_ratio: "1:8".to_string(),
        };
        assert_eq!(cfg.total_split_factor(), 32);
    }

    #[test]
    fn cascaded_factor_multiplies_stages() {
        let cfg = SplitterConfig {
            topology: SplitterTopology::Cascaded,
            level1_ratio: "1:8".to_string(),
            level2_ratio: "1:4".to_string(),
        };
        assert_eq!(cfg.total_split_factor(), 32);
    }

    #[test]
    fn malformed_ratio_gives_zero_factor() {
        let cfg = SplitterConfig {
            topology: SplitterTopology::Cascaded,
            level1_ratio: "bogus".to_string(),
            level2_ratio: "1:4".to_string(),
        };
        assert_eq!(cfg.total_split_factor(), 0);
    }

    #[test]
    fn total_onts_is_ports_times_onts_per_port() {
        let params = DesignParameters {
            pon_ports: 8,
            onts_per_pon_port: 32,
            ..DesignParameters::default()
        };
        assert_eq!(params.total_onts(), 256);
    }

    #[test]
    fn margin_status_thresholds() {
        let mk = |margin| PowerBudgetResult {
            total_loss_db: 0.0,
            received_power_dbm: 0.0,
            power_margin_db: margin,
        };
        assert_eq!(mk(-0.01).margin_status(), MarginStatus::Critical);
        assert_eq!(mk(0.0).margin_status(), MarginStatus::Marginal);
        assert_eq!(mk(2.99).margin_status(), MarginStatus::Marginal);
        assert_eq!(mk(3.0).margin_status(), MarginStatus::Healthy);
        assert_eq!(mk(14.2).margin_status(), MarginStatus::Healthy);
    }

    #[test]
    fn display_does_not_panic() {
        let r = PowerBudgetResult {
            total_loss_db: 18.79,
            received_power_dbm: -13.79,
            power_margin_db: 14.21,
        };
        let s = format!("{r}");
        assert!(s.contains("HEALTHY"));
    }
}
