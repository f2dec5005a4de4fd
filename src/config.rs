//! TOML-based design-scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::budget::types::{DesignParameters, SplitterConfig, SplitterTopology};
use crate::devices::CatalogStore;

/// Top-level design configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`DesignConfig::from_toml_file`] or use
/// [`DesignConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignConfig {
    /// Device and transceiver selection.
    pub devices: DeviceSelection,
    /// Optical distribution network distances and fan-out.
    pub odn: OdnConfig,
    /// Splitter topology and ratios.
    pub splitter: SplitterConfig,
    /// Expert-mode loss overrides.
    pub expert: ExpertConfig,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Device and transceiver selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceSelection {
    /// Catalog id of the OLT.
    pub olt: String,
    /// Catalog id of the ONT.
    pub ont: String,
    /// Name of the OLT transceiver option to install.
    pub sfp: String,
}

impl Default for DeviceSelection {
    fn default() -> Self {
        Self {
            olt: "ltp-8x".to_string(),
            ont: "ntu-rg-5421g-wac".to_string(),
            sfp: "GPON SFP Class B+".to_string(),
        }
    }
}

/// Optical distribution network distances and fan-out.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OdnConfig {
    /// Backbone fiber run per PON port (meters, must be > 0).
    pub backbone_distance_m: u32,
    /// Drop cable run per ONT (meters, must be > 0).
    pub drop_cable_length_m: u32,
    /// ONTs served per active PON port (must be >= 1).
    pub onts_per_pon_port: u32,
}

impl Default for OdnConfig {
    fn default() -> Self {
        Self {
            backbone_distance_m: 500,
            drop_cable_length_m: 50,
            onts_per_pon_port: 32,
        }
    }
}

/// Expert-mode loss overrides.
///
/// Ignored by the calculators unless `enabled` is true; the non-expert
/// path uses fixed counts (4 splices, 2 connectors) and no safety margin.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpertConfig {
    /// Switches on manual override of loss-contributing counts.
    pub enabled: bool,
    /// Safety margin (dB).
    pub safety_margin_db: f32,
    /// Loss per connector (dB).
    pub connector_loss_db: f32,
    /// Loss per fusion splice (dB).
    pub splice_loss_db: f32,
    /// Splice count on the backbone segment.
    pub backbone_splices: u32,
    /// Splice count on the drop segment.
    pub drop_splices: u32,
}

impl Default for ExpertConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            safety_margin_db: 3.0,
            connector_loss_db: 0.5,
            splice_loss_db: 0.1,
            backbone_splices: 2,
            drop_splices: 2,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"odn.backbone_distance_m"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl DesignConfig {
    /// Returns the baseline scenario: an LTP-8X driving a centralized 1:32
    /// tree at 500 m backbone / 50 m drops.
    pub fn baseline() -> Self {
        Self {
            devices: DeviceSelection::default(),
            odn: OdnConfig::default(),
            splitter: SplitterConfig::default(),
            expert: ExpertConfig::default(),
        }
    }

    /// Returns the campus preset: MA4000-PX chassis feeding a 1:8 + 1:4
    /// cascade over a longer backbone.
    pub fn campus_cascaded() -> Self {
        Self {
            devices: DeviceSelection {
                olt: "ma4000-px-16".to_string(),
                ont: "ntu-rg-5420g-wac".to_string(),
                sfp: "GPON SFP Class C+".to_string(),
            },
            odn: OdnConfig {
                backbone_distance_m: 1200,
                drop_cable_length_m: 80,
                ..OdnConfig::default()
            },
            splitter: SplitterConfig {
                topology: SplitterTopology::Cascaded,
                level1_ratio: "1:8".to_string(),
                level2_ratio: "1:4".to_string(),
            },
            expert: ExpertConfig::default(),
        }
    }

    /// Returns the XGS-PON office preset: LTX-8 with expert-mode loss
    /// accounting and a 1:16 centralized split.
    pub fn xgs_office() -> Self {
        Self {
            devices: DeviceSelection {
                olt: "ltx-8".to_string(),
                ont: "ntx-1".to_string(),
                sfp: "XGS-PON SFP+ N1".to_string(),
            },
            odn: OdnConfig {
                backbone_distance_m: 300,
                drop_cable_length_m: 120,
                onts_per_pon_port: 16,
            },
            splitter: SplitterConfig {
                topology: SplitterTopology::Centralized,
                level1_ratio: "1:16".to_string(),
                ..SplitterConfig::default()
            },
            expert: ExpertConfig {
                enabled: true,
                safety_margin_db: 2.0,
                backbone_splices: 3,
                drop_splices: 2,
                ..ExpertConfig::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "campus_cascaded", "xgs_office"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "campus_cascaded" => Ok(Self::campus_cascaded()),
            "xgs_office" => Ok(Self::xgs_office()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "design".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Field-level constraints only; id resolution against a catalog is
    /// checked by [`crate::params::validate`]. Returns an empty vector if
    /// configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.devices.olt.is_empty() {
            errors.push(ConfigError {
                field: "devices.olt".into(),
                message: "must name a catalog device id".into(),
            });
        }
        if self.devices.ont.is_empty() {
            errors.push(ConfigError {
                field: "devices.ont".into(),
                message: "must name a catalog device id".into(),
            });
        }

        let odn = &self.odn;
        if odn.backbone_distance_m == 0 {
            errors.push(ConfigError {
                field: "odn.backbone_distance_m".into(),
                message: "must be > 0".into(),
            });
        }
        if odn.drop_cable_length_m == 0 {
            errors.push(ConfigError {
                field: "odn.drop_cable_length_m".into(),
                message: "must be > 0".into(),
            });
        }
        if odn.onts_per_pon_port == 0 {
            errors.push(ConfigError {
                field: "odn.onts_per_pon_port".into(),
                message: "must be >= 1".into(),
            });
        }

        let splitter = &self.splitter;
        if crate::budget::loss::split_factor(&splitter.level1_ratio) == 0 {
            errors.push(ConfigError {
                field: "splitter.level1_ratio".into(),
                message: format!("\"{}\" is not a 1:N ratio", splitter.level1_ratio),
            });
        }
        if splitter.topology == SplitterTopology::Cascaded
            && crate::budget::loss::split_factor(&splitter.level2_ratio) == 0
        {
            errors.push(ConfigError {
                field: "splitter.level2_ratio".into(),
                message: format!("\"{}\" is not a 1:N ratio", splitter.level2_ratio),
            });
        }
        let total_factor = splitter.total_split_factor();
        if total_factor > 0 && odn.onts_per_pon_port > total_factor {
            errors.push(ConfigError {
                field: "odn.onts_per_pon_port".into(),
                message: format!("must be <= total split factor ({total_factor})"),
            });
        }

        let expert = &self.expert;
        if expert.safety_margin_db < 0.0 {
            errors.push(ConfigError {
                field: "expert.safety_margin_db".into(),
                message: "must be >= 0".into(),
            });
        }
        if expert.connector_loss_db < 0.0 {
            errors.push(ConfigError {
                field: "expert.connector_loss_db".into(),
                message: "must be >= 0".into(),
            });
        }
        if expert.splice_loss_db < 0.0 {
            errors.push(ConfigError {
                field: "expert.splice_loss_db".into(),
                message: "must be >= 0".into(),
            });
        }

        errors
    }

    /// Assembles engine parameters, deriving `pon_ports` from the selected
    /// OLT record.
    ///
    /// A dangling OLT id derives 0 PON ports; [`crate::params::validate`]
    /// reports the dangling reference itself.
    pub fn to_parameters(&self, catalog: &dyn CatalogStore) -> DesignParameters {
        let pon_ports = catalog
            .olt(&self.devices.olt)
            .map_or(0, |olt| olt.pon_ports);

        DesignParameters {
            olt_id: self.devices.olt.clone(),
            ont_id: self.devices.ont.clone(),
            sfp_selection: self.devices.sfp.clone(),
            pon_ports,
            backbone_distance_m: self.odn.backbone_distance_m,
            drop_cable_length_m: self.odn.drop_cable_length_m,
            splitter: self.splitter.clone(),
            onts_per_pon_port: self.odn.onts_per_pon_port,
            expert_mode: self.expert.enabled,
            safety_margin_db: self.expert.safety_margin_db,
            connector_loss_db: self.expert.connector_loss_db,
            splice_loss_db: self.expert.splice_loss_db,
            backbone_splices: self.expert.backbone_splices,
            drop_splices: self.expert.drop_splices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::InMemoryCatalog;

    #[test]
    fn baseline_preset_valid() {
        let cfg = DesignConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn all_presets_are_valid() {
        for name in DesignConfig::PRESETS {
            let cfg = DesignConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn from_preset_unknown() {
        let err = DesignConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[devices]
olt = "ltx-8"
ont = "ntx-1"
sfp = "XGS-PON SFP+ N1"

[odn]
backbone_distance_m = 800
drop_cable_length_m = 60
onts_per_pon_port = 16

[splitter]
topology = "Cascaded"
level1_ratio = "1:4"
level2_ratio = "1:8"

[expert]
enabled = true
safety_margin_db = 1.5
connector_loss_db = 0.4
splice_loss_db = 0.05
backbone_splices = 4
drop_splices = 2
"#;
        let cfg = DesignConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.odn.backbone_distance_m),
            Some(800)
        );
        assert_eq!(
            cfg.as_ref().map(|c| c.splitter.topology),
            Some(SplitterTopology::Cascaded)
        );
        assert_eq!(cfg.as_ref().map(|c| c.expert.enabled), Some(true));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[odn]
backbone_distance_m = 900
"#;
        let cfg = DesignConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        // distance overridden
        assert_eq!(cfg.as_ref().map(|c| c.odn.backbone_distance_m), Some(900));
        // drop length kept default
        assert_eq!(cfg.as_ref().map(|c| c.odn.drop_cable_length_m), Some(50));
        // devices kept default
        assert_eq!(
            cfg.as_ref().map(|c| c.devices.olt.as_str()),
            Some("ltp-8x")
        );
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[odn]
backbone_distance_m = 500
bogus_field = true
"#;
        let result = DesignConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn validation_catches_zero_distance() {
        let mut cfg = DesignConfig::baseline();
        cfg.odn.backbone_distance_m = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "odn.backbone_distance_m"));
    }

    #[test]
    fn validation_catches_bad_ratio() {
        let mut cfg = DesignConfig::baseline();
        cfg.splitter.level1_ratio = "32".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "splitter.level1_ratio"));
    }

    #[test]
    fn validation_catches_oversubscribed_split() {
        let mut cfg = DesignConfig::baseline();
        cfg.odn.onts_per_pon_port = 64;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "odn.onts_per_pon_port"));
    }

    #[test]
    fn validation_catches_negative_loss() {
        let mut cfg = DesignConfig::baseline();
        cfg.expert.splice_loss_db = -0.1;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "expert.splice_loss_db"));
    }

    #[test]
    fn level2_ratio_not_checked_for_centralized() {
        let mut cfg = DesignConfig::baseline();
        cfg.splitter.level2_ratio = "junk".to_string();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn to_parameters_derives_pon_ports() {
        let catalog = InMemoryCatalog::with_defaults();
        let params = DesignConfig::baseline().to_parameters(&catalog);
        assert_eq!(params.pon_ports, 8);
        assert_eq!(params.olt_id, "ltp-8x");
        assert!(!params.expert_mode);
    }

    #[test]
    fn to_parameters_with_dangling_olt_derives_zero_ports() {
        let catalog = InMemoryCatalog::new();
        let params = DesignConfig::baseline().to_parameters(&catalog);
        assert_eq!(params.pon_ports, 0);
    }

    #[test]
    fn campus_preset_resolves_chassis_device() {
        let catalog = InMemoryCatalog::with_defaults();
        let params = DesignConfig::campus_cascaded().to_parameters(&catalog);
        assert_eq!(params.pon_ports, 16);
        assert_eq!(params.splitter.topology, SplitterTopology::Cascaded);
    }
}
