//! Device catalog record types for OLT and ONT hardware.
//!
//! Records are immutable snapshots from the calculators' point of view:
//! the budget engine reads them, never mutates them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// PON generation a device speaks. OLT and ONT must match to interoperate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PonTechnology {
    #[serde(rename = "GPON")]
    Gpon,
    #[serde(rename = "XGS-PON")]
    XgsPon,
}

impl fmt::Display for PonTechnology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PonTechnology::Gpon => "GPON",
            PonTechnology::XgsPon => "XGS-PON",
        };
        f.write_str(s)
    }
}

/// A pluggable PON transceiver option offered for an OLT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SfpOption {
    /// Module name, matched verbatim against the design's SFP selection.
    pub name: String,
    /// Transmit power (dBm).
    pub tx_power_dbm: f32,
}

/// A separately orderable part of a chassis-based OLT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OltComponent {
    pub name: String,
    pub quantity: u32,
}

/// A group of identical uplink ports on an OLT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UplinkPort {
    /// Port type, e.g. `"10G SFP+"` or `"100G QSFP28"`.
    pub port_type: String,
    pub count: u32,
}

/// Optical Line Terminal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OltDevice {
    pub id: String,
    pub model: String,
    #[serde(default)]
    pub description: String,
    pub technology: PonTechnology,
    /// Number of PON ports on the device.
    pub pon_ports: u32,
    #[serde(default)]
    pub uplink_ports: Vec<UplinkPort>,
    /// Transceiver options; transmit power is a property of the installed
    /// SFP, not of the chassis.
    #[serde(default)]
    pub sfp_options: Vec<SfpOption>,
    /// Chassis parts for modular OLTs; empty for whole-unit devices.
    #[serde(default)]
    pub components: Vec<OltComponent>,
}

impl OltDevice {
    /// Transmit power of the SFP option matching `sfp_name`.
    ///
    /// An unmatched name degrades to 0.0 dBm: an incomplete configuration
    /// surfaces as a deeply negative margin downstream rather than as an
    /// error here.
    pub fn tx_power_for(&self, sfp_name: &str) -> f32 {
        self.sfp_options
            .iter()
            .find(|opt| opt.name == sfp_name)
            .map_or(0.0, |opt| opt.tx_power_dbm)
    }
}

/// A group of identical Ethernet ports on an ONT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EthernetPort {
    /// Port type, e.g. `"10/100/1000Base-T"`.
    pub port_type: String,
    pub count: u32,
}

/// Wi-Fi capability of an ONT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WifiSpec {
    /// Standard, e.g. `"802.11ax"`.
    pub standard: String,
    /// Bands, e.g. `"2.4/5GHz"`.
    pub bands: String,
}

/// Optical Network Terminal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntDevice {
    pub id: String,
    pub model: String,
    #[serde(default)]
    pub description: String,
    pub technology: PonTechnology,
    /// Minimum receivable optical power (dBm, negative).
    pub rx_sensitivity_dbm: f32,
    #[serde(default)]
    pub ethernet_ports: Vec<EthernetPort>,
    #[serde(default)]
    pub fxs_ports: u32,
    #[serde(default)]
    pub wifi: Option<WifiSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn olt_with_sfps() -> OltDevice {
        OltDevice {
            id: "olt-1".to_string(),
            model: "LTP-8X".to_string(),
            description: String::new(),
            technology: PonTechnology::Gpon,
            pon_ports: 8,
            uplink_ports: vec![],
            sfp_options: vec![
                SfpOption {
                    name: "GPON SFP Class B+".to_string(),
                    tx_power_dbm: 3.5,
                },
                SfpOption {
                    name: "GPON SFP Class C+".to_string(),
                    tx_power_dbm: 5.0,
                },
            ],
            components: vec![],
        }
    }

    #[test]
    fn tx_power_matches_by_name() {
        let olt = olt_with_sfps();
        assert_eq!(olt.tx_power_for("GPON SFP Class C+"), 5.0);
        assert_eq!(olt.tx_power_for("GPON SFP Class B+"), 3.5);
    }

    #[test]
    fn unmatched_sfp_degrades_to_zero_dbm() {
        let olt = olt_with_sfps();
        assert_eq!(olt.tx_power_for("XGS SFP+ N1"), 0.0);
        assert_eq!(olt.tx_power_for(""), 0.0);
    }

    #[test]
    fn records_parse_from_toml() {
        let doc = r#"
id = "ltx-8"
model = "LTX-8"
technology = "XGS-PON"
pon_ports = 8

[[uplink_ports]]
port_type = "100G QSFP28"
count = 2

[[sfp_options]]
name = "XGS-PON SFP+ N1"
tx_power_dbm = 4.5
"#;
        let olt: Result<OltDevice, _> = toml::from_str(doc);
        let olt = olt.expect("record should parse");
        assert_eq!(olt.technology, PonTechnology::XgsPon);
        assert_eq!(olt.pon_ports, 8);
        assert!(olt.components.is_empty());
        assert_eq!(olt.tx_power_for("XGS-PON SFP+ N1"), 4.5);
    }

    #[test]
    fn ont_wifi_is_optional() {
        let doc = r#"
id = "ntu-1"
model = "NTU-1 rev.C"
technology = "GPON"
rx_sensitivity_dbm = -28.0
"#;
        let ont: Result<OntDevice, _> = toml::from_str(doc);
        let ont = ont.expect("record should parse");
        assert!(ont.wifi.is_none());
        assert_eq!(ont.fxs_ports, 0);
    }
}
