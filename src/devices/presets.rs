//! Built-in device seed data: the Eltex GPON/XGS-PON line.
//!
//! Transmit powers follow common GPON SFP classes (B+: 1.5 to 5 dBm,
//! C+: 3 to 7 dBm); receiver sensitivity is the usual -28 dBm for GPON and
//! -29 dBm for XGS-PON terminals.

use super::types::{
    EthernetPort, OltComponent, OltDevice, OntDevice, PonTechnology, SfpOption, UplinkPort,
    WifiSpec,
};

fn gpon_sfp_options() -> Vec<SfpOption> {
    vec![
        SfpOption {
            name: "GPON SFP Class B+".to_string(),
            tx_power_dbm: 3.5,
        },
        SfpOption {
            name: "GPON SFP Class C+".to_string(),
            tx_power_dbm: 5.0,
        },
    ]
}

fn xgs_sfp_options() -> Vec<SfpOption> {
    vec![
        SfpOption {
            name: "XGS-PON SFP+ N1".to_string(),
            tx_power_dbm: 4.5,
        },
        SfpOption {
            name: "XGS-PON SFP+ N2".to_string(),
            tx_power_dbm: 6.0,
        },
    ]
}

fn uplinks(groups: &[(&str, u32)]) -> Vec<UplinkPort> {
    groups
        .iter()
        .map(|(port_type, count)| UplinkPort {
            port_type: (*port_type).to_string(),
            count: *count,
        })
        .collect()
}

/// MA4000-PX chassis build with the given number of PLC8 line cards.
fn ma4000_components(line_cards: u32) -> Vec<OltComponent> {
    vec![
        OltComponent {
            name: "MA4000-PX Chassis".to_string(),
            quantity: 1,
        },
        OltComponent {
            name: "PP4X Control Card".to_string(),
            quantity: 2,
        },
        OltComponent {
            name: "PLC8 GPON Line Card".to_string(),
            quantity: line_cards,
        },
    ]
}

fn olt(
    id: &str,
    model: &str,
    description: &str,
    technology: PonTechnology,
    pon_ports: u32,
    uplink_ports: Vec<UplinkPort>,
    sfp_options: Vec<SfpOption>,
    components: Vec<OltComponent>,
) -> OltDevice {
    OltDevice {
        id: id.to_string(),
        model: model.to_string(),
        description: description.to_string(),
        technology,
        pon_ports,
        uplink_ports,
        sfp_options,
        components,
    }
}

/// The built-in OLT set.
pub fn default_olts() -> Vec<OltDevice> {
    use PonTechnology::{Gpon, XgsPon};
    vec![
        olt(
            "ltp-4x",
            "LTP-4X",
            "Station terminal GPON LTP-4X, 4 GPON ports",
            Gpon,
            4,
            uplinks(&[("1G Combo", 4), ("10G SFP+", 2)]),
            gpon_sfp_options(),
            vec![],
        ),
        olt(
            "ltp-8x",
            "LTP-8X",
            "Station terminal LTP-8X, 8 ports GPON",
            Gpon,
            8,
            uplinks(&[("1G Combo", 4), ("10G SFP+", 2)]),
            gpon_sfp_options(),
            vec![],
        ),
        olt(
            "ltp-8n",
            "LTP-8N",
            "Station terminal LTP-8N, 8 ports SFP-xPON",
            Gpon,
            8,
            uplinks(&[("10G SFP+", 4)]),
            gpon_sfp_options(),
            vec![],
        ),
        olt(
            "ltp-16n",
            "LTP-16N",
            "Station terminal LTP-16N, 16 GPON ports",
            Gpon,
            16,
            uplinks(&[("10G SFP+", 4)]),
            gpon_sfp_options(),
            vec![],
        ),
        olt(
            "ma4000-px-8",
            "MA4000-PX (8 Ports)",
            "Chassis with 1x PLC8 GPON Line Card",
            Gpon,
            8,
            uplinks(&[("10G SFP+", 4)]),
            gpon_sfp_options(),
            ma4000_components(1),
        ),
        olt(
            "ma4000-px-16",
            "MA4000-PX (16 Ports)",
            "Chassis with 2x PLC8 GPON Line Cards",
            Gpon,
            16,
            uplinks(&[("10G SFP+", 4)]),
            gpon_sfp_options(),
            ma4000_components(2),
        ),
        olt(
            "ma4000-px-32",
            "MA4000-PX (32 Ports)",
            "Chassis with 4x PLC8 GPON Line Cards",
            Gpon,
            32,
            uplinks(&[("10G SFP+", 4)]),
            gpon_sfp_options(),
            ma4000_components(4),
        ),
        olt(
            "ltx-8",
            "LTX-8",
            "Station terminal XGS-GPON LTX-8, 8 ports XGS-PON",
            XgsPon,
            8,
            uplinks(&[("10G SFP+", 4), ("100G QSFP28", 2)]),
            xgs_sfp_options(),
            vec![],
        ),
        olt(
            "ltx-16",
            "LTX-16",
            "Station terminal XGS-GPON LTX-16, 16 ports XGS-PON",
            XgsPon,
            16,
            uplinks(&[("10G SFP+", 4), ("100G QSFP28", 2)]),
            xgs_sfp_options(),
            vec![],
        ),
    ]
}

fn eth(groups: &[(&str, u32)]) -> Vec<EthernetPort> {
    groups
        .iter()
        .map(|(port_type, count)| EthernetPort {
            port_type: (*port_type).to_string(),
            count: *count,
        })
        .collect()
}

fn wifi(standard: &str, bands: &str) -> Option<WifiSpec> {
    Some(WifiSpec {
        standard: standard.to_string(),
        bands: bands.to_string(),
    })
}

fn ont(
    id: &str,
    model: &str,
    description: &str,
    technology: PonTechnology,
    rx_sensitivity_dbm: f32,
    ethernet_ports: Vec<EthernetPort>,
    fxs_ports: u32,
    wifi: Option<WifiSpec>,
) -> OntDevice {
    OntDevice {
        id: id.to_string(),
        model: model.to_string(),
        description: description.to_string(),
        technology,
        rx_sensitivity_dbm,
        ethernet_ports,
        fxs_ports,
        wifi,
    }
}

/// The built-in ONT set.
pub fn default_onts() -> Vec<OntDevice> {
    use PonTechnology::{Gpon, XgsPon};
    vec![
        ont(
            "ntu-1-rev-c",
            "NTU-1 rev.C",
            "Subscriber terminal ONT NTU-1 rev. C, 1 port PON(SC), 1 port LAN 10/100/1000Base-T",
            Gpon,
            -28.0,
            eth(&[("10/100/1000Base-T", 1)]),
            0,
            None,
        ),
        ont(
            "ntu-1c",
            "NTU-1C",
            "Subscriber terminal ONT NTU-1C, 1 port PON(SC), 1 port LAN 10/100/1000Base-T, 1xRF",
            Gpon,
            -28.0,
            eth(&[("10/100/1000Base-T", 1)]),
            0,
            None,
        ),
        ont(
            "ntu-52w",
            "NTU-52W",
            "Subscriber terminal NTU-52W, 1 port GPON, 2 LAN, 802.11n Wi-Fi",
            Gpon,
            -28.0,
            eth(&[("10/100/1000Base-T", 2)]),
            0,
            wifi("802.11n", "2.4GHz"),
        ),
        ont(
            "ntu-md500p",
            "NTU-MD500P",
            "NTU-MD500P, 1 GPON port, 4 10/100/1000Base-T LAN ports with PoE support",
            Gpon,
            -28.0,
            eth(&[("10/100/1000Base-T PoE", 4)]),
            0,
            None,
        ),
        ont(
            "ntu-rg-5420g-wac",
            "NTU-RG-5420G-Wac",
            "Subscriber terminal NTU-RG-5420G-Wac rev. B, 1 PON, 4 LAN GbE, Wi-Fi 802.11ac",
            Gpon,
            -28.0,
            eth(&[("10/100/1000Base-T", 4)]),
            0,
            wifi("802.11ac", "2.4/5GHz"),
        ),
        ont(
            "ntu-rg-5421g-wac",
            "NTU-RG-5421G-Wac",
            "Subscriber terminal NTU-RG-5421G-Wac Rev.B, 1 PON, 4 LAN GbE, 1xFXS, Wi-Fi 802.11ac",
            Gpon,
            -28.0,
            eth(&[("10/100/1000Base-T", 4)]),
            1,
            wifi("802.11ac", "2.4/5GHz"),
        ),
        ont(
            "ntu-sfp-200",
            "NTU-SFP-200",
            "ONT NTU-SFP-200, subscriber terminal, SFP form factor",
            Gpon,
            -28.0,
            vec![],
            0,
            None,
        ),
        ont(
            "ntx-1",
            "NTX-1",
            "Subscriber terminal NTX-1, 1 XGS-PON, 1 1G LAN, 1 10G LAN",
            XgsPon,
            -29.0,
            eth(&[("10/100/1000Base-T", 1), ("10GBase-T", 1)]),
            0,
            None,
        ),
        ont(
            "ntx-1f",
            "NTX-1F",
            "Subscriber terminal NTX-1F, 1 XGS-PON, 1 1G LAN, 1 10G SFP+",
            XgsPon,
            -29.0,
            eth(&[("10/100/1000Base-T", 1), ("10G SFP+", 1)]),
            0,
            None,
        ),
        ont(
            "ntu-rg-5520g-wax",
            "NTU-RG-5520G-Wax",
            "Subscriber terminal NTU-RG-5520G-Wax, 1 PON, 4 LAN GbE, Wi-Fi 802.11ax",
            Gpon,
            -28.0,
            eth(&[("10/100/1000Base-T", 4)]),
            0,
            wifi("802.11ax", "2.4/5GHz"),
        ),
    ]
}
