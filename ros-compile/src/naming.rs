//! Derived identifiers for wireless networks.
//!
//! Every command that mentions a network goes through [`resolve`], so the
//! interface, bridge, interface-list and steering names always agree.

use serde::Serialize;

use crate::intent::{Band, BandPair, NetworkRole, UplinkRole};

/// Names derived from one network role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkNames {
    /// Role name or `{role}-{custom}`; feeds every other name.
    pub base: String,
    /// Abbreviated form used by interface lists and bridge-port comments.
    pub short: String,
    /// Suffix of the wireless interfaces (`VPNLAN`).
    pub interface_suffix: String,
    pub bridge: String,
    pub list: String,
    pub steering: String,
}

impl NetworkNames {
    /// Wireless interface name on one band (`wifi5-VPNLAN`).
    pub fn interface(&self, band: Band) -> String {
        band_interface_name(band, &self.interface_suffix)
    }
}

/// Derive all names for a role and an optional custom name.
///
/// A custom name equal to the role's canonical name counts as absent. Any
/// other custom name replaces the base with `{role}-{custom}`, which is never
/// abbreviated.
pub fn resolve(role: NetworkRole, custom: Option<&str>) -> NetworkNames {
    let canonical = role.as_str();
    let (base, short) = match custom.map(str::trim) {
        Some(custom) if !custom.is_empty() && custom != canonical => {
            let base = format!("{canonical}-{custom}");
            (base.clone(), base)
        }
        _ => (canonical.to_string(), abbreviate(canonical).to_string()),
    };

    NetworkNames {
        interface_suffix: format!("{base}LAN"),
        bridge: format!("LANBridge{base}"),
        list: format!("{short}-LAN"),
        steering: base.clone(),
        base,
        short,
    }
}

/// Short form of a canonical name.
pub fn abbreviate(name: &str) -> &str {
    match name {
        "Foreign" => "FRN",
        "Domestic" => "DOM",
        other => other,
    }
}

/// `wifi{band}-{suffix}`.
pub fn band_interface_name(band: Band, suffix: &str) -> String {
    format!("wifi{}-{suffix}", band.label())
}

/// Name given to a radio running as a station uplink (`wifi5-ForeignWAN`).
pub fn station_interface_name(band: Band, role: UplinkRole) -> String {
    band_interface_name(band, &format!("{}WAN", role.as_str()))
}

/// Per-purpose WAN interface list (`FRN-WAN`, `DOM-WAN`).
pub fn wan_list_name(role: UplinkRole) -> String {
    format!("{}-WAN", abbreviate(role.as_str()))
}

/// SSID per band; band-suffixed only when `split_band_naming` is set.
pub fn ssid_list(ssid: &str, split_band_naming: bool) -> BandPair<String> {
    let for_band = |band: Band| {
        if split_band_naming {
            format!("{ssid} {}", band.label())
        } else {
            ssid.to_string()
        }
    };
    BandPair::new(for_band(Band::Band2_4), for_band(Band::Band5))
}
