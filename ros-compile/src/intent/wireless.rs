use serde::{Deserialize, Serialize};

/// One of the two physical radio bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "2.4")]
    Band2_4,
    #[serde(rename = "5")]
    Band5,
}

impl Band {
    /// Both bands in emission order.
    pub const ALL: [Band; 2] = [Band::Band2_4, Band::Band5];

    /// Short label used in SSIDs and interface names.
    pub fn label(self) -> &'static str {
        match self {
            Band::Band2_4 => "2.4",
            Band::Band5 => "5",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}GHz", self.label())
    }
}

/// A value held once per band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandPair<T> {
    pub band2_4: T,
    pub band5: T,
}

impl<T> BandPair<T> {
    pub fn new(band2_4: T, band5: T) -> Self {
        Self { band2_4, band5 }
    }

    pub fn get(&self, band: Band) -> &T {
        match band {
            Band::Band2_4 => &self.band2_4,
            Band::Band5 => &self.band5,
        }
    }

    pub fn get_mut(&mut self, band: Band) -> &mut T {
        match band {
            Band::Band2_4 => &mut self.band2_4,
            Band::Band5 => &mut self.band5,
        }
    }

    /// `(band, value)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (Band, &T)> {
        Band::ALL.into_iter().map(move |band| (band, self.get(band)))
    }
}

/// Logical role of a wireless network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NetworkRole {
    Foreign,
    Domestic,
    #[serde(rename = "VPN")]
    Vpn,
    Split,
}

impl NetworkRole {
    /// Roles in canonical (allocation) order.
    pub const ALL: [NetworkRole; 4] = [
        NetworkRole::Foreign,
        NetworkRole::Domestic,
        NetworkRole::Vpn,
        NetworkRole::Split,
    ];

    /// Canonical name used in every derived identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            NetworkRole::Foreign => "Foreign",
            NetworkRole::Domestic => "Domestic",
            NetworkRole::Vpn => "VPN",
            NetworkRole::Split => "Split",
        }
    }
}

impl std::fmt::Display for NetworkRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-defined access-point network.
///
/// SSID and passphrase are opaque: no charset or length checks are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WirelessNetwork {
    pub ssid: String,
    pub passphrase: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub disabled: bool,
    /// Suffix the SSID with the band label (`Home 2.4`, `Home 5`).
    #[serde(default)]
    pub split_band_naming: bool,
    /// Custom name; replaces the canonical role name in derived identifiers.
    #[serde(default)]
    pub name: Option<String>,
}

impl WirelessNetwork {
    pub fn enabled(&self) -> bool {
        !self.disabled
    }
}

/// Up to four role-keyed networks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkSet {
    #[serde(default)]
    pub foreign: Option<WirelessNetwork>,
    #[serde(default)]
    pub domestic: Option<WirelessNetwork>,
    #[serde(default)]
    pub vpn: Option<WirelessNetwork>,
    #[serde(default)]
    pub split: Option<WirelessNetwork>,
}

impl NetworkSet {
    pub fn get(&self, role: NetworkRole) -> Option<&WirelessNetwork> {
        match role {
            NetworkRole::Foreign => self.foreign.as_ref(),
            NetworkRole::Domestic => self.domestic.as_ref(),
            NetworkRole::Vpn => self.vpn.as_ref(),
            NetworkRole::Split => self.split.as_ref(),
        }
    }
}

/// Wireless part of the intent: one shared network or a role-keyed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WirelessIntent {
    /// One network compiled under the `Foreign` role.
    Single(WirelessNetwork),
    Set(NetworkSet),
}

impl Default for WirelessIntent {
    fn default() -> Self {
        WirelessIntent::Set(NetworkSet::default())
    }
}

impl WirelessIntent {
    /// Requested networks in stable allocation order.
    pub fn networks(&self) -> Vec<(NetworkRole, &WirelessNetwork)> {
        match self {
            WirelessIntent::Single(network) => vec![(NetworkRole::Foreign, network)],
            WirelessIntent::Set(set) => NetworkRole::ALL
                .into_iter()
                .filter_map(|role| set.get(role).map(|n| (role, n)))
                .collect(),
        }
    }

    /// Networks that are switched on, in allocation order.
    pub fn enabled_networks(&self) -> Vec<(NetworkRole, &WirelessNetwork)> {
        self.networks()
            .into_iter()
            .filter(|(_, n)| n.enabled())
            .collect()
    }
}
