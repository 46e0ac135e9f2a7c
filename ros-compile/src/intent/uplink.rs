use serde::{Deserialize, Serialize};

/// Purpose of an uplink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UplinkRole {
    #[default]
    Foreign,
    Domestic,
}

impl UplinkRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UplinkRole::Foreign => "Foreign",
            UplinkRole::Domestic => "Domestic",
        }
    }

    /// Routing table holding this uplink's default route.
    pub fn table(self) -> String {
        format!("to-{}", self.as_str())
    }
}

impl std::fmt::Display for UplinkRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials used when a radio joins an upstream network as a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationCredentials {
    pub ssid: String,
    pub passphrase: String,
}

/// How an uplink obtains its address and default gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Addressing {
    #[default]
    Dhcp,
    Static { address: String, gateway: String },
}

/// One physical uplink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Uplink {
    /// Physical interface name (`ether1`, `wifi1`, ...).
    pub interface: String,
    /// Required when `interface` is a radio.
    #[serde(default)]
    pub station: Option<StationCredentials>,
    #[serde(default)]
    pub addressing: Addressing,
    /// Upstream resolvers; falls back to the configured defaults.
    #[serde(default)]
    pub dns: Vec<String>,
}

/// Uplinks of the router: one mandatory Foreign, one optional Domestic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UplinkIntent {
    pub foreign: Uplink,
    #[serde(default)]
    pub domestic: Option<Uplink>,
    /// Additional Foreign-purpose links sharing load or standing by.
    #[serde(default)]
    pub extra_foreign: Vec<Uplink>,
    /// Strategy across all Foreign-purpose links.
    #[serde(default)]
    pub strategy: Option<MultiLinkStrategy>,
}

impl UplinkIntent {
    /// Every uplink with its role, in emission order.
    pub fn all(&self) -> Vec<(UplinkRole, &Uplink)> {
        let mut out = vec![(UplinkRole::Foreign, &self.foreign)];
        out.extend(self.extra_foreign.iter().map(|u| (UplinkRole::Foreign, u)));
        if let Some(domestic) = &self.domestic {
            out.push((UplinkRole::Domestic, domestic));
        }
        out
    }

    /// Foreign-purpose links (the WAN link class).
    pub fn foreign_links(&self) -> Vec<&Uplink> {
        let mut out = vec![&self.foreign];
        out.extend(self.extra_foreign.iter());
        out
    }

    pub fn has_domestic(&self) -> bool {
        self.domestic.is_some()
    }
}

/// How several equally-purposed links share traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultiLinkStrategy {
    #[serde(default)]
    pub mode: MultiLinkMode,
    #[serde(default)]
    pub balance: BalanceMethod,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiLinkMode {
    /// Recursive descending-priority chain.
    #[default]
    Failover,
    LoadBalance,
    /// Load-balance with a failover chain as backstop.
    Both,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceMethod {
    /// Per-connection classifier hashing source and destination addresses.
    #[default]
    Classifier,
    /// Every Nth new connection.
    RoundRobin,
}
