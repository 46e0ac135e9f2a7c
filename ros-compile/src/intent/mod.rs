//! Declarative description of the router's desired network state.
//!
//! The intent is plain data: it is deserialised from TOML or JSON and handed
//! to [`crate::compile::compile`] unchanged. Credentials are opaque strings.

mod load;
mod tunnel;
mod uplink;
mod vpn;
mod wireless;

use serde::{Deserialize, Serialize};

pub use load::{load_intent, parse_intent, IntentFormat, IntentLoadError};
pub use tunnel::{TunnelIntent, TunnelKind};
pub use uplink::{
    Addressing, BalanceMethod, MultiLinkMode, MultiLinkStrategy, StationCredentials, Uplink,
    UplinkIntent, UplinkRole,
};
pub use vpn::{
    Ikev2AuthMethod, Ikev2Client, L2tpClient, OpenVpnClient, OpenVpnTransport, PptpClient,
    SstpClient, VpnClientIntent, WireguardClient,
};
pub use wireless::{Band, BandPair, NetworkRole, NetworkSet, WirelessIntent, WirelessNetwork};

/// Root input of the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkIntent {
    #[serde(default)]
    pub wireless: WirelessIntent,
    pub uplinks: UplinkIntent,
    #[serde(default)]
    pub vpn: VpnClientIntent,
    #[serde(default)]
    pub tunnels: Vec<TunnelIntent>,
    #[serde(default)]
    pub inventory: RouterInventory,
}

/// A physical interface known to exist on the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhysicalInterface {
    pub name: String,
    /// Set for radios.
    #[serde(default)]
    pub band: Option<Band>,
}

/// Physical interfaces of the router and the mesh trunk, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterInventory {
    #[serde(default)]
    pub interfaces: Vec<PhysicalInterface>,
    /// Radio carrying the mesh trunk; its band is unavailable to AP masters.
    #[serde(default)]
    pub trunk: Option<String>,
}

impl RouterInventory {
    /// Band of a radio interface listed in the inventory.
    pub fn band_of(&self, interface: &str) -> Option<Band> {
        self.interfaces
            .iter()
            .find(|i| i.name == interface)
            .and_then(|i| i.band)
    }
}
