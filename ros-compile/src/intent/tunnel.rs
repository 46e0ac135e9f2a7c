use serde::{Deserialize, Serialize};

/// Encapsulation format of a generic tunnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TunnelKind {
    Eoip,
    Gre,
    Ipip,
    #[serde(rename = "6to4")]
    SixToFour,
}

impl TunnelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TunnelKind::Eoip => "eoip",
            TunnelKind::Gre => "gre",
            TunnelKind::Ipip => "ipip",
            TunnelKind::SixToFour => "6to4",
        }
    }
}

/// A point-to-point encapsulation tunnel, optionally IPsec-protected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TunnelIntent {
    pub kind: TunnelKind,
    pub name: String,
    #[serde(default)]
    pub local_address: Option<String>,
    pub remote_address: String,
    /// Enables IPsec protection of the tunnel.
    #[serde(default)]
    pub ipsec_secret: Option<String>,
    /// Required for EoIP.
    #[serde(default)]
    pub tunnel_id: Option<u16>,
    /// Address assigned on the tunnel interface (CIDR).
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub keepalive: Option<String>,
    #[serde(default)]
    pub mtu: Option<u16>,
    #[serde(default)]
    pub comment: Option<String>,
}
