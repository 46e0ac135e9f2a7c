use serde::{Deserialize, Serialize};

use super::uplink::{MultiLinkStrategy, UplinkRole};

fn default_wireguard_port() -> u16 {
    51820
}

fn default_allowed_address() -> String {
    "0.0.0.0/0".to_string()
}

fn default_keepalive() -> String {
    "25s".to_string()
}

fn default_openvpn_port() -> u16 {
    1194
}

fn default_sstp_port() -> u16 {
    443
}

fn default_cipher() -> String {
    "aes256-gcm".to_string()
}

fn default_auth() -> String {
    "sha256".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireguardClient {
    #[serde(default)]
    pub name: Option<String>,
    pub private_key: String,
    pub peer_public_key: String,
    #[serde(default)]
    pub preshared_key: Option<String>,
    pub endpoint: String,
    #[serde(default = "default_wireguard_port")]
    pub endpoint_port: u16,
    /// Tunnel address in CIDR form.
    pub address: String,
    #[serde(default = "default_allowed_address")]
    pub allowed_address: String,
    #[serde(default)]
    pub listen_port: Option<u16>,
    #[serde(default)]
    pub mtu: Option<u16>,
    #[serde(default = "default_keepalive")]
    pub keepalive: String,
    #[serde(default)]
    pub route_via: UplinkRole,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenVpnTransport {
    #[default]
    Udp,
    Tcp,
}

impl OpenVpnTransport {
    pub fn as_str(self) -> &'static str {
        match self {
            OpenVpnTransport::Udp => "udp",
            OpenVpnTransport::Tcp => "tcp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenVpnClient {
    #[serde(default)]
    pub name: Option<String>,
    pub server: String,
    #[serde(default = "default_openvpn_port")]
    pub port: u16,
    #[serde(default)]
    pub transport: OpenVpnTransport,
    pub user: String,
    pub password: String,
    #[serde(default)]
    pub certificate: Option<String>,
    #[serde(default = "default_cipher")]
    pub cipher: String,
    #[serde(default = "default_auth")]
    pub auth: String,
    #[serde(default)]
    pub route_via: UplinkRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct L2tpClient {
    #[serde(default)]
    pub name: Option<String>,
    pub server: String,
    pub user: String,
    pub password: String,
    #[serde(default)]
    pub use_ipsec: bool,
    /// Required when `use_ipsec` is set.
    #[serde(default)]
    pub ipsec_secret: Option<String>,
    #[serde(default)]
    pub route_via: UplinkRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PptpClient {
    #[serde(default)]
    pub name: Option<String>,
    pub server: String,
    pub user: String,
    pub password: String,
    #[serde(default)]
    pub route_via: UplinkRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SstpClient {
    #[serde(default)]
    pub name: Option<String>,
    pub server: String,
    #[serde(default = "default_sstp_port")]
    pub port: u16,
    pub user: String,
    pub password: String,
    #[serde(default)]
    pub verify_server_certificate: bool,
    #[serde(default)]
    pub route_via: UplinkRole,
}

/// IKE authentication method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ikev2AuthMethod {
    PreSharedKey,
    Eap,
    DigitalSignature,
}

impl Ikev2AuthMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Ikev2AuthMethod::PreSharedKey => "pre-shared-key",
            Ikev2AuthMethod::Eap => "eap",
            Ikev2AuthMethod::DigitalSignature => "digital-signature",
        }
    }
}

/// IKEv2 client. Which optional fields are required depends on `auth_method`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ikev2Client {
    #[serde(default)]
    pub name: Option<String>,
    pub server: String,
    pub auth_method: Ikev2AuthMethod,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub eap_methods: Vec<String>,
    #[serde(default)]
    pub certificate: Option<String>,
    #[serde(default)]
    pub my_id: Option<String>,
    #[serde(default)]
    pub remote_id: Option<String>,
    #[serde(default)]
    pub route_via: UplinkRole,
}

/// At most one client per protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VpnClientIntent {
    #[serde(default)]
    pub wireguard: Option<WireguardClient>,
    #[serde(default)]
    pub openvpn: Option<OpenVpnClient>,
    #[serde(default)]
    pub l2tp: Option<L2tpClient>,
    #[serde(default)]
    pub pptp: Option<PptpClient>,
    #[serde(default)]
    pub sstp: Option<SstpClient>,
    #[serde(default)]
    pub ikev2: Option<Ikev2Client>,
    /// Strategy across interface-based clients when more than one exists.
    #[serde(default)]
    pub strategy: Option<MultiLinkStrategy>,
}

impl VpnClientIntent {
    pub fn is_empty(&self) -> bool {
        self.wireguard.is_none()
            && self.openvpn.is_none()
            && self.l2tp.is_none()
            && self.pptp.is_none()
            && self.sstp.is_none()
            && self.ikev2.is_none()
    }
}
