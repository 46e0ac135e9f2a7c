use section_map::{SectionKey, SectionMap};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Compiler output: command lines grouped by [`Section`].
pub type CommandMap = SectionMap<Section>;

/// Every configuration context the compiler writes to.
///
/// Declaration order is the canonical output order: things are declared
/// (bridges, lists, routing tables, interfaces) before anything references
/// them (ports, members, routes, firewall rules).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, IntoStaticStr,
)]
pub enum Section {
    #[strum(serialize = "/interface bridge")]
    Bridge,
    #[strum(serialize = "/interface list")]
    InterfaceList,
    #[strum(serialize = "/routing table")]
    RoutingTable,
    #[strum(serialize = "/interface ethernet")]
    Ethernet,
    #[strum(serialize = "/interface wifi steering")]
    WifiSteering,
    #[strum(serialize = "/interface wifi")]
    Wifi,
    #[strum(serialize = "/interface wireguard")]
    Wireguard,
    #[strum(serialize = "/interface wireguard peers")]
    WireguardPeers,
    #[strum(serialize = "/interface ovpn-client")]
    OvpnClient,
    #[strum(serialize = "/interface l2tp-client")]
    L2tpClient,
    #[strum(serialize = "/interface pptp-client")]
    PptpClient,
    #[strum(serialize = "/interface sstp-client")]
    SstpClient,
    #[strum(serialize = "/interface eoip")]
    Eoip,
    #[strum(serialize = "/interface gre")]
    Gre,
    #[strum(serialize = "/interface ipip")]
    Ipip,
    #[strum(serialize = "/interface 6to4")]
    SixToFour,
    #[strum(serialize = "/interface bridge port")]
    BridgePort,
    #[strum(serialize = "/interface list member")]
    InterfaceListMember,
    #[strum(serialize = "/ip address")]
    IpAddress,
    #[strum(serialize = "/ip dhcp-client")]
    DhcpClient,
    #[strum(serialize = "/ip route")]
    Route,
    #[strum(serialize = "/ip dns forwarders")]
    DnsForwarders,
    #[strum(serialize = "/ip dns static")]
    DnsStatic,
    #[strum(serialize = "/ip ipsec profile")]
    IpsecProfile,
    #[strum(serialize = "/ip ipsec proposal")]
    IpsecProposal,
    #[strum(serialize = "/ip ipsec mode-config")]
    IpsecModeConfig,
    #[strum(serialize = "/ip ipsec policy group")]
    IpsecPolicyGroup,
    #[strum(serialize = "/ip ipsec peer")]
    IpsecPeer,
    #[strum(serialize = "/ip ipsec identity")]
    IpsecIdentity,
    #[strum(serialize = "/ip ipsec policy")]
    IpsecPolicy,
    #[strum(serialize = "/ip firewall address-list")]
    AddressList,
    #[strum(serialize = "/ip firewall mangle")]
    Mangle,
    #[strum(serialize = "/ip firewall nat")]
    Nat,
}

impl Section {
    /// All sections in canonical order.
    pub fn canonical() -> impl Iterator<Item = Section> {
        Section::iter()
    }

    pub fn as_path(self) -> &'static str {
        self.into()
    }
}

impl SectionKey for Section {
    fn path(&self) -> &str {
        self.as_path()
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Map a logical section group name to concrete sections.
pub fn section_group(group: &str) -> Option<&'static [Section]> {
    match group {
        "wireless" => Some(&[Section::WifiSteering, Section::Wifi]),
        "lan" => Some(&[
            Section::Bridge,
            Section::BridgePort,
            Section::InterfaceList,
            Section::InterfaceListMember,
        ]),
        "vpn" => Some(&[
            Section::Wireguard,
            Section::WireguardPeers,
            Section::OvpnClient,
            Section::L2tpClient,
            Section::PptpClient,
            Section::SstpClient,
            Section::IpsecProfile,
            Section::IpsecProposal,
            Section::IpsecModeConfig,
            Section::IpsecPolicyGroup,
            Section::IpsecPeer,
            Section::IpsecIdentity,
            Section::IpsecPolicy,
        ]),
        "tunnels" => Some(&[Section::Eoip, Section::Gre, Section::Ipip, Section::SixToFour]),
        "routing" => Some(&[Section::RoutingTable, Section::Route, Section::DhcpClient]),
        "dns" => Some(&[Section::DnsForwarders, Section::DnsStatic]),
        "firewall" => Some(&[Section::AddressList, Section::Mangle, Section::Nat]),
        _ => None,
    }
}

/// Resolve a `--section` filter: a group name or a literal section path.
pub fn resolve_filter(filter: &str) -> Option<Vec<Section>> {
    if let Some(group) = section_group(filter) {
        return Some(group.to_vec());
    }
    filter.parse::<Section>().ok().map(|s| vec![s])
}

#[cfg(test)]
mod tests {
    use super::{resolve_filter, Section};

    #[test]
    fn paths_round_trip_through_from_str() {
        for section in Section::canonical() {
            assert_eq!(section.as_path().parse::<Section>(), Ok(section));
        }
    }

    #[test]
    fn declarations_precede_references() {
        assert!(Section::Bridge < Section::BridgePort);
        assert!(Section::InterfaceList < Section::InterfaceListMember);
        assert!(Section::RoutingTable < Section::DhcpClient);
        assert!(Section::WifiSteering < Section::Wifi);
        assert!(Section::Wireguard < Section::InterfaceListMember);
    }

    #[test]
    fn filter_accepts_groups_and_paths() {
        assert_eq!(resolve_filter("dns").map(|s| s.len()), Some(2));
        assert_eq!(resolve_filter("/ip route"), Some(vec![Section::Route]));
        assert_eq!(resolve_filter("bogus"), None);
    }
}
