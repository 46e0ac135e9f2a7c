//! VPN client commands.
//!
//! Each protocol has its own emitter; [`VpnClient`] puts them behind one sum
//! type so the shared base wiring (interface lists, default route, NAT and
//! endpoint routing) is written once.

mod base;
mod endpoint;
mod ikev2;
mod ppp;
mod wireguard;

use section_map::Command;
use tracing::debug;

use super::multilink::{self, per_link_table, Link, LinkClass};
use super::route::{declare_table, with_main_duplicates, Route};
use super::{UplinkContext, VPN_TABLE};
use crate::error::CompileError;
use crate::intent::{
    Ikev2Client, L2tpClient, OpenVpnClient, PptpClient, SstpClient, UplinkRole, VpnClientIntent,
    WireguardClient,
};
use crate::options::CompileOptions;
use crate::section::{CommandMap, Section};

pub use endpoint::{classify_endpoint, Endpoint};

/// Logical name used when a client does not set one.
pub const DEFAULT_LOGICAL_NAME: &str = "client";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VpnProtocol {
    Wireguard,
    OpenVpn,
    L2tp,
    Pptp,
    Sstp,
    Ikev2,
}

impl VpnProtocol {
    /// Interface name prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            VpnProtocol::Wireguard => "wg",
            VpnProtocol::OpenVpn => "ovpn",
            VpnProtocol::L2tp => "l2tp",
            VpnProtocol::Pptp => "pptp",
            VpnProtocol::Sstp => "sstp",
            VpnProtocol::Ikev2 => "ikev2",
        }
    }
}

/// `{prefix}-{logical name}`, for example `wg-client`.
pub fn interface_name(protocol: VpnProtocol, logical: Option<&str>) -> String {
    let logical = logical
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_LOGICAL_NAME);
    format!("{}-{logical}", protocol.prefix())
}

/// One configured client of any protocol.
#[derive(Debug, Clone, Copy)]
pub enum VpnClient<'a> {
    Wireguard(&'a WireguardClient),
    OpenVpn(&'a OpenVpnClient),
    L2tp(&'a L2tpClient),
    Pptp(&'a PptpClient),
    Sstp(&'a SstpClient),
    Ikev2(&'a Ikev2Client),
}

impl<'a> VpnClient<'a> {
    pub fn protocol(&self) -> VpnProtocol {
        match self {
            VpnClient::Wireguard(_) => VpnProtocol::Wireguard,
            VpnClient::OpenVpn(_) => VpnProtocol::OpenVpn,
            VpnClient::L2tp(_) => VpnProtocol::L2tp,
            VpnClient::Pptp(_) => VpnProtocol::Pptp,
            VpnClient::Sstp(_) => VpnProtocol::Sstp,
            VpnClient::Ikev2(_) => VpnProtocol::Ikev2,
        }
    }

    fn logical_name(&self) -> Option<&'a str> {
        match self {
            VpnClient::Wireguard(c) => c.name.as_deref(),
            VpnClient::OpenVpn(c) => c.name.as_deref(),
            VpnClient::L2tp(c) => c.name.as_deref(),
            VpnClient::Pptp(c) => c.name.as_deref(),
            VpnClient::Sstp(c) => c.name.as_deref(),
            VpnClient::Ikev2(c) => c.name.as_deref(),
        }
    }

    /// Interface name, or the object name for IKEv2 which has no interface.
    pub fn name(&self) -> String {
        interface_name(self.protocol(), self.logical_name())
    }

    /// IKEv2 is policy based and has no interface to route through.
    pub fn has_interface(&self) -> bool {
        !matches!(self, VpnClient::Ikev2(_))
    }

    /// Remote server address or host name.
    pub fn endpoint(&self) -> &'a str {
        match self {
            VpnClient::Wireguard(c) => &c.endpoint,
            VpnClient::OpenVpn(c) => &c.server,
            VpnClient::L2tp(c) => &c.server,
            VpnClient::Pptp(c) => &c.server,
            VpnClient::Sstp(c) => &c.server,
            VpnClient::Ikev2(c) => &c.server,
        }
    }

    /// Uplink the encrypted traffic must leave through.
    pub fn route_via(&self) -> UplinkRole {
        match self {
            VpnClient::Wireguard(c) => c.route_via,
            VpnClient::OpenVpn(c) => c.route_via,
            VpnClient::L2tp(c) => c.route_via,
            VpnClient::Pptp(c) => c.route_via,
            VpnClient::Sstp(c) => c.route_via,
            VpnClient::Ikev2(c) => c.route_via,
        }
    }

    /// Protocol-specific commands.
    fn emit(&self, map: &mut CommandMap) -> Result<(), CompileError> {
        let name = self.name();
        match self {
            VpnClient::Wireguard(c) => wireguard::emit(map, c, &name),
            VpnClient::OpenVpn(c) => ppp::emit_openvpn(map, c, &name),
            VpnClient::L2tp(c) => ppp::emit_l2tp(map, c, &name)?,
            VpnClient::Pptp(c) => ppp::emit_pptp(map, c, &name),
            VpnClient::Sstp(c) => ppp::emit_sstp(map, c, &name),
            VpnClient::Ikev2(c) => ikev2::emit(map, c, &name)?,
        }
        Ok(())
    }
}

/// Configured clients in fixed protocol order.
pub fn clients(vpn: &VpnClientIntent) -> Vec<VpnClient<'_>> {
    let mut out = Vec::new();
    out.extend(vpn.wireguard.as_ref().map(VpnClient::Wireguard));
    out.extend(vpn.openvpn.as_ref().map(VpnClient::OpenVpn));
    out.extend(vpn.l2tp.as_ref().map(VpnClient::L2tp));
    out.extend(vpn.pptp.as_ref().map(VpnClient::Pptp));
    out.extend(vpn.sstp.as_ref().map(VpnClient::Sstp));
    out.extend(vpn.ikev2.as_ref().map(VpnClient::Ikev2));
    out
}

/// Number of clients that take part in multi-link routing.
pub fn link_count(vpn: &VpnClientIntent) -> usize {
    clients(vpn).iter().filter(|c| c.has_interface()).count()
}

/// Table a client's traffic is routed through.
///
/// Interface clients use the VPN table, or their per-link table when several
/// share it. A policy-based client only owns the VPN table when no interface
/// client does; otherwise it gets a table of its own so its connection mark
/// stays out of the way of multi-link marking.
fn client_table(client: &VpnClient<'_>, links: &[Link]) -> String {
    let name = client.name();
    if client.has_interface() {
        if links.len() > 1 {
            per_link_table(&name)
        } else {
            VPN_TABLE.to_string()
        }
    } else if links.is_empty() {
        VPN_TABLE.to_string()
    } else {
        per_link_table(&name)
    }
}

/// Commands for every configured VPN client.
pub fn build(
    vpn: &VpnClientIntent,
    ctx: &UplinkContext<'_>,
    options: &CompileOptions,
) -> Result<CommandMap, CompileError> {
    let mut map = CommandMap::new();
    if vpn.is_empty() {
        return Ok(map);
    }
    let clients = clients(vpn);

    let links: Vec<Link> = clients
        .iter()
        .filter(|c| c.has_interface())
        .map(|c| Link::new(c.name(), c.name()))
        .collect();
    let multi = links.len() > 1;
    debug!(clients = clients.len(), links = links.len(), multi, "building vpn clients");

    map.push(Section::RoutingTable, declare_table(VPN_TABLE));
    if multi {
        for link in &links {
            map.push(Section::RoutingTable, declare_table(&link.table()));
        }
    }
    if !links.is_empty() {
        map.push(
            Section::InterfaceList,
            Command::add().arg("name", &options.lists.vpn_wan),
        );
    }

    let mut routes = Vec::new();
    for client in &clients {
        client.emit(&mut map)?;
        let table = client_table(client, &links);
        if !client.has_interface() {
            if table != VPN_TABLE {
                map.push(Section::RoutingTable, declare_table(&table));
            }
            // Policy-based clients still need a route for the marked traffic.
            routes.push(
                Route::default_via(&ctx.foreign_gateway, &table)
                    .distance(options.routing.vpn_distance)
                    .comment(client.name()),
            );
        }
        base::wire(&mut map, &mut routes, client, &table, ctx, options);
    }

    if multi {
        let class = LinkClass {
            label: "VPN",
            table: VPN_TABLE.to_string(),
            base_distance: options.routing.vpn_distance,
            links,
        };
        let generated = multilink::generate(&class, vpn.strategy.unwrap_or_default(), ctx.probes);
        routes.extend(generated.routes);
        map.extend(Section::Mangle, generated.mangle);
    }

    map.extend(
        Section::Route,
        with_main_duplicates(&routes, VPN_TABLE, !ctx.has_domestic),
    );
    Ok(map)
}
