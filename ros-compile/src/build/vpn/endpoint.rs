use std::net::IpAddr;

use section_map::Command;
use tracing::warn;

use crate::build::{UplinkContext, FOREIGN_DNS};
use crate::intent::UplinkRole;
use crate::section::{CommandMap, Section};

/// Remote end of a VPN client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Address(IpAddr),
    /// Anything that is not a literal address, malformed input included.
    Host(&'a str),
}

pub fn classify_endpoint(endpoint: &str) -> Endpoint<'_> {
    let trimmed = endpoint.trim();
    match trimmed.parse::<IpAddr>() {
        Ok(addr) => Endpoint::Address(addr),
        Err(_) => Endpoint::Host(trimmed),
    }
}

/// Force traffic to the endpoint out of the uplink named by `route_via`.
///
/// Literal IPv4 addresses go straight into an address list. Host names are
/// resolved through the Foreign resolver, which fills the same list. Uplink
/// tables only carry IPv4 routes, so an IPv6 literal is left to the main
/// table.
pub(super) fn route_endpoint(
    map: &mut CommandMap,
    name: &str,
    endpoint: &str,
    route_via: UplinkRole,
    ctx: &UplinkContext<'_>,
) {
    let list = format!("{name}-endpoint");

    match classify_endpoint(endpoint) {
        Endpoint::Address(IpAddr::V6(addr)) => {
            warn!(client = name, endpoint = %addr, "IPv6 endpoint cannot be pinned to an uplink; routed by main");
            return;
        }
        Endpoint::Address(addr) => map.push(
            Section::AddressList,
            Command::add()
                .arg("list", &list)
                .arg("address", addr)
                .arg("comment", name),
        ),
        Endpoint::Host(host) => map.push(
            Section::DnsStatic,
            Command::add()
                .arg("name", host)
                .raw("type", "FWD")
                .arg("forward-to", FOREIGN_DNS)
                .arg("address-list", &list)
                .raw("match-subdomain", "no")
                .arg("comment", name),
        ),
    }

    let table = match route_via {
        UplinkRole::Domestic if !ctx.has_domestic => {
            warn!(client = name, "endpoint routed via Domestic but no domestic uplink; using Foreign");
            UplinkRole::Foreign.table()
        }
        role => role.table(),
    };

    map.push(
        Section::Mangle,
        Command::add()
            .raw("chain", "output")
            .raw("action", "mark-routing")
            .arg("new-routing-mark", table)
            .arg("dst-address-list", &list)
            .raw("passthrough", "no")
            .arg("comment", name),
    );
}
