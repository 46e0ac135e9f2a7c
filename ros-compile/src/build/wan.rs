//! Uplink interfaces, addressing, default-route tables and resolvers.
//!
//! The WAN builder composes the VPN builder: VPN clients depend on the
//! Foreign uplink for endpoint routing and on the failover probes left
//! over by the WAN link class.

use std::collections::HashSet;
use std::net::Ipv4Addr;

use section_map::{find_by, merge, Command};
use tracing::debug;

use super::multilink::{self, per_link_table, Link, LinkClass};
use super::route::{declare_table, with_main_duplicates, Route, MAIN_TABLE};
use super::{vpn, UplinkContext, FOREIGN_DNS};
use crate::error::CompileError;
use crate::intent::{Addressing, NetworkIntent, Uplink, UplinkIntent, UplinkRole};
use crate::naming::{station_interface_name, wan_list_name};
use crate::options::CompileOptions;
use crate::radio::radio_band;
use crate::section::{CommandMap, Section};

const DOMESTIC_DNS: &str = "Domestic-DNS";

/// Uplink and VPN client commands.
pub fn build(intent: &NetworkIntent, options: &CompileOptions) -> Result<CommandMap, CompileError> {
    let uplinks = &intent.uplinks;
    ensure_unique(uplinks)?;

    let has_domestic = uplinks.has_domestic();
    let foreign = uplinks.foreign_links();
    let multi = foreign.len() > 1;
    let foreign_table = UplinkRole::Foreign.table();
    let mut map = CommandMap::new();

    map.push(Section::RoutingTable, declare_table(&foreign_table));
    if has_domestic {
        map.push(Section::RoutingTable, declare_table(&UplinkRole::Domestic.table()));
    }
    map.push(
        Section::InterfaceList,
        Command::add().arg("name", &options.lists.wan),
    );
    let mut roles = vec![UplinkRole::Foreign];
    if has_domestic {
        roles.push(UplinkRole::Domestic);
    }
    for role in &roles {
        let list = wan_list_name(*role);
        map.push(Section::InterfaceList, Command::add().arg("name", &list));
        map.push(
            Section::Nat,
            Command::add()
                .raw("chain", "srcnat")
                .raw("action", "masquerade")
                .arg("out-interface-list", &list)
                .arg("comment", &list),
        );
    }

    let mut routes = Vec::new();
    let mut links = Vec::new();
    for (idx, uplink) in foreign.iter().enumerate() {
        let label = uplink_label(UplinkRole::Foreign, idx);
        let name = wire_interface(&mut map, intent, options, UplinkRole::Foreign, uplink, &label)?;
        let table = if multi {
            let table = per_link_table(&name);
            map.push(Section::RoutingTable, declare_table(&table));
            Tables::Single(table)
        } else if has_domestic {
            Tables::Single(foreign_table.clone())
        } else {
            Tables::WithMain(foreign_table.clone())
        };
        address(&mut map, &mut routes, uplink, &name, &label, &table, options);
        links.push(Link::new(&name, gateway(uplink, &name)));
    }

    if let Some(domestic) = &uplinks.domestic {
        let label = uplink_label(UplinkRole::Domestic, 0);
        let name = wire_interface(&mut map, intent, options, UplinkRole::Domestic, domestic, &label)?;
        let tables = Tables::MainAnd(UplinkRole::Domestic.table());
        address(&mut map, &mut routes, domestic, &name, &label, &tables, options);
    }

    let probes = &options.routing.probe_hosts;
    let vpn_links = vpn::link_count(&intent.vpn);
    let reserved = if vpn_links > 1 {
        vpn_links.min(probes.len())
    } else {
        0
    };
    let (vpn_probes, wan_probes) = probes.split_at(reserved);

    if multi {
        let class = LinkClass {
            label: "WAN",
            table: foreign_table.clone(),
            base_distance: options.routing.wan_distance,
            links: links.clone(),
        };
        let generated = multilink::generate(&class, uplinks.strategy.unwrap_or_default(), wan_probes);
        routes.extend(generated.routes);
        map.extend(Section::Mangle, generated.mangle);
    }

    map.extend(
        Section::Route,
        with_main_duplicates(&routes, &foreign_table, !has_domestic),
    );

    resolvers(&mut map, uplinks, options);

    let ctx = UplinkContext {
        has_domestic,
        foreign_gateway: links
            .first()
            .map(|link| link.gateway.clone())
            .unwrap_or_else(|| uplinks.foreign.interface.clone()),
        probes: vpn_probes,
    };
    let vpn_map = vpn::build(&intent.vpn, &ctx, options)?;

    Ok(merge([map, vpn_map]))
}

/// Tables an uplink's default route goes into.
enum Tables {
    Single(String),
    /// The table, duplicated into main because no domestic uplink owns it.
    WithMain(String),
    /// Main first, then the table.
    MainAnd(String),
}

impl Tables {
    fn dhcp_value(&self) -> String {
        match self {
            Tables::Single(table) => table.clone(),
            Tables::WithMain(table) => format!("{table},{MAIN_TABLE}"),
            Tables::MainAnd(table) => format!("{MAIN_TABLE},{table}"),
        }
    }
}

fn ensure_unique(uplinks: &UplinkIntent) -> Result<(), CompileError> {
    let mut seen = HashSet::new();
    for (_, uplink) in uplinks.all() {
        if !seen.insert(uplink.interface.as_str()) {
            return Err(CompileError::DuplicateUplink {
                interface: uplink.interface.clone(),
            });
        }
    }
    Ok(())
}

/// `ForeignWAN`, `ForeignWAN2`, ..., `DomesticWAN`.
fn uplink_label(role: UplinkRole, idx: usize) -> String {
    if idx == 0 {
        format!("{role}WAN")
    } else {
        format!("{role}WAN{}", idx + 1)
    }
}

fn gateway(uplink: &Uplink, name: &str) -> String {
    match &uplink.addressing {
        Addressing::Static { gateway, .. } => gateway.clone(),
        Addressing::Dhcp => name.to_string(),
    }
}

/// Configure the physical interface and return the name it ends up with.
fn wire_interface(
    map: &mut CommandMap,
    intent: &NetworkIntent,
    options: &CompileOptions,
    role: UplinkRole,
    uplink: &Uplink,
    label: &str,
) -> Result<String, CompileError> {
    let name = match radio_band(intent, options, &uplink.interface) {
        Some(band) => {
            let context = format!("{role} uplink {}", uplink.interface);
            let station = uplink
                .station
                .as_ref()
                .ok_or_else(|| CompileError::missing(context, "station"))?;
            let name = station_interface_name(band, role);
            debug!(interface = %uplink.interface, name = %name, "radio uplink");
            map.push(
                Section::Wifi,
                Command::set(find_by("default-name", &uplink.interface))
                    .arg("configuration.country", &options.country)
                    .raw("configuration.mode", "station")
                    .arg("configuration.ssid", &station.ssid)
                    .arg("security.authentication-types", &options.wifi.authentication_types)
                    .arg("security.passphrase", &station.passphrase)
                    .flag("disabled", false)
                    .arg("name", &name)
                    .arg("comment", label),
            );
            name
        }
        None => {
            map.push(
                Section::Ethernet,
                Command::set(find_by("default-name", &uplink.interface)).arg("comment", label),
            );
            uplink.interface.clone()
        }
    };

    for list in [options.lists.wan.clone(), wan_list_name(role)] {
        map.push(
            Section::InterfaceListMember,
            Command::add().arg("list", list).arg("interface", &name),
        );
    }
    Ok(name)
}

fn address(
    map: &mut CommandMap,
    routes: &mut Vec<Route>,
    uplink: &Uplink,
    name: &str,
    label: &str,
    tables: &Tables,
    options: &CompileOptions,
) {
    let distance = options.routing.wan_distance;
    match &uplink.addressing {
        Addressing::Dhcp => map.push(
            Section::DhcpClient,
            Command::add()
                .arg("interface", name)
                .flag("add-default-route", true)
                .arg("default-route-tables", tables.dhcp_value())
                .arg("default-route-distance", distance)
                .flag("use-peer-dns", false)
                .arg("comment", label),
        ),
        Addressing::Static { address, gateway } => {
            map.push(
                Section::IpAddress,
                Command::add()
                    .arg("address", address)
                    .arg("interface", name)
                    .arg("comment", label),
            );
            let route = |table: &str| {
                Route::default_via(gateway, table)
                    .distance(distance)
                    .comment(label)
            };
            match tables {
                Tables::Single(table) | Tables::WithMain(table) => routes.push(route(table)),
                Tables::MainAnd(table) => {
                    routes.push(route(MAIN_TABLE));
                    routes.push(route(table));
                }
            }
        }
    }
}

/// DNS forwarders whose servers are pinned to their uplink.
fn resolvers(map: &mut CommandMap, uplinks: &UplinkIntent, options: &CompileOptions) {
    let foreign_servers = if uplinks.foreign.dns.is_empty() {
        &options.dns.foreign_servers
    } else {
        &uplinks.foreign.dns
    };
    forwarder(map, FOREIGN_DNS, foreign_servers, UplinkRole::Foreign);

    if let Some(domestic) = uplinks.domestic.as_ref().filter(|d| !d.dns.is_empty()) {
        forwarder(map, DOMESTIC_DNS, &domestic.dns, UplinkRole::Domestic);
    }
}

fn forwarder(map: &mut CommandMap, name: &str, servers: &[String], role: UplinkRole) {
    map.push(
        Section::DnsForwarders,
        Command::add()
            .arg("name", name)
            .arg("dns-servers", servers.join(",")),
    );

    let mut pinned = false;
    for server in servers {
        if server.trim().parse::<Ipv4Addr>().is_err() {
            debug!(server = %server, "resolver is not a literal IPv4 address; not pinned");
            continue;
        }
        pinned = true;
        map.push(
            Section::AddressList,
            Command::add()
                .arg("list", name)
                .arg("address", server.trim())
                .arg("comment", name),
        );
    }
    if pinned {
        map.push(
            Section::Mangle,
            Command::add()
                .raw("chain", "output")
                .raw("action", "mark-routing")
                .arg("new-routing-mark", role.table())
                .arg("dst-address-list", name)
                .raw("passthrough", "no")
                .arg("comment", name),
        );
    }
}
