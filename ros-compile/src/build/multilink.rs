//! Routing across several links of the same purpose.
//!
//! A link class (the VPN clients, or the Foreign uplinks) owns one dedicated
//! table. Each link additionally owns a per-link table holding its own
//! default route; the generator fills the class table and, for load
//! balancing, the mangle rules that pin connections to a per-link table.

use section_map::Command;
use tracing::debug;

use super::route::Route;
use crate::intent::{BalanceMethod, MultiLinkMode, MultiLinkStrategy};

/// Scopes that let a default route resolve recursively through a probe host.
const PROBE_SCOPE: u32 = 10;
const RECURSIVE_TARGET_SCOPE: u32 = 11;

/// One member of a link class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Interface carrying the link.
    pub interface: String,
    /// Next hop: an address, or the interface itself for point-to-point links.
    pub gateway: String,
}

impl Link {
    pub fn new(interface: impl Into<String>, gateway: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            gateway: gateway.into(),
        }
    }

    /// Per-link table name.
    pub fn table(&self) -> String {
        per_link_table(&self.interface)
    }

    fn connection_mark(&self) -> String {
        format!("{}-conn", self.interface)
    }
}

pub fn per_link_table(interface: &str) -> String {
    format!("to-{interface}")
}

/// Links sharing one purpose and one dedicated table.
#[derive(Debug, Clone)]
pub struct LinkClass {
    /// Label used in comments (`VPN`, `WAN`).
    pub label: &'static str,
    pub table: String,
    pub base_distance: u32,
    pub links: Vec<Link>,
}

/// Routes and rules produced for a link class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiLinkRouting {
    /// Routes for the class table and per-link backstops, in emission order.
    pub routes: Vec<Route>,
    /// `/ip firewall mangle` lines.
    pub mangle: Vec<String>,
}

/// Generate routing for a class with more than one link.
///
/// `probes` supplies one recursive next hop per link for failover; links
/// beyond the available probes fall back to direct gateway checks.
pub fn generate(class: &LinkClass, strategy: MultiLinkStrategy, probes: &[String]) -> MultiLinkRouting {
    debug!(
        class = class.label,
        links = class.links.len(),
        mode = ?strategy.mode,
        "generating multi-link routing"
    );

    let mut out = MultiLinkRouting::default();
    match strategy.mode {
        MultiLinkMode::Failover => {
            out.routes = failover_chain(class, probes);
        }
        MultiLinkMode::LoadBalance => {
            out.mangle = balance_rules(class, strategy.balance);
            out.routes = ecmp_routes(class);
        }
        MultiLinkMode::Both => {
            out.mangle = balance_rules(class, strategy.balance);
            out.routes = failover_chain(class, probes);
            out.routes.extend(backstop_routes(class));
        }
    }
    out
}

/// Descending-priority chain in the class table.
fn failover_chain(class: &LinkClass, probes: &[String]) -> Vec<Route> {
    let mut routes = Vec::new();
    for (idx, link) in class.links.iter().enumerate() {
        let distance = class.base_distance + idx as u32;
        let comment = format!("{} failover {}", class.label, link.interface);
        match probes.get(idx) {
            Some(probe) => {
                routes.push(
                    Route::host(probe, &link.gateway, &class.table)
                        .scope(PROBE_SCOPE)
                        .comment(comment.clone()),
                );
                routes.push(
                    Route::default_via(probe.as_str(), &class.table)
                        .distance(distance)
                        .target_scope(RECURSIVE_TARGET_SCOPE)
                        .check_gateway()
                        .comment(comment),
                );
            }
            None => {
                routes.push(
                    Route::default_via(&link.gateway, &class.table)
                        .distance(distance)
                        .check_gateway()
                        .comment(comment),
                );
            }
        }
    }
    routes
}

/// Equal-distance default routes in the class table.
fn ecmp_routes(class: &LinkClass) -> Vec<Route> {
    class
        .links
        .iter()
        .map(|link| {
            Route::default_via(&link.gateway, &class.table)
                .distance(class.base_distance)
                .check_gateway()
                .comment(format!("{} balance {}", class.label, link.interface))
        })
        .collect()
}

/// In each per-link table, the other links at increasing distance.
fn backstop_routes(class: &LinkClass) -> Vec<Route> {
    let mut routes = Vec::new();
    for link in &class.links {
        let others = class.links.iter().filter(|other| other.interface != link.interface);
        for (offset, other) in others.enumerate() {
            routes.push(
                Route::default_via(&other.gateway, link.table())
                    .distance(class.base_distance + 1 + offset as u32)
                    .check_gateway()
                    .comment(format!("{} backstop {}", class.label, link.interface)),
            );
        }
    }
    routes
}

/// Mark new connections to a link, then route marked connections through it.
fn balance_rules(class: &LinkClass, method: BalanceMethod) -> Vec<String> {
    let count = class.links.len();
    let mut marks = Vec::with_capacity(count);
    let mut routing = Vec::with_capacity(count);

    for (idx, link) in class.links.iter().enumerate() {
        let selector = match method {
            BalanceMethod::Classifier => (
                "per-connection-classifier",
                format!("both-addresses:{count}/{idx}"),
            ),
            BalanceMethod::RoundRobin => ("nth", format!("{count},{}", idx + 1)),
        };
        marks.push(
            Command::add()
                .raw("chain", "prerouting")
                .raw("action", "mark-connection")
                .arg("new-connection-mark", link.connection_mark())
                .raw("passthrough", "yes")
                .arg("routing-mark", &class.table)
                .raw("connection-mark", "no-mark")
                .raw(selector.0, selector.1)
                .arg("comment", format!("{} balance {}", class.label, link.interface))
                .to_string(),
        );
        routing.push(
            Command::add()
                .raw("chain", "prerouting")
                .raw("action", "mark-routing")
                .arg("new-routing-mark", link.table())
                .raw("passthrough", "no")
                .arg("routing-mark", &class.table)
                .arg("connection-mark", link.connection_mark())
                .arg("comment", format!("{} balance {}", class.label, link.interface))
                .to_string(),
        );
    }

    marks.extend(routing);
    marks
}

#[cfg(test)]
mod tests {
    use super::{generate, Link, LinkClass};
    use crate::intent::{BalanceMethod, MultiLinkMode, MultiLinkStrategy};

    fn class() -> LinkClass {
        LinkClass {
            label: "VPN",
            table: "to-VPN".to_string(),
            base_distance: 1,
            links: vec![
                Link::new("wg-client", "wg-client"),
                Link::new("ovpn-client", "ovpn-client"),
            ],
        }
    }

    fn probes() -> Vec<String> {
        vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()]
    }

    #[test]
    fn failover_builds_recursive_chain() {
        let out = generate(&class(), MultiLinkStrategy::default(), &probes());
        assert!(out.mangle.is_empty());
        assert_eq!(out.routes.len(), 4);
        assert_eq!(
            out.routes[0].command().to_string(),
            r#"add dst-address=1.1.1.1/32 gateway=wg-client scope=10 routing-table=to-VPN comment="VPN failover wg-client""#
        );
        assert_eq!(out.routes[3].gateway, "8.8.8.8");
        assert_eq!(out.routes[3].distance, Some(2));
        assert!(out.routes.iter().all(|r| r.table == "to-VPN"));
    }

    #[test]
    fn failover_without_probes_checks_gateways_directly() {
        let out = generate(&class(), MultiLinkStrategy::default(), &[]);
        assert_eq!(out.routes.len(), 2);
        assert!(out.routes.iter().all(|r| r.check_gateway && r.is_default()));
    }

    #[test]
    fn round_robin_marks_every_nth_connection() {
        let strategy = MultiLinkStrategy {
            mode: MultiLinkMode::LoadBalance,
            balance: BalanceMethod::RoundRobin,
        };
        let out = generate(&class(), strategy, &probes());
        assert_eq!(out.mangle.len(), 4);
        assert!(out.mangle[0].contains("nth=2,1"));
        assert!(out.mangle[1].contains("nth=2,2"));
        assert!(out.mangle[2].contains("new-routing-mark=to-wg-client"));
        assert!(out.routes.iter().all(|r| r.distance == Some(1)));
    }

    #[test]
    fn both_adds_backstops_in_per_link_tables() {
        let strategy = MultiLinkStrategy {
            mode: MultiLinkMode::Both,
            balance: BalanceMethod::Classifier,
        };
        let out = generate(&class(), strategy, &probes());
        assert!(out.mangle[0].contains("per-connection-classifier=both-addresses:2/0"));
        let backstops: Vec<_> = out
            .routes
            .iter()
            .filter(|r| r.table.starts_with("to-") && r.table != "to-VPN")
            .collect();
        assert_eq!(backstops.len(), 2);
        assert_eq!(backstops[0].table, "to-wg-client");
        assert_eq!(backstops[0].gateway, "ovpn-client");
    }
}
