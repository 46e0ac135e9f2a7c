use section_map::Command;
use tracing::{debug, warn};

use super::VPN_TABLE;
use crate::intent::{NetworkIntent, NetworkRole, UplinkRole};
use crate::naming::{resolve, NetworkNames};
use crate::options::CompileOptions;
use crate::section::{CommandMap, Section};

/// Bridges, interface lists and routing policy for each enabled network.
pub fn build(intent: &NetworkIntent, options: &CompileOptions) -> CommandMap {
    let mut map = CommandMap::new();
    let enabled = intent.wireless.enabled_networks();
    if enabled.is_empty() {
        return map;
    }

    let policy = Policy {
        domestic_table: if intent.uplinks.has_domestic() {
            UplinkRole::Domestic.table()
        } else {
            UplinkRole::Foreign.table()
        },
        vpn_table: if intent.vpn.is_empty() {
            None
        } else {
            Some(VPN_TABLE.to_string())
        },
        domestic_targets: &options.lists.domestic_targets,
    };

    map.push(
        Section::InterfaceList,
        Command::add().arg("name", &options.lists.lan),
    );

    for (role, network) in enabled {
        let names = resolve(role, network.name.as_deref());
        debug!(role = %role, bridge = %names.bridge, "lan segment");

        map.push(
            Section::Bridge,
            Command::add()
                .arg("name", &names.bridge)
                .arg("comment", &names.short),
        );
        map.push(
            Section::InterfaceList,
            Command::add().arg("name", &names.list),
        );
        for list in [&names.list, &options.lists.lan] {
            map.push(
                Section::InterfaceListMember,
                Command::add()
                    .arg("list", list)
                    .arg("interface", &names.bridge),
            );
        }
        map.extend(Section::Mangle, policy.rules(role, &names));
    }

    map
}

struct Policy<'a> {
    domestic_table: String,
    vpn_table: Option<String>,
    domestic_targets: &'a str,
}

impl Policy<'_> {
    fn vpn_table(&self, names: &NetworkNames) -> String {
        match &self.vpn_table {
            Some(table) => table.clone(),
            None => {
                warn!(network = %names.base, "no vpn client configured; routing via Foreign");
                UplinkRole::Foreign.table()
            }
        }
    }

    fn rules(&self, role: NetworkRole, names: &NetworkNames) -> Vec<String> {
        match role {
            NetworkRole::Foreign => vec![mark(names, &UplinkRole::Foreign.table(), None)],
            NetworkRole::Domestic => vec![mark(names, &self.domestic_table, None)],
            NetworkRole::Vpn => vec![mark(names, &self.vpn_table(names), None)],
            NetworkRole::Split => {
                let rest = self.vpn_table(names);
                vec![
                    mark(names, &self.domestic_table, Some(self.domestic_targets.to_string())),
                    mark(names, &rest, Some(format!("!{}", self.domestic_targets))),
                ]
            }
        }
    }
}

fn mark(names: &NetworkNames, table: &str, dst_list: Option<String>) -> String {
    Command::add()
        .raw("chain", "prerouting")
        .raw("action", "mark-routing")
        .arg("new-routing-mark", table)
        .arg("in-interface-list", &names.list)
        .raw("dst-address-type", "!local")
        .arg_opt("dst-address-list", dst_list)
        .raw("passthrough", "yes")
        .arg("comment", &names.base)
        .to_string()
}
