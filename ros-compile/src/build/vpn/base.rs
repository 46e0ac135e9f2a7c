use section_map::Command;

use super::endpoint::route_endpoint;
use super::VpnClient;
use crate::build::route::Route;
use crate::build::UplinkContext;
use crate::options::CompileOptions;
use crate::section::{CommandMap, Section};

/// Wiring shared by every client regardless of protocol.
///
/// Interface clients join the WAN lists, get a default route into `table`
/// and a masquerade rule. Policy-based clients mark connections routed
/// through `table` so their mode-config policy picks them up.
pub(super) fn wire(
    map: &mut CommandMap,
    routes: &mut Vec<Route>,
    client: &VpnClient<'_>,
    table: &str,
    ctx: &UplinkContext<'_>,
    options: &CompileOptions,
) {
    let name = client.name();
    route_endpoint(map, &name, client.endpoint(), client.route_via(), ctx);

    if !client.has_interface() {
        map.push(
            Section::Mangle,
            Command::add()
                .raw("chain", "prerouting")
                .raw("action", "mark-connection")
                .arg("new-connection-mark", &name)
                .raw("passthrough", "yes")
                .arg("routing-mark", table)
                .arg("comment", &name),
        );
        return;
    }

    for list in [&options.lists.wan, &options.lists.vpn_wan] {
        map.push(
            Section::InterfaceListMember,
            Command::add().arg("list", list).arg("interface", &name),
        );
    }

    routes.push(
        Route::default_via(&name, table)
            .distance(options.routing.vpn_distance)
            .comment(&name),
    );

    map.push(
        Section::Nat,
        Command::add()
            .raw("chain", "srcnat")
            .raw("action", "masquerade")
            .arg("out-interface", &name)
            .arg("comment", &name),
    );
}
