use section_map::Command;

use crate::intent::WireguardClient;
use crate::section::{CommandMap, Section};

pub(super) fn emit(map: &mut CommandMap, client: &WireguardClient, name: &str) {
    map.push(
        Section::Wireguard,
        Command::add()
            .arg("name", name)
            .arg("private-key", &client.private_key)
            .arg_opt("listen-port", client.listen_port)
            .arg_opt("mtu", client.mtu)
            .arg("comment", name),
    );
    map.push(
        Section::WireguardPeers,
        Command::add()
            .arg("interface", name)
            .arg("public-key", &client.peer_public_key)
            .arg_opt("preshared-key", client.preshared_key.as_deref())
            .arg("endpoint-address", client.endpoint.trim())
            .arg("endpoint-port", client.endpoint_port)
            .arg("allowed-address", &client.allowed_address)
            .arg("persistent-keepalive", &client.keepalive)
            .arg("comment", name),
    );
    map.push(
        Section::IpAddress,
        Command::add()
            .arg("address", &client.address)
            .arg("interface", name)
            .arg("comment", name),
    );
}
