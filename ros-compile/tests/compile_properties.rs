use std::path::PathBuf;

use pretty_assertions::assert_eq;
use ros_compile::compile::{compile, compile_unnormalized};
use ros_compile::error::CompileError;
use ros_compile::intent::{load_intent, parse_intent, IntentFormat, NetworkIntent};
use ros_compile::intent::{Band, NetworkRole};
use ros_compile::options::default_options;
use ros_compile::radio::{plan, RadioKind};
use ros_compile::section::{CommandMap, Section};
use section_map::{merge, normalize};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn load(path: &str) -> NetworkIntent {
    load_intent(&fixture(path)).unwrap()
}

fn inline(raw: &str) -> NetworkIntent {
    parse_intent(raw, IntentFormat::Toml, "inline".to_string()).unwrap()
}

fn compiled(intent: &NetworkIntent) -> CommandMap {
    compile(intent, &default_options()).unwrap()
}

#[test]
fn split_network_gets_one_master_per_band() {
    let map = compiled(&load("fixtures/split-home.toml"));

    let masters: Vec<_> = map
        .get(&Section::Wifi)
        .iter()
        .filter(|line| line.starts_with("set [ find default-name="))
        .collect();
    assert_eq!(masters.len(), 2);
    assert!(masters[0].contains("configuration.ssid=\"Home 2.4\""));
    assert!(masters[1].contains("configuration.ssid=\"Home 5\""));

    assert_eq!(
        map.get(&Section::BridgePort),
        [
            "add bridge=LANBridgeSplit interface=wifi2.4-SplitLAN comment=Split",
            "add bridge=LANBridgeSplit interface=wifi5-SplitLAN comment=Split",
        ]
    );
    assert_eq!(
        map.get(&Section::WifiSteering),
        ["add name=Split rrm=yes wnm=yes"]
    );
}

#[test]
fn empty_wireless_disables_both_radios_only() {
    let map = compiled(&load("fixtures/empty.toml"));

    assert_eq!(
        map.get(&Section::Wifi),
        [
            "set [ find default-name=wifi2 ] disabled=yes",
            "set [ find default-name=wifi1 ] disabled=yes",
        ]
    );
    for section in [
        Section::Bridge,
        Section::BridgePort,
        Section::WifiSteering,
    ] {
        assert!(!map.contains(&section), "{section} should be absent");
    }
    assert!(!map
        .get(&Section::InterfaceListMember)
        .iter()
        .any(|line| line.contains("-LAN") || line.contains("list=LAN")));
}

#[test]
fn derived_names_agree_across_sections() {
    let map = compiled(&load("fixtures/full.toml"));
    let members = map.get(&Section::InterfaceListMember);
    let ports = map.get(&Section::BridgePort);

    for (iface, bridge, list) in [
        ("wifi2.4-ForeignLAN", "LANBridgeForeign", "FRN-LAN"),
        ("wifi5-Domestic-KidsLAN", "LANBridgeDomestic-Kids", "Domestic-Kids-LAN"),
        ("wifi5-VPNLAN", "LANBridgeVPN", "VPN-LAN"),
    ] {
        assert!(map
            .get(&Section::Wifi)
            .iter()
            .any(|line| line.contains(&format!("name={iface} "))));
        assert!(ports
            .iter()
            .any(|line| line.contains(&format!("bridge={bridge} interface={iface} "))));
        assert!(members
            .iter()
            .any(|line| line == &format!("add list={list} interface={iface}")));
        assert!(map
            .get(&Section::Bridge)
            .iter()
            .any(|line| line.starts_with(&format!("add name={bridge} "))));
    }

    // Disabled Split network: allocated, never bridged.
    assert!(map
        .get(&Section::Wifi)
        .iter()
        .any(|line| line.contains("name=wifi2.4-SplitLAN") && line.contains("disabled=yes")));
    assert!(!ports.iter().any(|line| line.contains("SplitLAN")));
}

#[test]
fn vpn_default_routes_are_duplicated_into_main_without_domestic() {
    let vpn_only = inline(
        r#"
[uplinks.foreign]
interface = "ether1"

[vpn.wireguard]
private_key = "a2V5"
peer_public_key = "cGVlcg=="
endpoint = "203.0.113.7"
address = "10.8.0.2/32"
"#,
    );
    let routes = compiled(&vpn_only).get(&Section::Route).to_vec();
    let dedicated = routes
        .iter()
        .filter(|r| r.contains("dst-address=0.0.0.0/0") && r.contains("routing-table=to-VPN"))
        .count();
    let main = routes
        .iter()
        .filter(|r| r.contains("routing-table=main"))
        .count();
    assert_eq!(dedicated, 1);
    assert_eq!(main, dedicated);

    let mut with_domestic = vpn_only.clone();
    with_domestic.uplinks.domestic = Some(ros_compile::intent::Uplink {
        interface: "ether2".to_string(),
        station: None,
        addressing: Default::default(),
        dns: Vec::new(),
    });
    let routes = compiled(&with_domestic).get(&Section::Route).to_vec();
    assert!(!routes.iter().any(|r| r.contains("routing-table=main")));
}

#[test]
fn sections_follow_canonical_order() {
    let map = compiled(&load("fixtures/full.toml"));
    let order: Vec<Section> = map.keys().copied().collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
    assert!(map.iter().all(|(_, lines)| !lines.is_empty()));
}

#[test]
fn empty_wireless_leaves_station_radio_alone() {
    let map = compiled(&inline(
        r#"
[uplinks.foreign]
interface = "wifi1"
station = { ssid = "Upstream", passphrase = "upstream-pass" }
"#,
    ));

    let wifi = map.get(&Section::Wifi);
    assert_eq!(wifi.len(), 2);
    assert!(wifi[0].starts_with("set [ find default-name=wifi1 ]"));
    assert!(wifi[0].contains("configuration.mode=station"));
    assert!(wifi[0].contains("disabled=no"));
    assert_eq!(wifi[1], "set [ find default-name=wifi2 ] disabled=yes");
    assert!(!wifi.iter().any(|line| line == "set [ find default-name=wifi1 ] disabled=yes"));
}

#[test]
fn allocation_follows_role_order_not_file_order() {
    let intent = inline(
        r#"
[uplinks.foreign]
interface = "ether1"

[wireless.set.split]
ssid = "Guests"
passphrase = "guest-pass"

[wireless.set.foreign]
ssid = "Home"
passphrase = "home-pass"
"#,
    );
    let radios = plan(&intent, &default_options());
    for band in Band::ALL {
        assert_eq!(radios.kind(NetworkRole::Foreign, band), Some(RadioKind::Master));
        assert_eq!(radios.kind(NetworkRole::Split, band), Some(RadioKind::Slave));
    }
}

#[test]
fn merge_is_associative_over_builder_output() {
    let options = default_options();
    let a = compile_unnormalized(&load("fixtures/split-home.toml"), &options).unwrap();
    let b = compile_unnormalized(&load("fixtures/full.toml"), &options).unwrap();
    let c = compile_unnormalized(&load("fixtures/empty.toml"), &options).unwrap();

    let nested = merge([merge([a.clone(), b.clone()]), c.clone()]);
    let flat = merge([a, b, c]);
    assert_eq!(nested, flat);
}

#[test]
fn normalization_is_idempotent_on_compiled_output() {
    let options = default_options();
    let intent = load("fixtures/full.toml");
    let raw = compile_unnormalized(&intent, &options).unwrap();
    let once = normalize(&raw);

    assert_eq!(normalize(&once), once);
    assert_eq!(compile(&intent, &options).unwrap(), once);
}

#[test]
fn load_balanced_vpn_clients_share_the_vpn_table() {
    let map = compiled(&load("fixtures/full.toml"));
    let tables = map.get(&Section::RoutingTable);
    for table in ["to-Foreign", "to-Domestic", "to-VPN", "to-wg-client", "to-ovpn-client"] {
        assert!(
            tables.contains(&format!("add name={table} fib")),
            "missing table {table}"
        );
    }
    let mangle = map.get(&Section::Mangle);
    assert!(mangle.iter().any(|r| r.contains("nth=2,1") && r.contains("routing-mark=to-VPN")));
    // The OpenVPN endpoint leaves through the domestic uplink.
    assert!(mangle.iter().any(|r| r.contains("new-routing-mark=to-Domestic")
        && r.contains("dst-address-list=ovpn-client-endpoint")));
}

#[test]
fn missing_credentials_fail_the_whole_compile() {
    let err = compile(&load("fixtures/ikev2-missing-secret.toml"), &default_options()).unwrap_err();
    assert_eq!(
        err,
        CompileError::MissingField {
            context: "ikev2 client ikev2-client".to_string(),
            field: "secret",
        }
    );
}
