use section_map::{find_by, Command};

use crate::intent::{Band, NetworkRole, WirelessIntent, WirelessNetwork};
use crate::naming::{resolve, ssid_list, NetworkNames};
use crate::options::CompileOptions;
use crate::radio::{RadioKind, RadioPlan};
use crate::section::{CommandMap, Section};

/// Access-point interfaces, bridge ports, list membership and steering.
///
/// Every requested network gets one interface per band, disabled ones
/// included. Only enabled networks are bridged, listed and steered. With no
/// networks at all both radios are switched off, except a radio already used
/// as an uplink.
pub fn build(wireless: &WirelessIntent, plan: &RadioPlan, options: &CompileOptions) -> CommandMap {
    let networks = wireless.networks();
    let mut map = CommandMap::new();

    if networks.is_empty() {
        for band in Band::ALL {
            if *plan.consumed.get(band) {
                continue;
            }
            map.push(
                Section::Wifi,
                Command::set(find_by("default-name", options.radio(band))).flag("disabled", true),
            );
        }
        return map;
    }

    let resolved: Vec<(NetworkRole, &WirelessNetwork, NetworkNames)> = networks
        .into_iter()
        .map(|(role, network)| (role, network, resolve(role, network.name.as_deref())))
        .collect();

    for (role, network, names) in &resolved {
        let ssids = ssid_list(&network.ssid, network.split_band_naming);
        for band in Band::ALL {
            let Some(kind) = plan.kind(*role, band) else {
                continue;
            };
            map.push(
                Section::Wifi,
                access_point(kind, band, network, names, ssids.get(band), options),
            );
        }
    }

    let mut steering = Vec::new();
    for (_, _, names) in resolved.iter().filter(|(_, n, _)| n.enabled()) {
        for band in Band::ALL {
            map.push(
                Section::BridgePort,
                Command::add()
                    .arg("bridge", &names.bridge)
                    .arg("interface", names.interface(band))
                    .arg("comment", &names.short),
            );
        }
        for list in [&names.list, &options.lists.lan] {
            for band in Band::ALL {
                map.push(
                    Section::InterfaceListMember,
                    Command::add()
                        .arg("list", list)
                        .arg("interface", names.interface(band)),
                );
            }
        }
        map.push(
            Section::WifiSteering,
            Command::add()
                .arg("name", &names.steering)
                .flag("rrm", true)
                .flag("wnm", true),
        );
        for band in Band::ALL {
            steering.push(
                Command::set(find_by("name", &names.interface(band)))
                    .arg("steering", &names.steering),
            );
        }
    }
    map.extend(Section::Wifi, steering);

    map
}

fn access_point(
    kind: RadioKind,
    band: Band,
    network: &WirelessNetwork,
    names: &NetworkNames,
    ssid: &str,
    options: &CompileOptions,
) -> Command {
    let radio = find_by("default-name", options.radio(band));
    let cmd = match kind {
        RadioKind::Master => Command::set(radio),
        RadioKind::Slave => Command::add().raw("master-interface", radio),
    };
    cmd.arg("configuration.country", &options.country)
        .raw("configuration.mode", "ap")
        .arg("configuration.ssid", ssid)
        .flag("configuration.hide-ssid", network.hidden)
        .arg("security.authentication-types", &options.wifi.authentication_types)
        .arg("security.passphrase", &network.passphrase)
        .flag("disabled", network.disabled)
        .arg("name", names.interface(band))
        .arg("comment", &names.interface_suffix)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::build;
    use crate::intent::{BandPair, NetworkRole, NetworkSet, WirelessIntent, WirelessNetwork};
    use crate::options::default_options;
    use crate::radio::allocate;
    use crate::section::Section;

    fn network(ssid: &str, disabled: bool) -> WirelessNetwork {
        WirelessNetwork {
            ssid: ssid.to_string(),
            passphrase: "secret123".to_string(),
            hidden: false,
            disabled,
            split_band_naming: false,
            name: None,
        }
    }

    #[test]
    fn empty_set_disables_both_radios() {
        let plan = allocate(&[], BandPair::new(false, false));
        let map = build(&WirelessIntent::default(), &plan, &default_options());
        assert_eq!(
            map.get(&Section::Wifi),
            [
                "set [ find default-name=wifi2 ] disabled=yes",
                "set [ find default-name=wifi1 ] disabled=yes",
            ]
        );
        assert_eq!(map.line_count(), 2);
    }

    #[test]
    fn empty_set_keeps_uplink_radio_running() {
        let plan = allocate(&[], BandPair::new(false, true));
        let map = build(&WirelessIntent::default(), &plan, &default_options());
        assert_eq!(
            map.get(&Section::Wifi),
            ["set [ find default-name=wifi2 ] disabled=yes"]
        );
    }

    #[test]
    fn second_network_becomes_slave() {
        let wireless = WirelessIntent::Set(NetworkSet {
            foreign: Some(network("Home", false)),
            vpn: Some(network("Private", false)),
            ..Default::default()
        });
        let plan = allocate(
            &[NetworkRole::Foreign, NetworkRole::Vpn],
            BandPair::new(false, false),
        );
        let map = build(&wireless, &plan, &default_options());
        let wifi = map.get(&Section::Wifi);
        assert!(wifi[0].starts_with("set [ find default-name=wifi2 ] configuration.country=\"United States\" configuration.mode=ap configuration.ssid=Home"));
        assert!(wifi[2].starts_with("add master-interface=[ find default-name=wifi2 ] "));
        assert!(wifi[3].ends_with("name=wifi5-VPNLAN comment=VPNLAN"));
        assert_eq!(wifi[4], "set [ find name=wifi2.4-ForeignLAN ] steering=Foreign");
        assert_eq!(map.get(&Section::WifiSteering).len(), 2);
    }

    #[test]
    fn disabled_network_is_allocated_but_not_bridged() {
        let wireless = WirelessIntent::Set(NetworkSet {
            domestic: Some(network("Local", true)),
            ..Default::default()
        });
        let plan = allocate(&[NetworkRole::Domestic], BandPair::new(false, false));
        let map = build(&wireless, &plan, &default_options());
        assert_eq!(map.get(&Section::Wifi).len(), 2);
        assert!(map.get(&Section::Wifi)[0].contains("disabled=yes"));
        assert!(map.get(&Section::BridgePort).is_empty());
        assert!(map.get(&Section::InterfaceListMember).is_empty());
        assert!(map.get(&Section::WifiSteering).is_empty());
    }
}
