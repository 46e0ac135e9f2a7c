use section_map::Command;
use tracing::warn;

use crate::error::CompileError;
use crate::intent::{TunnelIntent, TunnelKind};
use crate::section::{CommandMap, Section};

fn section(kind: TunnelKind) -> Section {
    match kind {
        TunnelKind::Eoip => Section::Eoip,
        TunnelKind::Gre => Section::Gre,
        TunnelKind::Ipip => Section::Ipip,
        TunnelKind::SixToFour => Section::SixToFour,
    }
}

/// Generic point-to-point tunnels.
pub fn build(tunnels: &[TunnelIntent]) -> Result<CommandMap, CompileError> {
    let mut map = CommandMap::new();

    for tunnel in tunnels {
        let mut cmd = Command::add()
            .arg("name", &tunnel.name)
            .arg_opt("local-address", tunnel.local_address.as_deref())
            .arg("remote-address", &tunnel.remote_address);

        match (tunnel.kind, tunnel.tunnel_id) {
            (TunnelKind::Eoip, Some(id)) => cmd = cmd.arg("tunnel-id", id),
            (TunnelKind::Eoip, None) => {
                return Err(CompileError::missing(
                    format!("eoip tunnel {}", tunnel.name),
                    "tunnel_id",
                ));
            }
            (kind, Some(_)) => {
                warn!(tunnel = %tunnel.name, kind = kind.as_str(), "tunnel_id only applies to eoip; ignored");
            }
            (_, None) => {}
        }

        if let Some(secret) = &tunnel.ipsec_secret {
            // IPsec-protected tunnels cannot use fast path.
            cmd = cmd.arg("ipsec-secret", secret).flag("allow-fast-path", false);
        }

        cmd = cmd
            .arg_opt("keepalive", tunnel.keepalive.as_deref())
            .arg_opt("mtu", tunnel.mtu)
            .arg_opt("comment", tunnel.comment.as_deref());
        map.push(section(tunnel.kind), cmd);

        if let Some(address) = &tunnel.address {
            map.push(
                Section::IpAddress,
                Command::add()
                    .arg("address", address)
                    .arg("interface", &tunnel.name)
                    .arg("comment", &tunnel.name),
            );
        }
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::error::CompileError;
    use crate::intent::{TunnelIntent, TunnelKind};
    use crate::section::Section;

    fn tunnel(kind: TunnelKind, name: &str) -> TunnelIntent {
        TunnelIntent {
            kind,
            name: name.to_string(),
            local_address: Some("192.0.2.2".to_string()),
            remote_address: "198.51.100.9".to_string(),
            ipsec_secret: None,
            tunnel_id: None,
            address: None,
            keepalive: None,
            mtu: None,
            comment: None,
        }
    }

    #[test]
    fn eoip_requires_tunnel_id() {
        let err = build(&[tunnel(TunnelKind::Eoip, "eoip-office")]).unwrap_err();
        assert_eq!(err, CompileError::missing("eoip tunnel eoip-office", "tunnel_id"));
    }

    #[test]
    fn ipsec_disables_fast_path() {
        let mut gre = tunnel(TunnelKind::Gre, "gre-dc");
        gre.ipsec_secret = Some("psk".to_string());
        gre.address = Some("172.16.0.1/30".to_string());
        let map = build(&[gre]).unwrap();
        assert_eq!(
            map.get(&Section::Gre),
            ["add name=gre-dc local-address=192.0.2.2 remote-address=198.51.100.9 ipsec-secret=psk allow-fast-path=no"]
        );
        assert_eq!(
            map.get(&Section::IpAddress),
            ["add address=172.16.0.1/30 interface=gre-dc comment=gre-dc"]
        );
    }

    #[test]
    fn six_to_four_lands_in_its_own_section() {
        let map = build(&[tunnel(TunnelKind::SixToFour, "6to4-he")]).unwrap();
        assert_eq!(map.get(&Section::SixToFour).len(), 1);
    }
}
