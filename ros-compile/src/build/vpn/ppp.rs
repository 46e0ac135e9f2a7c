//! Clients dialing a server with a user name and password.
//!
//! Every client is created with `add-default-route=no`; routing is owned by
//! the base wiring.

use section_map::Command;

use crate::error::{required, CompileError};
use crate::intent::{L2tpClient, OpenVpnClient, PptpClient, SstpClient};
use crate::section::{CommandMap, Section};

pub(super) fn emit_openvpn(map: &mut CommandMap, client: &OpenVpnClient, name: &str) {
    map.push(
        Section::OvpnClient,
        Command::add()
            .arg("name", name)
            .arg("connect-to", client.server.trim())
            .arg("port", client.port)
            .raw("protocol", client.transport.as_str())
            .arg("user", &client.user)
            .arg("password", &client.password)
            .arg_opt("certificate", client.certificate.as_deref())
            .arg("cipher", &client.cipher)
            .arg("auth", &client.auth)
            .flag("add-default-route", false)
            .flag("disabled", false)
            .arg("comment", name),
    );
}

pub(super) fn emit_l2tp(
    map: &mut CommandMap,
    client: &L2tpClient,
    name: &str,
) -> Result<(), CompileError> {
    let mut cmd = Command::add()
        .arg("name", name)
        .arg("connect-to", client.server.trim())
        .arg("user", &client.user)
        .arg("password", &client.password)
        .flag("use-ipsec", client.use_ipsec);
    if client.use_ipsec {
        let context = format!("l2tp client {name}");
        let secret = required(client.ipsec_secret.as_ref(), &context, "ipsec_secret")?;
        cmd = cmd.arg("ipsec-secret", secret);
    }
    map.push(
        Section::L2tpClient,
        cmd.flag("add-default-route", false)
            .flag("disabled", false)
            .arg("comment", name),
    );
    Ok(())
}

pub(super) fn emit_pptp(map: &mut CommandMap, client: &PptpClient, name: &str) {
    map.push(
        Section::PptpClient,
        Command::add()
            .arg("name", name)
            .arg("connect-to", client.server.trim())
            .arg("user", &client.user)
            .arg("password", &client.password)
            .flag("add-default-route", false)
            .flag("disabled", false)
            .arg("comment", name),
    );
}

pub(super) fn emit_sstp(map: &mut CommandMap, client: &SstpClient, name: &str) {
    map.push(
        Section::SstpClient,
        Command::add()
            .arg("name", name)
            .arg("connect-to", client.server.trim())
            .arg("port", client.port)
            .arg("user", &client.user)
            .arg("password", &client.password)
            .flag("verify-server-certificate", client.verify_server_certificate)
            .flag("add-default-route", false)
            .flag("disabled", false)
            .arg("comment", name),
    );
}

#[cfg(test)]
mod tests {
    use super::emit_l2tp;
    use crate::error::CompileError;
    use crate::intent::L2tpClient;
    use crate::section::{CommandMap, Section};

    fn l2tp(use_ipsec: bool, secret: Option<&str>) -> L2tpClient {
        L2tpClient {
            name: None,
            server: "l2tp.example.net".to_string(),
            user: "alice".to_string(),
            password: "pw".to_string(),
            use_ipsec,
            ipsec_secret: secret.map(str::to_string),
            route_via: Default::default(),
        }
    }

    #[test]
    fn ipsec_without_secret_is_rejected() {
        let mut map = CommandMap::new();
        let err = emit_l2tp(&mut map, &l2tp(true, None), "l2tp-client").unwrap_err();
        assert_eq!(
            err,
            CompileError::MissingField {
                context: "l2tp client l2tp-client".to_string(),
                field: "ipsec_secret",
            }
        );
        assert!(map.is_empty());
    }

    #[test]
    fn ipsec_secret_is_emitted_when_enabled() {
        let mut map = CommandMap::new();
        emit_l2tp(&mut map, &l2tp(true, Some("psk")), "l2tp-client").unwrap();
        assert_eq!(
            map.get(&Section::L2tpClient),
            ["add name=l2tp-client connect-to=l2tp.example.net user=alice password=pw use-ipsec=yes ipsec-secret=psk add-default-route=no disabled=no comment=l2tp-client"]
        );
    }
}
