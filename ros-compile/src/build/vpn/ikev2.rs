use section_map::Command;

use crate::build::route::DEFAULT_DST;
use crate::error::{required, CompileError};
use crate::intent::{Ikev2AuthMethod, Ikev2Client};
use crate::section::{CommandMap, Section};

/// IPsec objects of a policy-based IKEv2 client, all named after the client.
///
/// The identity is validated before anything is written, so a missing
/// credential leaves the map untouched.
pub(super) fn emit(map: &mut CommandMap, client: &Ikev2Client, name: &str) -> Result<(), CompileError> {
    let identity = identity(client, name)?;

    map.push(Section::IpsecProfile, Command::add().arg("name", name));
    map.push(
        Section::IpsecProposal,
        Command::add().arg("name", name).raw("pfs-group", "none"),
    );
    map.push(
        Section::IpsecModeConfig,
        Command::add()
            .arg("name", name)
            .flag("responder", false)
            .arg("connection-mark", name),
    );
    map.push(Section::IpsecPolicyGroup, Command::add().arg("name", name));
    map.push(
        Section::IpsecPeer,
        Command::add()
            .arg("name", name)
            .arg("address", client.server.trim())
            .raw("exchange-mode", "ike2")
            .arg("profile", name),
    );
    map.push(Section::IpsecIdentity, identity);
    map.push(
        Section::IpsecPolicy,
        Command::add()
            .arg("group", name)
            .arg("proposal", name)
            .flag("template", true)
            .arg("src-address", DEFAULT_DST)
            .arg("dst-address", DEFAULT_DST),
    );
    Ok(())
}

fn identity(client: &Ikev2Client, name: &str) -> Result<Command, CompileError> {
    let context = format!("ikev2 client {name}");
    let mut cmd = Command::add()
        .arg("peer", name)
        .raw("auth-method", client.auth_method.as_str());

    cmd = match client.auth_method {
        Ikev2AuthMethod::PreSharedKey => {
            let secret = required(client.secret.as_ref(), &context, "secret")?;
            cmd.arg("secret", secret)
        }
        Ikev2AuthMethod::Eap => {
            let username = required(client.username.as_ref(), &context, "username")?;
            let password = required(client.password.as_ref(), &context, "password")?;
            let methods = (!client.eap_methods.is_empty()).then(|| client.eap_methods.join(","));
            cmd.arg_opt("eap-methods", methods)
                .arg("username", username)
                .arg("password", password)
                .arg_opt("certificate", client.certificate.as_deref())
        }
        Ikev2AuthMethod::DigitalSignature => {
            let certificate = required(client.certificate.as_ref(), &context, "certificate")?;
            cmd.arg("certificate", certificate)
        }
    };

    Ok(cmd
        .arg_opt("my-id", client.my_id.as_deref())
        .arg_opt("remote-id", client.remote_id.as_deref())
        .raw("generate-policy", "port-strict")
        .arg("mode-config", name)
        .arg("policy-template-group", name))
}

#[cfg(test)]
mod tests {
    use super::emit;
    use crate::error::CompileError;
    use crate::intent::{Ikev2AuthMethod, Ikev2Client};
    use crate::section::{CommandMap, Section};

    fn client(auth_method: Ikev2AuthMethod) -> Ikev2Client {
        Ikev2Client {
            name: None,
            server: "ike.example.net".to_string(),
            auth_method,
            secret: None,
            username: None,
            password: None,
            eap_methods: Vec::new(),
            certificate: None,
            my_id: None,
            remote_id: None,
            route_via: Default::default(),
        }
    }

    #[test]
    fn each_auth_method_requires_its_credential() {
        let cases = [
            (Ikev2AuthMethod::PreSharedKey, "secret"),
            (Ikev2AuthMethod::Eap, "username"),
            (Ikev2AuthMethod::DigitalSignature, "certificate"),
        ];
        for (method, field) in cases {
            let mut map = CommandMap::new();
            let err = emit(&mut map, &client(method), "ikev2-client").unwrap_err();
            assert!(
                matches!(err, CompileError::MissingField { field: f, .. } if f == field),
                "{method:?}"
            );
            assert!(map.is_empty());
        }
    }

    #[test]
    fn eap_identity_lists_methods() {
        let mut c = client(Ikev2AuthMethod::Eap);
        c.username = Some("bob".to_string());
        c.password = Some("pw".to_string());
        c.eap_methods = vec!["eap-mschapv2".to_string(), "eap-tls".to_string()];

        let mut map = CommandMap::new();
        emit(&mut map, &c, "ikev2-client").unwrap();
        assert_eq!(
            map.get(&Section::IpsecIdentity),
            ["add peer=ikev2-client auth-method=eap eap-methods=eap-mschapv2,eap-tls username=bob password=pw generate-policy=port-strict mode-config=ikev2-client policy-template-group=ikev2-client"]
        );
        assert_eq!(map.get(&Section::IpsecPeer).len(), 1);
    }
}
