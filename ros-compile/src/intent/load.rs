use std::fs;
use std::path::Path;

use thiserror::Error;

use super::NetworkIntent;

/// Errors returned when loading an intent file.
#[derive(Debug, Error)]
pub enum IntentLoadError {
    #[error("failed to read intent file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse intent file {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("failed to parse intent file {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("unsupported intent file extension for {path} (expected .toml or .json)")]
    UnknownFormat { path: String },
}

/// Serialization of an intent document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentFormat {
    Toml,
    Json,
}

impl IntentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(IntentFormat::Toml),
            "json" => Some(IntentFormat::Json),
            _ => None,
        }
    }
}

/// Load a network intent from a `.toml` or `.json` file.
pub fn load_intent(path: &Path) -> Result<NetworkIntent, IntentLoadError> {
    let display = path.display().to_string();
    let format = IntentFormat::from_path(path).ok_or_else(|| IntentLoadError::UnknownFormat {
        path: display.clone(),
    })?;
    let raw = fs::read_to_string(path).map_err(|source| IntentLoadError::Io {
        path: display.clone(),
        source,
    })?;
    parse_intent(&raw, format, display)
}

/// Parse an intent document already held in memory.
pub fn parse_intent(
    raw: &str,
    format: IntentFormat,
    path: String,
) -> Result<NetworkIntent, IntentLoadError> {
    match format {
        IntentFormat::Toml => {
            toml::from_str(raw).map_err(|source| IntentLoadError::Toml { path, source })
        }
        IntentFormat::Json => {
            serde_json::from_str(raw).map_err(|source| IntentLoadError::Json { path, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{parse_intent, IntentFormat, IntentLoadError};
    use crate::intent::{Addressing, NetworkRole, WirelessIntent};

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            IntentFormat::from_path(Path::new("home.TOML")),
            Some(IntentFormat::Toml)
        );
        assert_eq!(
            IntentFormat::from_path(Path::new("home.json")),
            Some(IntentFormat::Json)
        );
        assert_eq!(IntentFormat::from_path(Path::new("home.yaml")), None);
    }

    #[test]
    fn parses_minimal_toml_intent() {
        let raw = r#"
[uplinks.foreign]
interface = "ether1"

[wireless.set.split]
ssid = "Home"
passphrase = "secret123"
"#;
        let intent = parse_intent(raw, IntentFormat::Toml, "inline".into()).unwrap();
        assert_eq!(intent.uplinks.foreign.interface, "ether1");
        assert_eq!(intent.uplinks.foreign.addressing, Addressing::Dhcp);
        match &intent.wireless {
            WirelessIntent::Set(set) => assert!(set.split.is_some()),
            other => panic!("unexpected wireless intent {other:?}"),
        }
        let enabled: Vec<_> = intent
            .wireless
            .enabled_networks()
            .into_iter()
            .map(|(role, _)| role)
            .collect();
        assert_eq!(enabled, vec![NetworkRole::Split]);
    }

    #[test]
    fn parses_single_network_json_intent() {
        let raw = r#"{
            "uplinks": { "foreign": { "interface": "ether1" } },
            "wireless": { "single": { "ssid": "Cafe", "passphrase": "pw" } }
        }"#;
        let intent = parse_intent(raw, IntentFormat::Json, "inline".into()).unwrap();
        assert_eq!(intent.wireless.networks()[0].0, NetworkRole::Foreign);
    }

    #[test]
    fn missing_foreign_uplink_is_a_parse_error() {
        let err = parse_intent("[wireless]\n", IntentFormat::Toml, "x.toml".into()).unwrap_err();
        assert!(matches!(err, IntentLoadError::Toml { .. }));
        assert!(err.to_string().contains("x.toml"));
    }
}
