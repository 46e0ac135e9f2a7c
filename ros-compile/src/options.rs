use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::intent::{Band, BandPair};

/// Device-level constants the builders depend on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompileOptions {
    /// Regulatory country written on every access-point line.
    pub country: String,
    /// Default physical names of the two radios.
    pub radios: BandPair<String>,
    pub wifi: WifiOptions,
    pub lists: ListOptions,
    pub dns: DnsOptions,
    pub routing: RoutingOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WifiOptions {
    pub authentication_types: String,
}

/// Names of the shared interface and address lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListOptions {
    pub lan: String,
    pub wan: String,
    pub vpn_wan: String,
    pub domestic_targets: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DnsOptions {
    /// Resolvers reached through the Foreign uplink when an uplink names none.
    pub foreign_servers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingOptions {
    /// Hosts used as recursive next hops by failover chains, one per link.
    pub probe_hosts: Vec<String>,
    /// Base distance of VPN class routes.
    pub vpn_distance: u32,
    /// Base distance of WAN class routes.
    pub wan_distance: u32,
}

impl CompileOptions {
    /// Default physical name of the radio on `band`.
    pub fn radio(&self, band: Band) -> &str {
        self.radios.get(band)
    }

    /// Band of a default radio name, if `interface` is one.
    pub fn band_of_radio(&self, interface: &str) -> Option<Band> {
        self.radios
            .iter()
            .find(|(_, name)| name.as_str() == interface)
            .map(|(band, _)| band)
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        default_options()
    }
}

/// Errors returned when loading an options file.
#[derive(Debug, Error)]
pub enum OptionsLoadError {
    #[error("failed to read options file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse options file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load compile options from a TOML file.
pub fn load_options(path: &Path) -> Result<CompileOptions, OptionsLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| OptionsLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_options(&raw, path.display().to_string())
}

/// Built-in options.
pub fn default_options() -> CompileOptions {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/defaults/options.toml"));
    match parse_options(embedded, "embedded options".to_string()) {
        Ok(options) => options,
        Err(_) => fallback_options(),
    }
}

fn parse_options(raw: &str, path: String) -> Result<CompileOptions, OptionsLoadError> {
    toml::from_str(raw).map_err(|source| OptionsLoadError::Parse { path, source })
}

fn fallback_options() -> CompileOptions {
    CompileOptions {
        country: "United States".to_string(),
        radios: BandPair::new("wifi2".to_string(), "wifi1".to_string()),
        wifi: WifiOptions {
            authentication_types: "wpa2-psk,wpa3-psk".to_string(),
        },
        lists: ListOptions {
            lan: "LAN".to_string(),
            wan: "WAN".to_string(),
            vpn_wan: "VPN-WAN".to_string(),
            domestic_targets: "Domestic-Targets".to_string(),
        },
        dns: DnsOptions {
            foreign_servers: vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()],
        },
        routing: RoutingOptions {
            probe_hosts: vec![
                "1.1.1.1".to_string(),
                "8.8.8.8".to_string(),
                "9.9.9.9".to_string(),
                "208.67.222.222".to_string(),
            ],
            vpn_distance: 1,
            wan_distance: 10,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{default_options, fallback_options, load_options, OptionsLoadError};
    use crate::intent::Band;

    #[test]
    fn embedded_defaults_match_fallback() {
        assert_eq!(default_options(), fallback_options());
    }

    #[test]
    fn default_radio_names() {
        let options = default_options();
        assert_eq!(options.radio(Band::Band2_4), "wifi2");
        assert_eq!(options.radio(Band::Band5), "wifi1");
        assert_eq!(options.band_of_radio("wifi1"), Some(Band::Band5));
        assert_eq!(options.band_of_radio("ether1"), None);
    }

    #[test]
    fn user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.toml");
        let raw = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/defaults/options.toml"))
            .replace("band5 = \"wifi1\"", "band5 = \"wlan5\"");
        std::fs::write(&path, raw).unwrap();

        let options = load_options(&path).unwrap();
        assert_eq!(options.radio(Band::Band5), "wlan5");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.toml");
        std::fs::write(&path, "colour = \"blue\"\n").unwrap();

        let err = load_options(&path).unwrap_err();
        assert!(matches!(err, OptionsLoadError::Parse { .. }));
    }
}
