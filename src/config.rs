use std::env;
use std::net::{IpAddr, SocketAddr};

use crate::error::{config_error, Error};

const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_TEMPERATURE: f64 = 0.2;
const DEFAULT_GOOGLE_MAPS_API_BASE: &str = "https://maps.googleapis.com";

#[derive(Clone, Debug)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub temperature: f64,
}

#[derive(Clone, Debug)]
pub struct GoogleMapsConfig {
    pub api_key: String,
    pub api_base: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub openai: OpenAIConfig,
    pub google_maps: GoogleMapsConfig,
    pub addr: SocketAddr,
    pub deduplicate_places: bool,
}

impl Config {
    /// Reads configuration from the process environment, loading `.env` first
    /// when one exists. Both provider credentials must be present.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, Error> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(config_error(key, "missing")),
            }
        };
        let optional = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let openai = OpenAIConfig {
            api_key: required("OPENAI_API_KEY")?,
            api_base: optional("OPENAI_API_BASE", DEFAULT_OPENAI_API_BASE),
            model: optional("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            temperature: optional("OPENAI_TEMPERATURE", &DEFAULT_OPENAI_TEMPERATURE.to_string())
                .parse::<f64>()
                .map_err(|e| config_error("OPENAI_TEMPERATURE", e))?,
        };

        let google_maps = GoogleMapsConfig {
            api_key: required("GOOGLE_MAPS_API_KEY")?,
            api_base: optional("GOOGLE_MAPS_API_BASE", DEFAULT_GOOGLE_MAPS_API_BASE),
        };

        let host: IpAddr = optional("HOST", "127.0.0.1")
            .parse()
            .map_err(|e| config_error("HOST", e))?;
        let port: u16 = optional("PORT", "3000")
            .parse()
            .map_err(|e| config_error("PORT", e))?;
        let addr = SocketAddr::new(host, port);

        let deduplicate_places = optional("DEDUPLICATE_PLACES", "false")
            .parse::<bool>()
            .map_err(|e| config_error("DEDUPLICATE_PLACES", e))?;

        Ok(Self {
            openai,
            google_maps,
            addr,
            deduplicate_places,
        })
    }
}

#[cfg(test)]
fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    move |key| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

#[test]
fn defaults_fill_optional_values() {
    let config = Config::from_lookup(lookup_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("GOOGLE_MAPS_API_KEY", "maps-test"),
    ]))
    .unwrap();

    assert_eq!(config.openai.api_base, DEFAULT_OPENAI_API_BASE);
    assert_eq!(config.openai.model, "gpt-4o-mini");
    assert_eq!(config.openai.temperature, 0.2);
    assert_eq!(config.google_maps.api_base, DEFAULT_GOOGLE_MAPS_API_BASE);
    assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
    assert!(!config.deduplicate_places);
}

#[test]
fn missing_credentials_fail_fast() {
    let err = Config::from_lookup(lookup_from(&[("GOOGLE_MAPS_API_KEY", "maps-test")]))
        .unwrap_err();
    assert_eq!(err.code, 1);
    assert!(err.message.contains("OPENAI_API_KEY"));

    let err = Config::from_lookup(lookup_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("GOOGLE_MAPS_API_KEY", " "),
    ]))
    .unwrap_err();
    assert!(err.message.contains("GOOGLE_MAPS_API_KEY"));
}

#[test]
fn malformed_values_are_rejected() {
    let err = Config::from_lookup(lookup_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("GOOGLE_MAPS_API_KEY", "maps-test"),
        ("PORT", "eighty"),
    ]))
    .unwrap_err();
    assert!(err.message.contains("PORT"));

    let config = Config::from_lookup(lookup_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("GOOGLE_MAPS_API_KEY", "maps-test"),
        ("DEDUPLICATE_PLACES", "true"),
        ("PORT", "8080"),
    ]))
    .unwrap();
    assert!(config.deduplicate_places);
    assert_eq!(config.addr.port(), 8080);
}

#[test]
fn host_accepts_ipv6() {
    let config = Config::from_lookup(lookup_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("GOOGLE_MAPS_API_KEY", "maps-test"),
        ("HOST", "::1"),
        ("PORT", "8080"),
    ]))
    .unwrap();
    assert!(config.addr.is_ipv6());
    assert_eq!(config.addr.port(), 8080);

    let err = Config::from_lookup(lookup_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("GOOGLE_MAPS_API_KEY", "maps-test"),
        ("HOST", "localhost"),
    ]))
    .unwrap_err();
    assert!(err.message.contains("HOST"));
}
