use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_GEO_URL: &str = "http://ip-api.com";
pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_ECHO_TIMEOUT_MS: u64 = 3_000;
pub const DEFAULT_THROTTLE_MS: u64 = 1_500;

#[derive(Parser, Debug, Default)]
#[command(name = "ip-geo")]
#[command(version = "0.1.0")]
#[command(about = "Interactive IPv4/IPv6 geolocation lookup", long_about = None)]
pub struct Args {
    /// TOML file with overrides for the settings below
    #[arg(short = 'c', long, env = "IPGEO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the geolocation API (queried as <url>/json/<ip>)
    #[arg(long, env = "IPGEO_GEO_URL")]
    pub geo_url: Option<String>,

    /// Geolocation request timeout in milliseconds
    #[arg(long, env = "IPGEO_LOOKUP_TIMEOUT")]
    pub lookup_timeout: Option<u64>,

    /// Timeout for each external IP echo service in milliseconds
    #[arg(long, env = "IPGEO_ECHO_TIMEOUT")]
    pub echo_timeout: Option<u64>,

    /// Pause before every lookup in milliseconds
    #[arg(long, env = "IPGEO_THROTTLE")]
    pub throttle: Option<u64>,

    /// Verbose output
    #[arg(short = 'v', long, env = "IPGEO_VERBOSE")]
    pub verbose: bool,
}

/// One external IP echo endpoint and the JSON field carrying the address.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EchoService {
    pub name: String,
    pub url: String,
    pub field: String,
}

impl EchoService {
    fn new(name: &str, url: &str, field: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            field: field.to_string(),
        }
    }
}

pub fn default_echo_services() -> Vec<EchoService> {
    vec![
        EchoService::new("ipify", "https://api.ipify.org?format=json", "ip"),
        EchoService::new("ipinfo", "https://ipinfo.io/json", "ip"),
        EchoService::new("ifconfig.me", "https://ifconfig.me/all.json", "ip_addr"),
    ]
}

/// Contents of the optional `--config` file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    geo_url: Option<String>,
    lookup_timeout_ms: Option<u64>,
    echo_timeout_ms: Option<u64>,
    throttle_ms: Option<u64>,
    echo_services: Option<Vec<EchoService>>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub geo_url: String,
    pub lookup_timeout: Duration,
    pub echo_timeout: Duration,
    pub throttle: Duration,
    pub echo_services: Vec<EchoService>,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            geo_url: DEFAULT_GEO_URL.to_string(),
            lookup_timeout: Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS),
            echo_timeout: Duration::from_millis(DEFAULT_ECHO_TIMEOUT_MS),
            throttle: Duration::from_millis(DEFAULT_THROTTLE_MS),
            echo_services: default_echo_services(),
            verbose: false,
        }
    }
}

impl Args {
    /// Layer flags/env over the config file over built-in defaults.
    pub fn merge_with_config(self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let defaults = Settings::default();

        let millis = |flag: Option<u64>, file: Option<u64>, default: Duration| {
            flag.or(file).map(Duration::from_millis).unwrap_or(default)
        };

        Ok(Settings {
            geo_url: self.geo_url.or(file.geo_url).unwrap_or(defaults.geo_url),
            lookup_timeout: millis(self.lookup_timeout, file.lookup_timeout_ms, defaults.lookup_timeout),
            echo_timeout: millis(self.echo_timeout, file.echo_timeout_ms, defaults.echo_timeout),
            throttle: millis(self.throttle, file.throttle_ms, defaults.throttle),
            echo_services: file.echo_services.unwrap_or(defaults.echo_services),
            verbose: self.verbose,
        })
    }
}
