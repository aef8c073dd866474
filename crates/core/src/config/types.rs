use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    /// Destination bodies seeded into the planet store at startup.
    #[serde(default)]
    pub planets: Vec<PlanetSeed>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8000
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("launchpad.db")
}

/// External launch provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// API root, without the `/launches/query` suffix.
    #[serde(default = "default_provider_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_provider_url() -> String {
    "https://api.spacexdata.com/v4".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Defaults applied to locally scheduled launches
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulingConfig {
    /// Flight number treated as the latest when the catalog is empty; the
    /// first scheduled launch gets this plus one.
    #[serde(default = "default_flight_number")]
    pub default_flight_number: i64,
    /// Customers added to every scheduled launch.
    #[serde(default = "default_customers")]
    pub default_customers: Vec<String>,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            default_flight_number: default_flight_number(),
            default_customers: default_customers(),
        }
    }
}

/// Latest flight number assumed for an empty catalog.
pub const DEFAULT_FLIGHT_NUMBER: i64 = 100;

fn default_flight_number() -> i64 {
    DEFAULT_FLIGHT_NUMBER
}

fn default_customers() -> Vec<String> {
    vec!["Karen Stewart".to_string(), "NASA".to_string()]
}

/// A destination body to seed into the reference catalog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlanetSeed {
    pub kepler_name: String,
}
