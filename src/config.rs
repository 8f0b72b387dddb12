use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use crate::query::{DEFAULT_RADIUS_KM, LocationsPolicy};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GeodirConfig {
    /// Path of the companies CSV
    pub companies: Option<String>,
    /// Path of the locations CSV
    pub locations: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub default_radius_km: Option<f64>,
    /// Report an unknown company separately from a company without locations
    pub strict_locations: Option<bool>,
}

impl GeodirConfig {
    /// Config written by `geodir init`
    pub fn starter() -> Self {
        Self {
            companies: Some("companies.csv".to_string()),
            locations: Some("locations.csv".to_string()),
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
            default_radius_km: Some(DEFAULT_RADIUS_KM),
            strict_locations: Some(false),
        }
    }

    /// Fill unset fields from `other`
    pub fn or(self, other: GeodirConfig) -> Self {
        Self {
            companies: self.companies.or(other.companies),
            locations: self.locations.or(other.locations),
            host: self.host.or(other.host),
            port: self.port.or(other.port),
            default_radius_km: self.default_radius_km.or(other.default_radius_km),
            strict_locations: self.strict_locations.or(other.strict_locations),
        }
    }

    pub fn companies_path(&self) -> PathBuf {
        PathBuf::from(self.companies.as_deref().unwrap_or("companies.csv"))
    }

    pub fn locations_path(&self) -> PathBuf {
        PathBuf::from(self.locations.as_deref().unwrap_or("locations.csv"))
    }

    pub fn radius_km(&self) -> f64 {
        self.default_radius_km.unwrap_or(DEFAULT_RADIUS_KM)
    }

    pub fn locations_policy(&self) -> LocationsPolicy {
        if self.strict_locations.unwrap_or(false) {
            LocationsPolicy::DistinguishMissingCompany
        } else {
            LocationsPolicy::EmptyIsNotFound
        }
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = self.port.unwrap_or(DEFAULT_PORT);
        format!("{}:{}", host, port)
            .parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("invalid bind address {}:{}: {}", host, port, e))
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("geodir.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<GeodirConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: GeodirConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &GeodirConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeodirConfig::default();
        assert_eq!(config.companies_path(), PathBuf::from("companies.csv"));
        assert_eq!(config.radius_km(), 10.0);
        assert_eq!(config.locations_policy(), LocationsPolicy::EmptyIsNotFound);
        assert_eq!(config.bind_addr().unwrap(), "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_or_prefers_self() {
        let cli = GeodirConfig {
            port: Some(9000),
            ..GeodirConfig::default()
        };
        let file = GeodirConfig {
            port: Some(8080),
            companies: Some("data/companies.csv".to_string()),
            ..GeodirConfig::default()
        };
        let merged = cli.or(file);
        assert_eq!(merged.port, Some(9000));
        assert_eq!(merged.companies.as_deref(), Some("data/companies.csv"));
    }

    #[test]
    fn test_write_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geodir.toml");

        write_config(&path, &GeodirConfig::starter(), false).unwrap();
        assert!(write_config(&path, &GeodirConfig::starter(), false).is_err());
        write_config(&path, &GeodirConfig::starter(), true).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded, GeodirConfig::starter());
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.toml"))).unwrap().is_none());
    }

    #[test]
    fn test_strict_locations() {
        let config: GeodirConfig = toml::from_str("strict_locations = true\nport = 9001\n").unwrap();
        assert_eq!(config.locations_policy(), LocationsPolicy::DistinguishMissingCompany);
        assert_eq!(config.port, Some(9001));
    }
}
