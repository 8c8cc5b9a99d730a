use serde::Deserialize;
use thiserror::Error;

use crate::predict::GroundStation;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid coordinates: {0}")]
    Coordinates(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub station: StationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub name: Option<String>,
    /// "lat, lon" in degrees
    pub coordinates: String,
    #[serde(default)]
    pub altitude_m: f64,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

impl StationConfig {
    pub fn ground_station(&self) -> Result<GroundStation, ConfigError> {
        GroundStation::from_coordinates(&self.coordinates, self.altitude_m / 1000.0)
            .ok_or_else(|| ConfigError::Coordinates(self.coordinates.clone()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn station_from_yaml() {
        let config: Config = serde_yaml::from_str(
            "station:\n  name: home\n  coordinates: \"40.0, -88.0\"\n  altitude_m: 200\n",
        )
        .unwrap();

        assert_eq!(config.station.name.as_deref(), Some("home"));
        let station = config.station.ground_station().unwrap();
        assert_eq!(station.latitude_deg, 40.0);
        assert_eq!(station.longitude_deg, -88.0);
        assert!((station.altitude_km - 0.2).abs() < 1e-12);
    }

    #[test]
    fn altitude_defaults_to_sea_level() {
        let config: Config =
            serde_yaml::from_str("station:\n  name: null\n  coordinates: \"0, 0\"\n").unwrap();
        assert_eq!(config.station.ground_station().unwrap().altitude_km, 0.0);
    }

    #[test]
    fn bad_coordinates_are_rejected() {
        let station = StationConfig {
            name: None,
            coordinates: "forty north".to_string(),
            altitude_m: 0.0,
        };
        assert!(matches!(
            station.ground_station(),
            Err(ConfigError::Coordinates(_))
        ));
    }
}
