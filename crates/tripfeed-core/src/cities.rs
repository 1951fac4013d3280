use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, GeoPoint};

/// One city available for feed and AI-guide requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityConfig {
    #[must_use]
    pub fn location(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CitiesFile {
    pub cities: Vec<CityConfig>,
}

impl CitiesFile {
    /// Looks up a city by name, case-insensitively.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CityConfig> {
        self.cities
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }
}

/// Load and validate the cities configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_cities(path: &Path) -> Result<CitiesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CitiesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let cities_file: CitiesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CitiesFileParse)?;

    validate_cities(&cities_file)?;

    Ok(cities_file)
}

fn validate_cities(cities_file: &CitiesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for city in &cities_file.cities {
        if city.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "city name must be non-empty".to_string(),
            ));
        }

        if !(-90.0..=90.0).contains(&city.latitude) {
            return Err(ConfigError::Validation(format!(
                "city '{}' has latitude {} outside [-90, 90]",
                city.name, city.latitude
            )));
        }

        if !(-180.0..=180.0).contains(&city.longitude) {
            return Err(ConfigError::Validation(format!(
                "city '{}' has longitude {} outside [-180, 180]",
                city.name, city.longitude
            )));
        }

        let lower_name = city.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate city name: '{}'",
                city.name
            )));
        }
    }

    Ok(())
}
