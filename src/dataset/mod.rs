//! Restaurant dataset for the wheel.
//!
//! A copy of the dataset is compiled into the binary. `dataset.path` in the
//! config points at a replacement file. Failing to load either is not fatal:
//! the wheel is simply empty and cannot be spun.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::DatasetConfig;
use crate::wheel::{items_from_labels, WheelItem};

/// Dataset shipped with the binary.
pub const BUNDLED_DATASET: &str = include_str!("../../data/restaurants.json");

/// A restaurant that can win the wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Stable identifier within the dataset.
    pub id: u32,
    /// Display name, also drawn on the wheel segment.
    pub name: String,
    /// Discount the restaurant offers to winners.
    #[serde(default)]
    pub discount: String,
    /// Street address.
    #[serde(default)]
    pub address: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Cuisine, e.g. "Thai".
    #[serde(default)]
    pub cuisine: String,
    /// Average rating out of 5.
    #[serde(default)]
    pub rating: f32,
    /// Closing time as shown to users, e.g. "22:00".
    #[serde(default)]
    pub open_until: String,
}

impl Restaurant {
    /// Map link centred on the restaurant.
    pub fn map_url(&self) -> String {
        map_url(self.latitude, self.longitude)
    }

    /// Text shared when the user shares a win.
    pub fn share_text(&self, code: Option<&str>) -> String {
        let mut text = format!("The wheel picked {} for me today!", self.name);
        if !self.cuisine.is_empty() {
            text.push_str(&format!(" {} food", self.cuisine));
            if !self.address.is_empty() {
                text.push_str(&format!(" at {}", self.address));
            }
            text.push('.');
        } else if !self.address.is_empty() {
            text.push_str(&format!(" Find it at {}.", self.address));
        }
        if !self.discount.is_empty() {
            text.push_str(&format!(" Deal: {}", self.discount));
            if let Some(code) = code {
                text.push_str(&format!(" with code {code}"));
            }
            text.push('.');
        }
        text
    }
}

/// OpenStreetMap link for a coordinate.
pub fn map_url(latitude: f64, longitude: f64) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={latitude:.5}&mlon={longitude:.5}#map=17/{latitude:.5}/{longitude:.5}"
    )
}

/// Error type for dataset loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The configured dataset file does not exist.
    #[error("Dataset not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Error reading the dataset file.
    #[error("Failed to read dataset: {0}")]
    ReadError(#[from] std::io::Error),
    /// The dataset is not valid JSON or has the wrong shape.
    #[error("Failed to parse dataset: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// The list of restaurants on the wheel, in wheel order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantDataset {
    /// Restaurants in the order they appear on the wheel.
    pub restaurants: Vec<Restaurant>,
}

impl RestaurantDataset {
    /// Parse a dataset document.
    pub fn from_json(contents: &str) -> Result<Self, DataLoadError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self, DataLoadError> {
        Self::from_json(BUNDLED_DATASET)
    }

    /// Load a dataset file.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        if !path.exists() {
            return Err(DataLoadError::NotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load the configured dataset, falling back to the bundled one when no
    /// path is set.
    pub fn from_config(config: &DatasetConfig) -> Result<Self, DataLoadError> {
        match &config.path {
            Some(path) => Self::load(Path::new(path)),
            None => Self::bundled(),
        }
    }

    /// Like [`RestaurantDataset::from_config`], but an error yields an empty
    /// dataset alongside the error.
    pub fn load_or_empty(config: &DatasetConfig) -> (Self, Option<DataLoadError>) {
        match Self::from_config(config) {
            Ok(dataset) => {
                info!(count = dataset.len(), "Loaded restaurant dataset");
                (dataset, None)
            }
            Err(e) => {
                warn!(error = %e, "Restaurant dataset unavailable, wheel will be empty");
                (Self::default(), Some(e))
            }
        }
    }

    /// Number of restaurants.
    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    /// Whether the dataset has no restaurants.
    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    /// Restaurant at wheel position `index`.
    pub fn get(&self, index: usize) -> Option<&Restaurant> {
        self.restaurants.get(index)
    }

    /// Wheel segments labelled with the restaurant names.
    pub fn wheel_items(&self) -> Vec<WheelItem> {
        wheel_items(&self.restaurants)
    }
}

/// Wheel segments for a list of restaurants.
pub fn wheel_items(restaurants: &[Restaurant]) -> Vec<WheelItem> {
    items_from_labels(restaurants.iter().map(|r| r.name.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Restaurant {
        Restaurant {
            id: 1,
            name: "Pho Saigon".into(),
            discount: "10% off".into(),
            address: "1 Main Street".into(),
            latitude: 37.78,
            longitude: -122.41,
            cuisine: "Vietnamese".into(),
            rating: 4.3,
            open_until: "21:00".into(),
        }
    }

    #[test]
    fn test_bundled_dataset_parses() {
        let dataset = RestaurantDataset::bundled().unwrap();
        assert!(dataset.len() >= 8);
        assert!(dataset.restaurants.iter().all(|r| !r.name.is_empty()));
        let ids: std::collections::HashSet<_> =
            dataset.restaurants.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), dataset.len());
    }

    #[test]
    fn test_wheel_items_follow_dataset_order() {
        let dataset = RestaurantDataset::bundled().unwrap();
        let items = dataset.wheel_items();
        assert_eq!(items.len(), dataset.len());
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.index, i);
            assert_eq!(item.label, dataset.restaurants[i].name);
        }
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{"restaurants": [{"id": 7, "name": "Diner", "latitude": 1.0, "longitude": 2.0}]}"#;
        let dataset = RestaurantDataset::from_json(json).unwrap();
        let diner = dataset.get(0).unwrap();
        assert_eq!(diner.name, "Diner");
        assert!(diner.discount.is_empty());
        assert_eq!(diner.rating, 0.0);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = RestaurantDataset::load(&temp.path().join("nope.json"));
        assert!(matches!(result, Err(DataLoadError::NotFound(_))));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, r#"{"restaurants": [{"name": 5}]}"#).unwrap();
        assert!(matches!(
            RestaurantDataset::load(&path),
            Err(DataLoadError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_or_empty_recovers() {
        let config = DatasetConfig {
            path: Some("/definitely/not/here.json".into()),
        };
        let (dataset, error) = RestaurantDataset::load_or_empty(&config);
        assert!(dataset.is_empty());
        assert!(dataset.wheel_items().is_empty());
        assert!(matches!(error, Some(DataLoadError::NotFound(_))));
    }

    #[test]
    fn test_from_config_reads_override() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("places.json");
        let dataset = RestaurantDataset {
            restaurants: vec![sample()],
        };
        fs::write(&path, serde_json::to_string(&dataset).unwrap()).unwrap();

        let config = DatasetConfig {
            path: Some(path.to_string_lossy().into_owned()),
        };
        assert_eq!(RestaurantDataset::from_config(&config).unwrap(), dataset);
    }

    #[test]
    fn test_map_url_contains_coordinates() {
        let url = sample().map_url();
        assert!(url.starts_with("https://www.openstreetmap.org/"));
        assert!(url.contains("mlat=37.78000"));
        assert!(url.contains("mlon=-122.41000"));
    }

    #[test]
    fn test_share_text() {
        let text = sample().share_text(Some("SPIN10"));
        assert!(text.contains("Pho Saigon"));
        assert!(text.contains("1 Main Street"));
        assert!(text.contains("10% off with code SPIN10"));

        let bare = Restaurant {
            discount: String::new(),
            cuisine: String::new(),
            address: String::new(),
            ..sample()
        };
        assert_eq!(
            bare.share_text(Some("SPIN10")),
            "The wheel picked Pho Saigon for me today!"
        );
    }
}
