use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::models::ReportCategory;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

/// Emoji glyph per report category, rendered into the map pin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSet {
    pub phone: String,
    pub wallet: String,
    pub keys: String,
    pub other: String,
}

impl IconSet {
    pub fn for_category(&self, category: ReportCategory) -> &str {
        match category {
            ReportCategory::Phone => &self.phone,
            ReportCategory::Wallet => &self.wallet,
            ReportCategory::Keys => &self.keys,
            ReportCategory::Other => &self.other,
        }
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            phone: "📱".into(),
            wallet: "💼".into(),
            keys: "🔑".into(),
            other: "📦".into(),
        }
    }
}

/// Map-page configuration. Handed to the pages at load and to the engine at
/// construction instead of living as page-level globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    pub center: GeoPoint,
    pub bounds: GeoBounds,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub initial_zoom: u8,
    pub icons: IconSet,
}

impl Default for MapSettings {
    fn default() -> Self {
        // The campus footprint of the original deployment.
        Self {
            center: GeoPoint {
                lat: 14.6070,
                lng: 121.0040,
            },
            bounds: GeoBounds {
                south_west: GeoPoint {
                    lat: 14.6050,
                    lng: 121.0020,
                },
                north_east: GeoPoint {
                    lat: 14.6090,
                    lng: 121.0060,
                },
            },
            min_zoom: 16,
            max_zoom: 20,
            initial_zoom: 17,
            icons: IconSet::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct UserSettings {
    map: MapSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            let defaults = UserSettings::default();
            // Write the defaults out so the file is there to edit.
            let serialized = serde_json::to_string_pretty(&defaults)?;
            fs::write(&path, serialized)
                .with_context(|| format!("Failed to write settings to {}", path.display()))?;
            defaults
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn map(&self) -> MapSettings {
        self.data.read().unwrap().map.clone()
    }

    #[allow(dead_code)]
    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let data: UserSettings = serde_json::from_str(&contents)?;
        let mut guard = self.data.write().unwrap();
        *guard = data;
        Ok(())
    }
}
