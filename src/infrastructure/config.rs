use crate::domain::error::RoamError;
use crate::domain::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub overpass: OverpassConfig,
    #[serde(default)]
    pub osrm: OsrmConfig,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub default_center_lat: f64,
    #[serde(default = "default_center_lng")]
    pub default_center_lng: f64,
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
}

impl MapConfig {
    pub fn default_center(&self) -> LatLng {
        LatLng::new(self.default_center_lat, self.default_center_lng)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OverpassConfig {
    #[serde(default = "default_overpass_url")]
    pub base_url: String,
    #[serde(default = "default_overpass_timeout")]
    pub http_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OsrmConfig {
    #[serde(default = "default_osrm_url")]
    pub base_url: String,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lat: default_center_lat(),
            default_center_lng: default_center_lng(),
            default_zoom: default_zoom(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: default_overpass_url(),
            http_timeout_secs: default_overpass_timeout(),
        }
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: default_osrm_url(),
            http_timeout_secs: default_http_timeout(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

// Defaults
fn default_center_lat() -> f64 {
    38.7223
}
fn default_center_lng() -> f64 {
    -9.1393
}
fn default_zoom() -> u8 {
    13
}
fn default_viewport_width() -> u32 {
    800
}
fn default_viewport_height() -> u32 {
    600
}
fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}
fn default_overpass_timeout() -> u64 {
    15
}
fn default_osrm_url() -> String {
    "https://router.project-osrm.org/route/v1".to_string()
}
fn default_http_timeout() -> u64 {
    30
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("roam").join("config.toml"))
}

pub fn load_config() -> Result<Config, RoamError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match toml::from_str::<Config>(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample() -> Result<(), RoamError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| RoamError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| RoamError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(RoamError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}
