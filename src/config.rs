use std::path::{Path, PathBuf};

use blockyard_control::{KeyBindings, PlayerTuning};
use blockyard_textures::SwatchSettings;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Blockyard".to_string(),
            target_fps: 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `<key>.json` saves.
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("saves"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view, degrees.
    pub fov: f32,
    /// Degrees of turn per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Furthest distance a click can build or break at.
    pub reach: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            mouse_sensitivity: 0.1,
            reach: 8.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub storage: StorageConfig,
    pub camera: CameraConfig,
    pub player: PlayerTuning,
    pub controls: KeyBindings,
    pub textures: SwatchSettings,
}

pub fn parse_config(text: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(text)
}

pub fn read_config(path: &Path) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_config(&text)?)
}

/// Layer command-line settings over a file config. Applied at startup and
/// again to every reloaded file.
pub fn apply_overrides(config: &mut AppConfig, storage_dir: Option<&Path>) {
    if let Some(dir) = storage_dir {
        config.storage.dir = dir.to_path_buf();
    }
}

/// Keep `current` storage settings in a reloaded config. Returns true when the
/// reload asked for different ones.
pub fn pin_storage(current: &StorageConfig, reloaded: &mut AppConfig) -> bool {
    if reloaded.storage == *current {
        return false;
    }
    reloaded.storage = current.clone();
    true
}

/// Read `path`, falling back to defaults when it is missing or unparsable.
pub fn load_config(path: &Path) -> AppConfig {
    if !path.exists() {
        log::warn!("config {} not found; using defaults", path.display());
        return AppConfig::default();
    }
    match read_config(path) {
        Ok(cfg) => {
            log::info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            log::warn!("config {} unreadable ({}); using defaults", path.display(), e);
            AppConfig::default()
        }
    }
}
