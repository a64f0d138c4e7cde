use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Startup configuration. Loaded once from TOML and treated as immutable
/// for the process lifetime; every field has a default so a missing file
/// or a partial file still boots.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub assets: AssetsConfig,
}

#[derive(Clone, Debug, Deserialize)]
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
            title: "karst".to_string(),
            target_fps: 60,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub chunk_size: usize,
    pub render_distance: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: 16,
            render_distance: 2,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub mass: f32,
    pub gravity: f32,
    pub jump_scale: f32,
    pub move_force: f32,
    pub mouse_sensitivity: f32,
    pub eye_height: f32,
    pub spawn: [f32; 3],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mass: 90.0,
            gravity: 9.8,
            jump_scale: 5.0,
            move_force: 1.0,
            mouse_sensitivity: 0.003,
            eye_height: 1.8,
            spawn: [8.0, 0.0, 8.0],
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub materials: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            materials: PathBuf::from("assets/materials.toml"),
        }
    }
}

pub fn load(path: &Path) -> Result<AppConfig, Box<dyn Error>> {
    if !path.exists() {
        log::info!("config {} not found, using defaults", path.display());
        return Ok(AppConfig::default());
    }
    let s = fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&s)?;
    Ok(cfg)
}
