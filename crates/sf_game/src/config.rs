use serde::Deserialize;
use sf_assets::AssetDirs;
use sf_core::control::ControlConfig;
use sf_core::input::Key;
use sf_platform::window::PlatformConfig;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub version: String,
    pub caption: String,
    pub width: u32,
    pub height: u32,
    /// Target frame rate; 0 runs unthrottled.
    pub fps: u32,
    pub show_fps: bool,
    pub start_state: String,
    pub colorkey: [u8; 3],
    pub assets: AssetPaths,
    pub sun_count: usize,
    pub seed: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AssetPaths {
    pub graphics: String,
    pub fonts: String,
    pub music: String,
    pub sound: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            caption: "Sunfall".to_string(),
            width: 800,
            height: 600,
            fps: 60,
            show_fps: true,
            start_state: crate::states::STORY.to_string(),
            colorkey: sf_assets::DEFAULT_COLORKEY,
            assets: AssetPaths::default(),
            sun_count: 10,
            seed: 5,
        }
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            graphics: "assets/graphics".to_string(),
            fonts: "assets/fonts".to_string(),
            music: "assets/music".to_string(),
            sound: "assets/sound".to_string(),
        }
    }
}

impl GameConfig {
    pub fn platform_config(&self) -> PlatformConfig {
        PlatformConfig {
            title: self.caption.clone(),
            width: self.width,
            height: self.height,
        }
    }

    pub fn control_config(&self) -> ControlConfig {
        ControlConfig {
            caption: self.caption.clone(),
            fps: self.fps,
            show_fps: self.show_fps,
            fps_toggle_key: Key::F5,
        }
    }

    pub fn asset_dirs(&self) -> AssetDirs {
        AssetDirs {
            graphics: PathBuf::from(&self.assets.graphics),
            fonts: PathBuf::from(&self.assets.fonts),
            music: PathBuf::from(&self.assets.music),
            sound: PathBuf::from(&self.assets.sound),
        }
    }
}

pub fn load_config_from_path(config_path: &Path) -> Result<GameConfig, String> {
    let raw = fs::read_to_string(config_path)
        .map_err(|e| format!("Failed to read config file {}: {e}", config_path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", config_path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

/// A missing file means "use defaults"; a present but invalid one is an error.
pub fn load_config_or_default(config_path: &Path) -> Result<GameConfig, String> {
    if !config_path.exists() {
        log::warn!(
            "Config '{}' not found, using defaults",
            config_path.display()
        );
        return Ok(GameConfig::default());
    }
    let config = load_config_from_path(config_path)?;
    log::info!(
        "Config loaded from '{}': {}x{} @ {} fps, start state '{}'",
        config_path.display(),
        config.width,
        config.height,
        config.fps,
        config.start_state
    );
    Ok(config)
}

fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.version != "0.1" {
        return Err(format!(
            "Config validation failed: unsupported version '{}'",
            config.version
        ));
    }
    if config.width == 0 || config.height == 0 {
        return Err(format!(
            "Config validation failed: window size {}x{} must be non-zero",
            config.width, config.height
        ));
    }
    if config.start_state.is_empty() {
        return Err("Config validation failed: start_state is empty".to_string());
    }
    if config.caption.is_empty() {
        log::warn!("Config caption is empty; the window title will be blank.");
    }
    Ok(())
}
