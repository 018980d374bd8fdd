//! Resource tables loaded once at startup.

pub mod error;
pub mod loader;

use std::collections::HashMap;
use std::fmt::Display;
use std::path::PathBuf;

pub use error::AssetError;
pub use loader::{
    load_all_fonts, load_all_gfx, load_all_music, load_all_sfx, load_image, Conversion,
    LoadedImage, SoundBuffer, AUDIO_EXTENSIONS, DEFAULT_COLORKEY, FONT_EXTENSIONS,
    GFX_EXTENSIONS,
};

/// Where each resource kind lives on disk.
#[derive(Debug, Clone)]
pub struct AssetDirs {
    pub graphics: PathBuf,
    pub fonts: PathBuf,
    pub music: PathBuf,
    pub sound: PathBuf,
}

#[derive(Debug, Default)]
pub struct AssetTables {
    pub graphics: HashMap<String, LoadedImage>,
    pub fonts: HashMap<String, PathBuf>,
    pub music: HashMap<String, PathBuf>,
    pub sfx: HashMap<String, SoundBuffer>,
}

impl AssetTables {
    /// Load all four tables with the default accept lists. A directory that
    /// cannot be read yields an empty table and a warning.
    pub fn load(dirs: &AssetDirs, colorkey: [u8; 3]) -> Self {
        let tables = Self {
            graphics: or_empty(
                "graphics",
                load_all_gfx(&dirs.graphics, colorkey, GFX_EXTENSIONS),
            ),
            fonts: or_empty("fonts", load_all_fonts(&dirs.fonts, FONT_EXTENSIONS)),
            music: or_empty("music", load_all_music(&dirs.music, AUDIO_EXTENSIONS)),
            sfx: or_empty("sfx", load_all_sfx(&dirs.sound, AUDIO_EXTENSIONS)),
        };
        log::info!(
            "Assets loaded: {} graphics, {} fonts, {} music, {} sfx",
            tables.graphics.len(),
            tables.fonts.len(),
            tables.music.len(),
            tables.sfx.len()
        );
        tables
    }
}

fn or_empty<T, E: Display>(kind: &str, result: Result<HashMap<String, T>, E>) -> HashMap<String, T> {
    result.unwrap_or_else(|err| {
        log::warn!("No {} loaded: {}", kind, err);
        HashMap::new()
    })
}
