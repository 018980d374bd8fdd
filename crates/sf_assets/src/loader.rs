//! Directory scanners that build name -> resource tables.
//!
//! Each loader lists one directory (non-recursive), keeps files whose extension
//! is in the accept list (case-insensitive), and keys the result by the file
//! stem. A file that cannot be read or decoded is logged and left out of the
//! table; only an unreadable directory is an error.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;

use crate::error::AssetError;

pub const DEFAULT_COLORKEY: [u8; 3] = [255, 0, 255];
pub const GFX_EXTENSIONS: &[&str] = &["png", "jpg", "bmp"];
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "mdi"];
pub const FONT_EXTENSIONS: &[&str] = &["ttf"];

/// How an image was prepared for blitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Source carried an alpha channel; it is kept as-is.
    Alpha,
    /// Source was opaque; pixels matching the key were made transparent.
    ColorKey([u8; 3]),
}

#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub pixels: RgbaImage,
    pub conversion: Conversion,
}

impl LoadedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Raw sound file contents. Decoding happens in whatever mixer consumes it.
#[derive(Debug, Clone)]
pub struct SoundBuffer {
    pub path: PathBuf,
    pub bytes: Arc<[u8]>,
    /// Per-effect volume; callers adjust individual entries after loading.
    pub volume: f32,
}

/// Load every accepted image in `directory`.
pub fn load_all_gfx(
    directory: &Path,
    colorkey: [u8; 3],
    accept: &[&str],
) -> Result<HashMap<String, LoadedImage>, AssetError> {
    let mut graphics = HashMap::new();
    for (name, path) in scan_dir(directory, accept)? {
        match load_image(&path, colorkey) {
            Ok(image) => {
                graphics.insert(name, image);
            }
            Err(err) => log::warn!("Skipping graphic '{}': {}", path.display(), err),
        }
    }
    Ok(graphics)
}

/// Map every accepted music file in `directory` to its path.
pub fn load_all_music(
    directory: &Path,
    accept: &[&str],
) -> Result<HashMap<String, PathBuf>, AssetError> {
    Ok(scan_dir(directory, accept)?.into_iter().collect())
}

/// Map every accepted font file in `directory` to its path.
pub fn load_all_fonts(
    directory: &Path,
    accept: &[&str],
) -> Result<HashMap<String, PathBuf>, AssetError> {
    load_all_music(directory, accept)
}

/// Read every accepted sound effect in `directory` into memory.
pub fn load_all_sfx(
    directory: &Path,
    accept: &[&str],
) -> Result<HashMap<String, SoundBuffer>, AssetError> {
    let mut effects = HashMap::new();
    for (name, path) in scan_dir(directory, accept)? {
        match fs::read(&path) {
            Ok(bytes) => {
                effects.insert(
                    name,
                    SoundBuffer {
                        path,
                        bytes: Arc::from(bytes),
                        volume: 1.0,
                    },
                );
            }
            Err(err) => log::warn!("Skipping sound '{}': {}", path.display(), err),
        }
    }
    Ok(effects)
}

/// Decode one image and apply alpha or colorkey conversion.
pub fn load_image(path: &Path, colorkey: [u8; 3]) -> Result<LoadedImage, String> {
    let decoded = image::open(path)
        .map_err(|e| format!("Failed to decode image {}: {e}", path.display()))?;

    if decoded.color().has_alpha() {
        return Ok(LoadedImage {
            pixels: decoded.to_rgba8(),
            conversion: Conversion::Alpha,
        });
    }

    let mut pixels = decoded.to_rgba8();
    for pixel in pixels.pixels_mut() {
        if pixel.0[..3] == colorkey {
            pixel.0[3] = 0;
        }
    }
    Ok(LoadedImage {
        pixels,
        conversion: Conversion::ColorKey(colorkey),
    })
}

/// Accepted files in `directory` as (stem, path), sorted by file name. When two
/// files share a stem the first one wins.
fn scan_dir(directory: &Path, accept: &[&str]) -> Result<Vec<(String, PathBuf)>, AssetError> {
    let entries = fs::read_dir(directory).map_err(|source| AssetError::DirectoryRead {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_accepted_extension(path, accept))
        .collect();
    files.sort();

    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    let mut out = Vec::with_capacity(files.len());
    for path in files {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            log::warn!("Skipping '{}': file name is not valid UTF-8", path.display());
            continue;
        };
        let stem = stem.to_string();
        if let Some(first) = seen.get(&stem) {
            log::warn!(
                "Skipping '{}': name '{}' already taken by '{}'",
                path.display(),
                stem,
                first.display()
            );
            continue;
        }
        seen.insert(stem.clone(), path.clone());
        out.push((stem, path));
    }
    Ok(out)
}

fn has_accepted_extension(path: &Path, accept: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    accept
        .iter()
        .any(|candidate| candidate.trim_start_matches('.').eq_ignore_ascii_case(ext))
}
