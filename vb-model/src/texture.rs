use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;

/// Per-run texture cache. Failed loads are cached as `None` so a missing
/// file is reported once and never retried.
#[derive(Default)]
pub struct TextureCache {
    images: HashMap<PathBuf, Option<RgbaImage>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path) -> Option<&RgbaImage> {
        if !self.images.contains_key(path) {
            let loaded = if path.is_file() {
                match image::open(path) {
                    Ok(img) => Some(img.to_rgba8()),
                    Err(err) => {
                        log::warn!("failed to load texture {}: {err}", path.display());
                        None
                    }
                }
            } else {
                log::warn!("texture file not found: {}", path.display());
                None
            };
            self.images.insert(path.to_path_buf(), loaded);
        }
        self.images.get(path).and_then(|img| img.as_ref())
    }

    /// Preloads an in-memory image, mainly so tests can run without files.
    pub fn insert(&mut self, path: PathBuf, img: RgbaImage) {
        self.images.insert(path, Some(img));
    }
}

/// Nearest-neighbour sample at normalized (u, v); (0, 0) is the top-left
/// texel. Out-of-range coordinates clamp to the edge.
pub fn sample(img: &RgbaImage, u: f32, v: f32) -> Option<[u8; 4]> {
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return None;
    }
    let u = u.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    let px = ((u * width as f32) as u32).min(width - 1);
    let py = ((v * height as f32) as u32).min(height - 1);
    Some(img.get_pixel(px, py).0)
}
