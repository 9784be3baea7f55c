//! Isometric icon.png rendering for blueprint folders.

use std::collections::HashMap;
use std::path::Path;

use image::{Rgba, RgbaImage};

const ICON_SIZE: u32 = 128;

/// Renders a small isometric preview of the voxels. The icon is cosmetic,
/// so failures only warn.
pub fn generate_icon(voxels: &HashMap<(i32, i32, i32), [u8; 4]>, path: &Path) {
    let Some(img) = render(voxels, ICON_SIZE) else {
        return;
    };
    if let Err(err) = img.save(path) {
        log::warn!("failed to write {}: {err}", path.display());
    }
}

fn render(voxels: &HashMap<(i32, i32, i32), [u8; 4]>, size: u32) -> Option<RgbaImage> {
    let first = *voxels.keys().next()?;
    let mut min = first;
    let mut max = first;
    for &(x, y, z) in voxels.keys() {
        min = (min.0.min(x), min.1.min(y), min.2.min(z));
        max = (max.0.max(x), max.1.max(y), max.2.max(z));
    }
    let width = (max.0 - min.0 + 1) as f32;
    let height = (max.1 - min.1 + 1) as f32;
    let depth = (max.2 - min.2 + 1) as f32;
    let max_dim = width.max(height).max(depth);

    let mut img = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    let scale = size as f32 * 0.8 / max_dim;
    let center = (size / 2) as i32;

    // Back-to-front so nearer voxels paint over farther ones.
    let mut sorted: Vec<_> = voxels.iter().collect();
    sorted.sort_by_key(|((x, y, z), _)| x + y + z);

    for (&(x, y, z), &color) in sorted {
        let nx = (x - min.0) as f32 - width / 2.0;
        let ny = (y - min.1) as f32 - height / 2.0;
        let nz = (z - min.2) as f32 - depth / 2.0;

        let px = center + ((nx - nz) * scale) as i32;
        let py = center + ((ny + (nx + nz) * 0.5) * scale) as i32;

        let half = (scale * 0.8).max(2.0) as i32 / 2;
        for dx in -half..=half {
            for dy in -half..=half {
                let (sx, sy) = (px + dx, py + dy);
                if sx < 0 || sy < 0 || sx >= size as i32 || sy >= size as i32 {
                    continue;
                }
                let dst = img.get_pixel_mut(sx as u32, sy as u32);
                *dst = blend(*dst, color);
            }
        }
    }
    Some(img)
}

fn blend(under: Rgba<u8>, over: [u8; 4]) -> Rgba<u8> {
    let alpha = over[3] as f32 / 255.0;
    let mix = |o: u8, u: u8| (o as f32 * alpha + u as f32 * (1.0 - alpha)) as u8;
    let out_a = (under[3] as f32 + over[3] as f32 * (1.0 - under[3] as f32 / 255.0)).min(255.0);
    Rgba([
        mix(over[0], under[0]),
        mix(over[1], under[1]),
        mix(over[2], under[2]),
        out_a as u8,
    ])
}
