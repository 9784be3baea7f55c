//! Reading and writing Scrap Mechanic blueprints.
//!
//! A blueprint is a folder named by a UUID holding a compact
//! `blueprint.json`, a pretty-printed `description.json` and an `icon.png`
//! preview. Parts are unit cubes with a material shape ID, a 6-hex-digit
//! color and a signed-axis orientation pair.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod preview;
pub mod shape;

pub use shape::{DEFAULT_SHAPE_ID, GLASS_SHAPE_ID, shape_id_for_block};

#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlueprintFile {
    pub bodies: Vec<Body>,
    pub version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Body {
    pub childs: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    pub bounds: Vec3i,
    #[serde(rename = "shapeId")]
    pub shape_id: String,
    pub color: String,
    pub pos: Vec3i,
    pub xaxis: i8,
    pub zaxis: i8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Vec3i {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vec3i {
    pub const UNIT: Vec3i = Vec3i { x: 1, y: 1, z: 1 };

    pub fn new(x: i32, y: i32, z: i32) -> Vec3i {
        Vec3i { x, y, z }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptionFile {
    pub description: String,
    #[serde(rename = "localId")]
    pub local_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: u32,
}

/// The game expects uppercase hex with no prefix and no alpha channel.
pub fn color_hex(color: [u8; 4]) -> String {
    format!("{:02X}{:02X}{:02X}", color[0], color[1], color[2])
}

pub fn parse_color_hex(hex: &str) -> Option<[u8; 4]> {
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b, 255])
}

/// Converts a voxelized unit (model-space coordinates) into blueprint
/// parts. Fully transparent voxels are dropped; translucent ones become
/// glass. Note the axis swap: the game's Z is vertical.
pub fn parts_from_voxels(
    voxels: &HashMap<(i32, i32, i32), [u8; 4]>,
    block_name: &str,
) -> Vec<Part> {
    let base_shape = shape_id_for_block(block_name);
    let mut parts: Vec<Part> = voxels
        .iter()
        .filter(|(_, color)| color[3] != 0)
        .map(|(&(x, y, z), &color)| {
            let shape_id = if color[3] < 128 {
                GLASS_SHAPE_ID
            } else {
                base_shape
            };
            Part {
                bounds: Vec3i::UNIT,
                shape_id: shape_id.to_string(),
                color: color_hex(color),
                pos: Vec3i::new(x, z, y),
                xaxis: 1,
                zaxis: 3,
            }
        })
        .collect();
    parts.sort_by_key(|part| (part.pos.z, part.pos.y, part.pos.x));
    parts
}

pub struct WrittenBlueprint {
    pub id: String,
    pub folder: PathBuf,
}

/// Writes one blueprint folder: compact blueprint.json, pretty
/// description.json, icon.png preview.
pub fn write_blueprint(
    parts: Vec<Part>,
    output_dir: &Path,
    name: &str,
    description: &str,
) -> Result<WrittenBlueprint, BlueprintError> {
    let id = Uuid::new_v4().to_string();
    let folder = output_dir.join(&id);
    fs::create_dir_all(&folder).map_err(|source| BlueprintError::Io {
        path: folder.clone(),
        source,
    })?;

    let preview_voxels: HashMap<(i32, i32, i32), [u8; 4]> = parts
        .iter()
        .filter_map(|part| {
            parse_color_hex(&part.color).map(|c| ((part.pos.x, part.pos.y, part.pos.z), c))
        })
        .collect();

    let blueprint = BlueprintFile {
        bodies: vec![Body { childs: parts }],
        version: 4,
    };
    let blueprint_path = folder.join("blueprint.json");
    let raw = serde_json::to_string(&blueprint).map_err(|source| BlueprintError::Parse {
        path: blueprint_path.clone(),
        source,
    })?;
    fs::write(&blueprint_path, raw).map_err(|source| BlueprintError::Io {
        path: blueprint_path,
        source,
    })?;

    let desc = DescriptionFile {
        description: description.to_string(),
        local_id: id.clone(),
        name: name.to_string(),
        kind: "Blueprint".to_string(),
        version: 0,
    };
    let desc_path = folder.join("description.json");
    let raw = serde_json::to_string_pretty(&desc).map_err(|source| BlueprintError::Parse {
        path: desc_path.clone(),
        source,
    })?;
    fs::write(&desc_path, raw).map_err(|source| BlueprintError::Io {
        path: desc_path,
        source,
    })?;

    preview::generate_icon(&preview_voxels, &folder.join("icon.png"));

    Ok(WrittenBlueprint { id, folder })
}

/// Loads the parts of a previously written blueprint folder.
pub fn load_blueprint_parts(folder: &Path) -> Result<Vec<Part>, BlueprintError> {
    let path = folder.join("blueprint.json");
    let raw = fs::read_to_string(&path).map_err(|source| BlueprintError::Io {
        path: path.clone(),
        source,
    })?;
    let blueprint: BlueprintFile =
        serde_json::from_str(&raw).map_err(|source| BlueprintError::Parse { path, source })?;
    Ok(blueprint
        .bodies
        .into_iter()
        .flat_map(|body| body.childs)
        .collect())
}

/// Searches a folder of generated blueprints for one whose description
/// name matches the block name, trying looser variations in order.
pub fn find_unit_blueprint(blueprints_dir: &Path, block_name: &str) -> Option<Vec<Part>> {
    let variations = name_variations(block_name);
    let entries = fs::read_dir(blueprints_dir).ok()?;
    for entry in entries.flatten() {
        let folder = entry.path();
        if !folder.is_dir() {
            continue;
        }
        let desc_path = folder.join("description.json");
        let Ok(raw) = fs::read_to_string(&desc_path) else {
            continue;
        };
        let Ok(desc) = serde_json::from_str::<DescriptionFile>(&raw) else {
            continue;
        };
        let bp_name = desc.name.to_lowercase();
        let bp_name_flat = bp_name.replace('_', "");
        let matched = variations.iter().any(|variant| {
            bp_name.contains(variant)
                || bp_name_flat.contains(variant)
                || variant.contains(&bp_name)
                || variant.contains(&bp_name_flat)
        });
        if !matched {
            continue;
        }
        match load_blueprint_parts(&folder) {
            Ok(parts) => return Some(parts),
            Err(err) => {
                log::warn!("failed to load blueprint {}: {err}", folder.display());
                continue;
            }
        }
    }
    None
}

/// Match candidates for a block name, most specific first: the full name,
/// the underscore-free form, then single components.
pub fn name_variations(block_name: &str) -> Vec<String> {
    let lower = block_name.to_lowercase();
    let mut out = vec![lower.clone(), lower.replace('_', "")];
    let parts: Vec<&str> = lower.split('_').collect();
    if parts.len() > 1 {
        out.push(parts[0].to_string());
        out.push(parts[parts.len() - 1].to_string());
        out.push(parts.concat());
    }
    dedup_keep_order(out)
}

fn dedup_keep_order(input: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(input.len());
    for entry in input {
        if !out.iter().any(|v| v == &entry) {
            out.push(entry);
        }
    }
    out
}

#[cfg(test)]
mod tests;
