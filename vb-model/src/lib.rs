//! Block model loading and resolution for a resource pack's `assets` tree.
//!
//! Models inherit from a `parent` chain; texture values are variables that
//! may reference each other. `resolve_model` flattens both into plain
//! cuboid elements with concrete texture file paths.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub mod texture;

pub use texture::{TextureCache, sample};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model file not found: {0}")]
    NotFound(PathBuf),
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
    #[error("model parent chain too deep at {0}")]
    ParentChainTooDeep(String),
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Face {
    Up,
    Down,
    North,
    South,
    East,
    West,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Down,
        Face::North,
        Face::South,
        Face::East,
        Face::West,
    ];

    pub fn from_str(value: &str) -> Option<Face> {
        match value {
            "up" => Some(Face::Up),
            "down" => Some(Face::Down),
            "north" => Some(Face::North),
            "south" => Some(Face::South),
            "east" => Some(Face::East),
            "west" => Some(Face::West),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Face::Up => "up",
            Face::Down => "down",
            Face::North => "north",
            Face::South => "south",
            Face::East => "east",
            Face::West => "west",
        }
    }

    /// Offset toward the neighbouring cell across this face, in model space
    /// (x grows east, y grows up, z grows south).
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Face::Up => (0, 1, 0),
            Face::Down => (0, -1, 0),
            Face::North => (0, 0, -1),
            Face::South => (0, 0, 1),
            Face::West => (-1, 0, 0),
            Face::East => (1, 0, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

#[derive(Clone, Debug)]
pub struct ElementRotation {
    pub origin: [f32; 3],
    pub axis: RotationAxis,
    pub angle: f32,
}

/// One face of a resolved element. `texture_file` is cleared when the
/// texture turns out to be unloadable so later sampling skips the face.
#[derive(Clone, Debug)]
pub struct FaceTexture {
    pub texture_file: Option<PathBuf>,
    pub uv: Option<[f32; 4]>,
    pub rotation: i32,
}

/// One cuboid of a model, with inheritance and texture variables resolved.
#[derive(Clone, Debug)]
pub struct Element {
    pub from: [f32; 3],
    pub to: [f32; 3],
    pub rotation: Option<ElementRotation>,
    pub faces: HashMap<Face, FaceTexture>,
}

/// A model with its parent chain folded in: concrete elements plus the
/// merged texture-variable table.
#[derive(Clone, Debug, Default)]
pub struct Model {
    pub textures: HashMap<String, String>,
    pub elements: Vec<JsonElement>,
}

/// Per-run model cache, keyed by `namespace:path`.
#[derive(Default)]
pub struct ModelCache {
    models: HashMap<String, Model>,
}

const MAX_PARENT_DEPTH: usize = 24;
const MAX_TEXTURE_REF_DEPTH: usize = 10;

/// Loads a model JSON and folds in its parent chain. Child textures extend
/// and override the parent's; child elements replace inherited elements.
pub fn load_model(
    model_key: &str,
    assets_dir: &Path,
    cache: &mut ModelCache,
) -> Result<Model, ModelError> {
    load_model_inner(model_key, assets_dir, cache, 0)
}

fn load_model_inner(
    model_key: &str,
    assets_dir: &Path,
    cache: &mut ModelCache,
    depth: usize,
) -> Result<Model, ModelError> {
    if depth > MAX_PARENT_DEPTH {
        return Err(ModelError::ParentChainTooDeep(model_key.to_string()));
    }
    let (namespace, path) = split_key(model_key);
    let full_key = format!("{namespace}:{path}");
    if let Some(cached) = cache.models.get(&full_key) {
        return Ok(cached.clone());
    }

    let file = assets_dir
        .join(namespace)
        .join("models")
        .join(format!("{path}.json"));
    if !file.is_file() {
        return Err(ModelError::NotFound(file));
    }
    let raw = std::fs::read_to_string(&file).map_err(|source| ModelError::Io {
        path: file.clone(),
        source,
    })?;
    let parsed: ModelFile = serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
        path: file.clone(),
        source,
    })?;

    let mut model = if let Some(parent) = parsed.parent.as_deref() {
        load_model_inner(parent, assets_dir, cache, depth + 1)?
    } else {
        Model::default()
    };
    if let Some(textures) = parsed.textures {
        for (key, value) in textures {
            // A few packs write "#key" on the left side; normalize it away.
            let key = key.strip_prefix('#').unwrap_or(&key).to_string();
            let value = if value.starts_with('#') || value.contains(':') {
                value
            } else {
                format!("minecraft:{value}")
            };
            model.textures.insert(key, value);
        }
    }
    if let Some(elements) = parsed.elements {
        model.elements = elements;
    }

    cache.models.insert(full_key, model.clone());
    Ok(model)
}

/// Resolves every face's texture variable down to a texture file path.
pub fn resolve_model(model: &Model, assets_dir: &Path) -> Vec<Element> {
    let mut out = Vec::with_capacity(model.elements.len());
    for elem in &model.elements {
        let mut faces = HashMap::new();
        for (face_name, face) in elem.faces.iter().flatten() {
            let Some(face_key) = Face::from_str(face_name) else {
                continue;
            };
            let Some(tex_var) = face.texture.as_deref() else {
                continue;
            };
            let tex_ref = resolve_texture_variable(tex_var, &model.textures);
            faces.insert(
                face_key,
                FaceTexture {
                    texture_file: Some(texture_file_path(&tex_ref, assets_dir)),
                    uv: face.uv,
                    rotation: face.rotation.unwrap_or(0),
                },
            );
        }
        out.push(Element {
            from: elem.from,
            to: elem.to,
            rotation: elem.rotation.as_ref().and_then(convert_rotation),
            faces,
        });
    }
    out
}

fn convert_rotation(rot: &JsonRotation) -> Option<ElementRotation> {
    let axis = match rot.axis.as_deref() {
        Some("x") => RotationAxis::X,
        Some("y") => RotationAxis::Y,
        Some("z") => RotationAxis::Z,
        _ => return None,
    };
    if rot.angle.abs() <= 1e-6 {
        return None;
    }
    Some(ElementRotation {
        origin: rot.origin.unwrap_or([0.0, 0.0, 0.0]),
        axis,
        angle: rot.angle,
    })
}

/// Follows `#var` references through the texture table, depth-limited.
/// An unresolved variable degrades to its bare key as a direct path.
fn resolve_texture_variable(tex_var: &str, textures: &HashMap<String, String>) -> String {
    // Some packs write "##var" for an indirect reference.
    let first = match tex_var.strip_prefix("##") {
        Some(rest) => rest,
        None => match tex_var.strip_prefix('#') {
            Some(rest) => rest,
            None => return tex_var.to_string(),
        },
    };
    let mut key = first;
    for _ in 0..=MAX_TEXTURE_REF_DEPTH {
        match textures.get(key) {
            Some(value) => match value.strip_prefix('#') {
                Some(inner) => key = inner,
                None => return value.clone(),
            },
            None => break,
        }
    }
    // "missing" marks intentionally culled faces; anything else is a gap.
    if key != "missing" {
        log::warn!("texture variable '#{key}' not found in model textures, trying as direct path");
    }
    key.to_string()
}

/// Maps a `namespace:path` texture reference to a file under the assets
/// tree, defaulting the namespace and the `block/` folder.
fn texture_file_path(tex_ref: &str, assets_dir: &Path) -> PathBuf {
    let (namespace, path) = split_key(tex_ref);
    let path = if path.contains('/') {
        path.to_string()
    } else {
        format!("block/{path}")
    };
    let path = if path.ends_with(".png") {
        path
    } else {
        format!("{path}.png")
    };
    let mut file = assets_dir.join(namespace).join("textures");
    for part in path.split('/') {
        file.push(part);
    }
    file
}

fn split_key(key: &str) -> (&str, &str) {
    match key.split_once(':') {
        Some((namespace, path)) => (namespace, path),
        None => ("minecraft", key),
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ModelFile {
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    textures: Option<HashMap<String, String>>,
    #[serde(default)]
    elements: Option<Vec<JsonElement>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonElement {
    pub from: [f32; 3],
    pub to: [f32; 3],
    #[serde(default)]
    pub rotation: Option<JsonRotation>,
    #[serde(default)]
    pub faces: Option<HashMap<String, JsonFace>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRotation {
    #[serde(default)]
    pub origin: Option<[f32; 3]>,
    #[serde(default)]
    pub axis: Option<String>,
    #[serde(default)]
    pub angle: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonFace {
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub uv: Option<[f32; 4]>,
    #[serde(default)]
    pub rotation: Option<i32>,
}

#[cfg(test)]
mod tests;
