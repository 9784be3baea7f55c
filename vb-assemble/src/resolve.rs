//! Per-run resolution of block names to unit blueprints.
//!
//! Resolution order: previously generated blueprint folders, then an
//! on-demand voxelization of the block's model when an assets tree is
//! available, then a single gray fallback cube. Results (including
//! misses) are cached for the run.

use std::collections::HashMap;
use std::path::PathBuf;

use vb_blueprint::{DEFAULT_SHAPE_ID, GLASS_SHAPE_ID, shape_id_for_block};
use vb_model::{ModelCache, TextureCache, load_model, resolve_model};
use vb_voxel::VoxelGrid;

/// One voxel of a unit blueprint, in source model space (Y up).
#[derive(Debug, Clone, PartialEq)]
pub struct UnitVoxel {
    pub pos: (i32, i32, i32),
    pub shape_id: String,
    pub color: [u8; 4],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitBlueprint {
    pub voxels: Vec<UnitVoxel>,
}

impl UnitBlueprint {
    /// Drops fully transparent voxels and downgrades translucent ones to
    /// the glass material.
    pub fn from_voxels(grid: &VoxelGrid, block_name: &str) -> UnitBlueprint {
        let base_shape = shape_id_for_block(block_name);
        let mut voxels: Vec<UnitVoxel> = grid
            .iter()
            .filter(|(_, color)| color[3] != 0)
            .map(|(&pos, &color)| {
                let shape_id = if color[3] < 128 {
                    GLASS_SHAPE_ID
                } else {
                    base_shape
                };
                UnitVoxel {
                    pos,
                    shape_id: shape_id.to_string(),
                    color,
                }
            })
            .collect();
        voxels.sort_by_key(|v| v.pos);
        UnitBlueprint { voxels }
    }
}

pub struct UnitResolver {
    blueprints_dir: Option<PathBuf>,
    assets_dir: Option<PathBuf>,
    cache: HashMap<String, Option<UnitBlueprint>>,
    models: ModelCache,
    textures: TextureCache,
    fallback: UnitBlueprint,
}

impl UnitResolver {
    pub fn new(blueprints_dir: Option<PathBuf>, assets_dir: Option<PathBuf>) -> UnitResolver {
        UnitResolver {
            blueprints_dir,
            assets_dir,
            cache: HashMap::new(),
            models: ModelCache::default(),
            textures: TextureCache::default(),
            fallback: fallback_cube(),
        }
    }

    /// Test hook: seeds a name with a known unit.
    pub fn preload(&mut self, name: &str, unit: UnitBlueprint) {
        self.cache.insert(name.to_string(), Some(unit));
    }

    pub fn fallback(&self) -> &UnitBlueprint {
        &self.fallback
    }

    /// Returns the unit for a block name, or the fallback cube with
    /// `false` when no blueprint or model could be found.
    pub fn resolve(&mut self, name: &str) -> (&UnitBlueprint, bool) {
        if !self.cache.contains_key(name) {
            let unit = self.lookup(name);
            self.cache.insert(name.to_string(), unit);
        }
        match self.cache.get(name).and_then(Option::as_ref) {
            Some(unit) => (unit, true),
            None => (&self.fallback, false),
        }
    }

    fn lookup(&mut self, name: &str) -> Option<UnitBlueprint> {
        if let Some(dir) = &self.blueprints_dir
            && let Some(parts) = vb_blueprint::find_unit_blueprint(dir, name)
        {
            return Some(unit_from_parts(&parts));
        }
        let assets_dir = self.assets_dir.clone()?;
        let model_key = format!("minecraft:block/{name}");
        let model = match load_model(&model_key, &assets_dir, &mut self.models) {
            Ok(model) => model,
            Err(err) => {
                log::debug!("no model for {name}: {err}");
                return None;
            }
        };
        let elements = resolve_model(&model, &assets_dir);
        if elements.is_empty() {
            return None;
        }
        let grid = vb_voxel::voxelize(elements, &mut self.textures);
        Some(UnitBlueprint::from_voxels(&grid, name))
    }
}

/// Stored blueprint parts keep the target axis order (Z up); unit voxels
/// are in model space, so the vertical axis swaps back here.
fn unit_from_parts(parts: &[vb_blueprint::Part]) -> UnitBlueprint {
    let voxels = parts
        .iter()
        .map(|part| UnitVoxel {
            pos: (part.pos.x, part.pos.z, part.pos.y),
            shape_id: part.shape_id.clone(),
            color: vb_blueprint::parse_color_hex(&part.color).unwrap_or([128, 128, 128, 255]),
        })
        .collect();
    UnitBlueprint { voxels }
}

fn fallback_cube() -> UnitBlueprint {
    UnitBlueprint {
        voxels: vec![UnitVoxel {
            pos: (0, 0, 0),
            shape_id: DEFAULT_SHAPE_ID.to_string(),
            color: [128, 128, 128, 255],
        }],
    }
}
