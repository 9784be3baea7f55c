//! Assembling a full structure out of per-block unit blueprints.
//!
//! Each schematic block is expanded into the voxels of its unit blueprint,
//! rotated per the block's orientation and placed on a shared grid. The
//! grid then runs through pure transform stages (deduplicate, hollow,
//! split) before being written out.

use std::collections::BTreeSet;

use vb_schematic::PlacedBlock;

pub mod placement;
pub mod resolve;
pub mod stages;

pub use placement::{VOXEL_SCALE, place_unit, rotate_local};
pub use resolve::{UnitBlueprint, UnitResolver, UnitVoxel};
pub use stages::{StructureChunk, deduplicate, hollow, hollow_grid, split};

/// One voxel of the assembled structure, in target coordinates (Z up).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedVoxel {
    pub pos: (i32, i32, i32),
    pub shape_id: String,
    pub color: [u8; 4],
    pub orientation: (i8, i8),
}

pub type Structure = Vec<PlacedVoxel>;

#[derive(Debug, Default)]
pub struct RunSummary {
    pub total_blocks: usize,
    pub voxels_placed: usize,
    pub blocks_skipped: usize,
    pub missing_blueprints: BTreeSet<String>,
}

impl RunSummary {
    pub fn log(&self) {
        log::info!(
            "assembled {} voxels from {} blocks ({} without a unit blueprint)",
            self.voxels_placed,
            self.total_blocks,
            self.blocks_skipped
        );
        for name in &self.missing_blueprints {
            log::warn!("no unit blueprint for {name}, used the fallback cube");
        }
    }
}

/// Expands every schematic block into placed voxels. Missing unit
/// blueprints degrade to the resolver's fallback cube and are counted.
pub fn assemble(blocks: &[PlacedBlock], resolver: &mut UnitResolver) -> (Structure, RunSummary) {
    let mut structure = Vec::new();
    let mut summary = RunSummary::default();

    for (idx, block) in blocks.iter().enumerate() {
        if idx % 100 == 0 {
            log::debug!("placing block {}/{}", idx + 1, blocks.len());
        }
        summary.total_blocks += 1;

        let (unit, found) = resolver.resolve(&block.name);
        if !found {
            summary.blocks_skipped += 1;
            summary.missing_blueprints.insert(block.name.clone());
        }
        summary.voxels_placed += unit.voxels.len();
        place_unit(block, unit, &mut structure);
    }

    (structure, summary)
}
