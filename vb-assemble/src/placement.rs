//! Positioning a unit blueprint's voxels on the structure grid.
//!
//! Local voxel positions are in source model space (Y up); the structure
//! grid uses the target convention (Z up), so the final position swaps the
//! source Y and Z axes. Every block spans a fixed cube of VOXEL_SCALE
//! voxels per side.

use vb_schematic::PlacedBlock;

use crate::{PlacedVoxel, Structure, resolve::UnitBlueprint};

pub const VOXEL_SCALE: i32 = 16;

/// Rotates a local position about the vertical axis for the four
/// orientations with a known transform. Any other pair passes through
/// untransformed.
pub fn rotate_local(pos: (i32, i32, i32), orientation: (i8, i8)) -> (i32, i32, i32) {
    let (x, y, z) = pos;
    match orientation {
        (1, 3) => (x, y, z),
        (-1, 3) => (-x, y, -z),
        (3, 1) => (z, y, -x),
        (-3, 1) => (-z, y, x),
        _ => (x, y, z),
    }
}

/// Appends the unit's voxels at the block's position, rotated per its
/// orientation and swapped into target axes.
pub fn place_unit(block: &PlacedBlock, unit: &UnitBlueprint, out: &mut Structure) {
    for voxel in &unit.voxels {
        let (rx, ry, rz) = rotate_local(voxel.pos, block.orientation);
        let gx = block.x * VOXEL_SCALE + rx;
        let gy = block.y * VOXEL_SCALE + ry;
        let gz = block.z * VOXEL_SCALE + rz;
        out.push(PlacedVoxel {
            pos: (gx, gz, gy),
            shape_id: voxel.shape_id.clone(),
            color: voxel.color,
            orientation: block.orientation,
        });
    }
}
