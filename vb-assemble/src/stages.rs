//! Pure transform stages over an assembled structure.

use std::collections::{HashMap, HashSet, VecDeque};

use vb_voxel::VoxelGrid;

use crate::{PlacedVoxel, Structure};

const NEIGHBORS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Collapses voxels sharing a position; the last write wins. Output is
/// position-sorted so downstream stages are deterministic.
pub fn deduplicate(structure: Structure) -> Structure {
    let mut by_pos: HashMap<(i32, i32, i32), PlacedVoxel> = HashMap::new();
    for voxel in structure {
        by_pos.insert(voxel.pos, voxel);
    }
    let mut out: Structure = by_pos.into_values().collect();
    out.sort_by_key(|v| v.pos);
    out
}

/// Strips the interior, keeping the surface and the layer directly under
/// it. Surface voxels are those with an unoccupied 6-neighbour; retention
/// is by graph distance from the surface, so a second pass removes
/// nothing.
pub fn hollow(structure: Structure) -> Structure {
    let occupied: HashSet<(i32, i32, i32)> = structure.iter().map(|v| v.pos).collect();
    let distance = surface_distances(&occupied);
    structure
        .into_iter()
        .filter(|v| distance.get(&v.pos).is_some_and(|d| *d <= 1))
        .collect()
}

/// Grid flavour of `hollow`, for thinning a single unit's voxels before
/// export.
pub fn hollow_grid(grid: VoxelGrid) -> VoxelGrid {
    let occupied: HashSet<(i32, i32, i32)> = grid.keys().copied().collect();
    let distance = surface_distances(&occupied);
    grid.into_iter()
        .filter(|(pos, _)| distance.get(pos).is_some_and(|d| *d <= 1))
        .collect()
}

fn surface_distances(occupied: &HashSet<(i32, i32, i32)>) -> HashMap<(i32, i32, i32), u32> {
    let mut distance: HashMap<(i32, i32, i32), u32> = HashMap::new();
    let mut queue = VecDeque::new();
    for &pos in occupied {
        let exposed = NEIGHBORS
            .iter()
            .any(|(dx, dy, dz)| !occupied.contains(&(pos.0 + dx, pos.1 + dy, pos.2 + dz)));
        if exposed {
            distance.insert(pos, 0);
            queue.push_back(pos);
        }
    }
    while let Some(pos) = queue.pop_front() {
        let next = distance[&pos] + 1;
        for (dx, dy, dz) in NEIGHBORS {
            let n = (pos.0 + dx, pos.1 + dy, pos.2 + dz);
            if occupied.contains(&n) && !distance.contains_key(&n) {
                distance.insert(n, next);
                queue.push_back(n);
            }
        }
    }
    distance
}

#[derive(Debug)]
pub struct StructureChunk {
    pub id: usize,
    pub voxels: Structure,
}

impl StructureChunk {
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }
}

/// Partitions a structure into spatial chunks of at most `max_voxels`
/// each where possible, using a near-cubic cell over the bounding box.
/// Every voxel lands in exactly one chunk; empty cells are dropped.
pub fn split(structure: Structure, max_voxels: usize) -> Vec<StructureChunk> {
    if structure.is_empty() {
        return Vec::new();
    }
    if max_voxels == 0 || structure.len() <= max_voxels {
        return vec![StructureChunk {
            id: 0,
            voxels: structure,
        }];
    }

    let mut min = structure[0].pos;
    let mut max = structure[0].pos;
    for v in &structure {
        min = (min.0.min(v.pos.0), min.1.min(v.pos.1), min.2.min(v.pos.2));
        max = (max.0.max(v.pos.0), max.1.max(v.pos.1), max.2.max(v.pos.2));
    }
    let dims = (
        (max.0 - min.0 + 1) as f64,
        (max.1 - min.1 + 1) as f64,
        (max.2 - min.2 + 1) as f64,
    );
    let chunk_count = structure.len().div_ceil(max_voxels) as f64;
    let volume = dims.0 * dims.1 * dims.2;
    let edge = ((volume / chunk_count).cbrt().ceil() as i32).max(1);

    let mut cells: HashMap<(i32, i32, i32), Structure> = HashMap::new();
    for voxel in structure {
        let key = (
            (voxel.pos.0 - min.0) / edge,
            (voxel.pos.1 - min.1) / edge,
            (voxel.pos.2 - min.2) / edge,
        );
        cells.entry(key).or_default().push(voxel);
    }

    let mut keys: Vec<_> = cells.keys().copied().collect();
    keys.sort();
    keys.into_iter()
        .enumerate()
        .map(|(id, key)| {
            let voxels = cells.remove(&key).unwrap_or_default();
            log::debug!("chunk {id}: {} voxels", voxels.len());
            StructureChunk { id, voxels }
        })
        .collect()
}
