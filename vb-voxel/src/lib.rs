//! Rasterizes resolved model elements into a colored voxel grid.
//!
//! Grid resolution follows the largest referenced texture so a 32x texture
//! pack yields 32-per-block voxels. Occupancy is a cell-center-in-cuboid
//! test (with optional inverse rotation), colors come from the first
//! externally visible face that yields a texture sample.

use std::collections::HashMap;

use vb_model::{Element, Face, RotationAxis, TextureCache, sample};

pub type VoxelGrid = HashMap<(i32, i32, i32), [u8; 4]>;

pub const FALLBACK_COLOR: [u8; 4] = [128, 128, 128, 255];

/// Face test order for coloring. Deliberate, reproducible tie-break.
const FACE_PRIORITY: [Face; 6] = [
    Face::Up,
    Face::North,
    Face::South,
    Face::East,
    Face::West,
    Face::Down,
];

pub fn voxelize(mut elements: Vec<Element>, textures: &mut TextureCache) -> VoxelGrid {
    let n = select_resolution(&mut elements, textures);
    log::debug!("voxelizing {} elements on a {n}^3 grid", elements.len());
    let occupancy = fill_occupancy(&elements, n);
    color_voxels(&elements, &occupancy, n, textures)
}

/// Picks the grid edge length: at least 16, or the largest dimension of any
/// loadable face texture. Unloadable textures invalidate their face only.
fn select_resolution(elements: &mut [Element], textures: &mut TextureCache) -> i32 {
    let mut max_dim = 16u32;
    for elem in elements.iter_mut() {
        for face in elem.faces.values_mut() {
            let Some(path) = face.texture_file.clone() else {
                continue;
            };
            match textures.load(&path) {
                Some(img) => {
                    max_dim = max_dim.max(img.width()).max(img.height());
                }
                None => {
                    face.texture_file = None;
                }
            }
        }
    }
    max_dim as i32
}

struct Occupancy {
    cells: Vec<bool>,
    n: i32,
}

impl Occupancy {
    fn new(n: i32) -> Self {
        Self {
            cells: vec![false; (n * n * n) as usize],
            n,
        }
    }

    fn idx(&self, x: i32, y: i32, z: i32) -> usize {
        ((x * self.n + y) * self.n + z) as usize
    }

    fn set(&mut self, x: i32, y: i32, z: i32) {
        let idx = self.idx(x, y, z);
        self.cells[idx] = true;
    }

    fn get(&self, x: i32, y: i32, z: i32) -> bool {
        if x < 0 || y < 0 || z < 0 || x >= self.n || y >= self.n || z >= self.n {
            return false;
        }
        self.cells[self.idx(x, y, z)]
    }
}

fn fill_occupancy(elements: &[Element], n: i32) -> Occupancy {
    let mut grid = Occupancy::new(n);
    for elem in elements {
        // A rotated element can occupy cells outside its nominal bounds, so
        // it scans the whole grid; an axis-aligned one only its own range.
        let (min, max) = if elem.rotation.is_some() {
            ([0, 0, 0], [n, n, n])
        } else {
            (
                [
                    (elem.from[0].min(elem.to[0]).floor() as i32).max(0),
                    (elem.from[1].min(elem.to[1]).floor() as i32).max(0),
                    (elem.from[2].min(elem.to[2]).floor() as i32).max(0),
                ],
                [
                    (elem.from[0].max(elem.to[0]).ceil() as i32).min(n),
                    (elem.from[1].max(elem.to[1]).ceil() as i32).min(n),
                    (elem.from[2].max(elem.to[2]).ceil() as i32).min(n),
                ],
            )
        };
        for x in min[0]..max[0] {
            for y in min[1]..max[1] {
                for z in min[2]..max[2] {
                    let center = [x as f32 + 0.5, y as f32 + 0.5, z as f32 + 0.5];
                    if element_contains(elem, center) {
                        grid.set(x, y, z);
                    }
                }
            }
        }
    }
    grid
}

/// Tests a point against the element's axis-aligned bounds, undoing the
/// element's rotation first when one is declared.
fn element_contains(elem: &Element, point: [f32; 3]) -> bool {
    let local = match &elem.rotation {
        Some(rot) => inverse_rotate(point, rot.origin, rot.axis, rot.angle),
        None => point,
    };
    bounds_contain(elem, local)
}

fn bounds_contain(elem: &Element, point: [f32; 3]) -> bool {
    (0..3).all(|axis| point[axis] >= elem.from[axis] && point[axis] < elem.to[axis])
}

fn inverse_rotate(point: [f32; 3], origin: [f32; 3], axis: RotationAxis, angle_deg: f32) -> [f32; 3] {
    let theta = angle_deg.to_radians();
    let (sin_a, cos_a) = theta.sin_cos();
    let tx = point[0] - origin[0];
    let ty = point[1] - origin[1];
    let tz = point[2] - origin[2];
    let (rx, ry, rz) = match axis {
        RotationAxis::X => (tx, ty * cos_a + tz * sin_a, -ty * sin_a + tz * cos_a),
        RotationAxis::Y => (tx * cos_a + tz * sin_a, ty, -tx * sin_a + tz * cos_a),
        RotationAxis::Z => (tx * cos_a - ty * sin_a, tx * sin_a + ty * cos_a, tz),
    };
    [rx + origin[0], ry + origin[1], rz + origin[2]]
}

fn color_voxels(
    elements: &[Element],
    occupancy: &Occupancy,
    n: i32,
    textures: &mut TextureCache,
) -> VoxelGrid {
    let mut voxels = VoxelGrid::new();
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                if !occupancy.get(x, y, z) {
                    continue;
                }
                let color = resolve_cell_color(elements, occupancy, (x, y, z), textures)
                    .unwrap_or(FALLBACK_COLOR);
                voxels.insert((x, y, z), color);
            }
        }
    }
    voxels
}

fn resolve_cell_color(
    elements: &[Element],
    occupancy: &Occupancy,
    cell: (i32, i32, i32),
    textures: &mut TextureCache,
) -> Option<[u8; 4]> {
    let (x, y, z) = cell;
    let center = [x as f32 + 0.5, y as f32 + 0.5, z as f32 + 0.5];
    for face in FACE_PRIORITY {
        let (dx, dy, dz) = face.offset();
        if occupancy.get(x + dx, y + dy, z + dz) {
            // Neighbour filled, this face is not externally visible.
            continue;
        }
        let candidate = elements.iter().find_map(|elem| {
            if !bounds_contain(elem, center) {
                return None;
            }
            let tex = elem.faces.get(&face)?;
            let path = tex.texture_file.as_ref()?;
            Some((elem, tex.uv, tex.rotation, path.clone()))
        });
        let Some((elem, uv, rotation, path)) = candidate else {
            continue;
        };
        let (u_frac, v_frac) = face_fractions(face, elem, center);
        let (u_frac, v_frac) = rotate_uv(u_frac, v_frac, rotation);
        let [u1, v1, u2, v2] = uv.unwrap_or([0.0, 0.0, 16.0, 16.0]);
        let u_norm = (u1 + u_frac * (u2 - u1)) / 16.0;
        let v_norm = (v1 + v_frac * (v2 - v1)) / 16.0;
        let Some(img) = textures.load(&path) else {
            continue;
        };
        if let Some(color) = sample(img, u_norm, v_norm) {
            return Some(color);
        }
    }
    None
}

/// Normalized face-local fractions of the cell center within the element
/// bounds. The axis mapping and mirroring differ per face; v = 0 is always
/// the top edge of the texture.
fn face_fractions(face: Face, elem: &Element, center: [f32; 3]) -> (f32, f32) {
    let frac = |lo: f32, hi: f32, v: f32| if hi != lo { (v - lo) / (hi - lo) } else { 0.0 };
    let (fx, fy, fz) = (elem.from[0], elem.from[1], elem.from[2]);
    let (tx, ty, tz) = (elem.to[0], elem.to[1], elem.to[2]);
    match face {
        Face::North => (frac(fx, tx, center[0]), frac(fy, ty, ty + fy - center[1])),
        Face::South => (
            1.0 - frac(fx, tx, center[0]),
            frac(fy, ty, ty + fy - center[1]),
        ),
        Face::West => (frac(fz, tz, center[2]), frac(fy, ty, ty + fy - center[1])),
        Face::East => (
            1.0 - frac(fz, tz, center[2]),
            frac(fy, ty, ty + fy - center[1]),
        ),
        Face::Up => (frac(fx, tx, center[0]), frac(fz, tz, center[2])),
        Face::Down => (frac(fx, tx, center[0]), 1.0 - frac(fz, tz, center[2])),
    }
}

/// 0/90/180/270 texture rotation as a fixed permutation of (u, v).
fn rotate_uv(u: f32, v: f32, rotation: i32) -> (f32, f32) {
    match rotation.rem_euclid(360) {
        90 => (1.0 - v, u),
        180 => (1.0 - u, 1.0 - v),
        270 => (v, 1.0 - u),
        _ => (u, v),
    }
}
