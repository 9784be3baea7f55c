//! Material shape IDs for blueprint parts.

pub const DEFAULT_SHAPE_ID: &str = PLASTIC;
pub const GLASS_SHAPE_ID: &str = ARMORED_GLASS;

const PLASTIC: &str = "628b2d61-5ceb-43e9-8334-a4135566df7a";
const WOOD: &str = "1fc74a28-addb-451a-878d-c3c605d63811";
const ARMORED_GLASS: &str = "b5ee5539-75a2-4fef-873b-ef7c9398b3f5";

const WOOD_SPECIES: &[&str] = &[
    "oak", "birch", "spruce", "jungle", "acacia", "dark_oak", "mangrove", "cherry", "crimson",
    "warped",
];

/// Picks the part material from the block name. Wood species map to the
/// wood material, everything else is plastic; translucent voxels get glass
/// per-voxel instead (see `parts_from_voxels`).
pub fn shape_id_for_block(block_name: &str) -> &'static str {
    let lower = block_name.to_lowercase();
    if WOOD_SPECIES.iter().any(|species| lower.contains(species)) {
        return WOOD;
    }
    DEFAULT_SHAPE_ID
}
