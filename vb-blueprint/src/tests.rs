use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use super::*;

fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("voxbridge-{label}-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn color_hex_is_uppercase_and_drops_alpha() {
    assert_eq!(color_hex([255, 10, 0, 200]), "FF0A00");
    assert_eq!(parse_color_hex("FF0A00"), Some([255, 10, 0, 255]));
    assert_eq!(parse_color_hex("FF0A0"), None);
    assert_eq!(parse_color_hex("GG0000"), None);
}

#[test]
fn parts_swap_vertical_axis() {
    let mut voxels = HashMap::new();
    voxels.insert((1, 5, 9), [10, 20, 30, 255]);
    let parts = parts_from_voxels(&voxels, "stone");
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].pos, Vec3i::new(1, 9, 5));
    assert_eq!((parts[0].xaxis, parts[0].zaxis), (1, 3));
    assert_eq!(parts[0].bounds, Vec3i::UNIT);
}

#[test]
fn transparent_voxels_are_dropped_and_translucent_become_glass() {
    let mut voxels = HashMap::new();
    voxels.insert((0, 0, 0), [10, 10, 10, 0]);
    voxels.insert((1, 0, 0), [10, 10, 10, 100]);
    voxels.insert((2, 0, 0), [10, 10, 10, 255]);
    let parts = parts_from_voxels(&voxels, "stone");
    assert_eq!(parts.len(), 2);
    let by_x = |x| parts.iter().find(|p| p.pos.x == x).unwrap();
    assert_eq!(by_x(1).shape_id, GLASS_SHAPE_ID);
    assert_eq!(by_x(2).shape_id, DEFAULT_SHAPE_ID);
}

#[test]
fn wood_blocks_pick_the_wood_material() {
    assert_ne!(shape_id_for_block("oak_planks"), DEFAULT_SHAPE_ID);
    assert_ne!(shape_id_for_block("dark_oak_log"), DEFAULT_SHAPE_ID);
    assert_eq!(shape_id_for_block("stone"), DEFAULT_SHAPE_ID);
}

#[test]
fn written_blueprint_round_trips_through_the_reader() {
    let dir = scratch_dir("roundtrip");
    let mut voxels = HashMap::new();
    voxels.insert((0, 0, 0), [200, 100, 50, 255]);
    voxels.insert((0, 1, 0), [20, 30, 40, 255]);
    let parts = parts_from_voxels(&voxels, "stone");

    let written = write_blueprint(parts.clone(), &dir, "stone", "unit block").unwrap();
    assert_eq!(written.folder, dir.join(&written.id));
    assert!(written.folder.join("icon.png").is_file());

    let raw = fs::read_to_string(written.folder.join("description.json")).unwrap();
    let desc: DescriptionFile = serde_json::from_str(&raw).unwrap();
    assert_eq!(desc.name, "stone");
    assert_eq!(desc.local_id, written.id);
    assert_eq!(desc.kind, "Blueprint");

    let loaded = load_blueprint_parts(&written.folder).unwrap();
    assert_eq!(loaded, parts);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn blueprint_json_is_compact() {
    let dir = scratch_dir("compact");
    let mut voxels = HashMap::new();
    voxels.insert((0, 0, 0), [1, 2, 3, 255]);
    let written = write_blueprint(parts_from_voxels(&voxels, "stone"), &dir, "s", "").unwrap();
    let raw = fs::read_to_string(written.folder.join("blueprint.json")).unwrap();
    assert!(!raw.contains('\n'));
    assert!(raw.contains("\"version\":4"));
    assert!(raw.contains("\"shapeId\""));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unit_lookup_matches_name_variations() {
    let dir = scratch_dir("lookup");
    let mut voxels = HashMap::new();
    voxels.insert((0, 0, 0), [90, 60, 30, 255]);
    write_blueprint(parts_from_voxels(&voxels, "oak_planks"), &dir, "oak_planks", "").unwrap();

    assert!(find_unit_blueprint(&dir, "oak_planks").is_some());
    // Flattened and component forms also match.
    assert!(find_unit_blueprint(&dir, "oakplanks").is_some());
    assert!(find_unit_blueprint(&dir, "planks").is_some());
    assert!(find_unit_blueprint(&dir, "glowstone").is_none());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn name_variations_are_ordered_most_specific_first() {
    let v = name_variations("Dark_Oak_Planks");
    assert_eq!(v[0], "dark_oak_planks");
    assert_eq!(v[1], "darkoakplanks");
    assert!(v.contains(&"dark".to_string()));
    assert!(v.contains(&"planks".to_string()));

    let bare = name_variations("stone");
    assert_eq!(bare, vec!["stone".to_string()]);
}
