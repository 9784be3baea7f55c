use super::*;
use serde_json::json;

struct TestLookup;

impl BlockLookup for TestLookup {
    fn block_name(&self, id: i32, _data: u8) -> Option<String> {
        match id {
            1 => Some("stone".to_string()),
            5 => Some("oak_planks".to_string()),
            53 => Some("oak_stairs".to_string()),
            _ => None,
        }
    }
}

fn legacy_json(width: i32, height: i32, length: i32, blocks: Vec<i64>, data: Vec<i64>) -> Schematic {
    let root = json!({
        "Schematic": {
            "Width": width,
            "Height": height,
            "Length": length,
            "Blocks": blocks,
            "Data": data,
        }
    });
    Schematic::from_json(&root).unwrap()
}

#[test]
fn enumeration_order_is_y_then_z_then_x() {
    // 2x2x2 grid, every cell stone; positions must come back YZX-ordered.
    let schem = legacy_json(2, 2, 2, vec![1; 8], vec![0; 8]);
    let blocks = schem.placed_blocks(&TestLookup);
    let positions: Vec<_> = blocks.iter().map(|b| (b.x, b.y, b.z)).collect();
    assert_eq!(
        positions,
        vec![
            (0, 0, 0),
            (1, 0, 0),
            (0, 0, 1),
            (1, 0, 1),
            (0, 1, 0),
            (1, 1, 0),
            (0, 1, 1),
            (1, 1, 1),
        ]
    );
}

#[test]
fn flat_index_addresses_direct_lookup() {
    let (w, h, l) = (3, 2, 4);
    let mut blocks = vec![0i64; (w * h * l) as usize];
    let (x, y, z) = (2, 1, 3);
    blocks[((y * l + z) * w + x) as usize] = 1;
    let schem = legacy_json(w, h, l, blocks, vec![0; (w * h * l) as usize]);
    let placed = schem.placed_blocks(&TestLookup);
    assert_eq!(placed.len(), 1);
    assert_eq!((placed[0].x, placed[0].y, placed[0].z), (x, y, z));
}

#[test]
fn air_cells_are_skipped() {
    let schem = legacy_json(2, 1, 1, vec![0, 1], vec![0, 0]);
    let placed = schem.placed_blocks(&TestLookup);
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].name, "stone");
}

#[test]
fn unknown_legacy_id_keeps_a_name() {
    let schem = legacy_json(1, 1, 1, vec![200], vec![0]);
    let placed = schem.placed_blocks(&TestLookup);
    assert_eq!(placed[0].name, "block_200");
}

#[test]
fn palette_and_legacy_enumerate_identically() {
    let legacy = legacy_json(2, 1, 2, vec![1, 0, 5, 1], vec![0; 4]);

    let palette = json!({
        "Schematic": {
            "Width": 2,
            "Height": 1,
            "Length": 2,
            "Blocks": {
                "Palette": {
                    "minecraft:air": 0,
                    "minecraft:stone": 1,
                    "minecraft:oak_planks": 2,
                },
                "Data": [1, 0, 2, 1],
            }
        }
    });
    let palette = Schematic::from_json(&palette).unwrap();

    let a: Vec<_> = legacy
        .placed_blocks(&TestLookup)
        .into_iter()
        .map(|b| (b.x, b.y, b.z, b.name))
        .collect();
    let b: Vec<_> = palette
        .placed_blocks(&TestLookup)
        .into_iter()
        .map(|b| (b.x, b.y, b.z, b.name))
        .collect();
    assert_eq!(a, b);
}

#[test]
fn unresolved_palette_index_maps_to_air() {
    let root = json!({
        "Schematic": {
            "Width": 2,
            "Height": 1,
            "Length": 1,
            "Blocks": {
                "Palette": {"minecraft:stone": 0},
                "Data": [0, 7],
            }
        }
    });
    let schem = Schematic::from_json(&root).unwrap();
    assert_eq!(schem.placed_blocks(&TestLookup).len(), 1);
}

#[test]
fn schematic_may_nest_under_empty_key() {
    let root = json!({
        "": {
            "Schematic": {
                "Width": 1,
                "Height": 1,
                "Length": 1,
                "Blocks": [1],
                "Data": [0],
            }
        }
    });
    let schem = Schematic::from_json(&root).unwrap();
    assert_eq!(schem.width, 1);
}

#[test]
fn missing_dimension_is_fatal() {
    let root = json!({"Schematic": {"Width": 2, "Length": 2, "Blocks": [], "Data": []}});
    let err = Schematic::from_json(&root).unwrap_err();
    assert!(matches!(err, SchematicError::MissingKey("Height")));
}

#[test]
fn array_length_mismatch_is_fatal() {
    let root = json!({
        "Schematic": {"Width": 2, "Height": 2, "Length": 2, "Blocks": [1, 1], "Data": [0, 0]}
    });
    let err = Schematic::from_json(&root).unwrap_err();
    assert!(matches!(
        err,
        SchematicError::LengthMismatch {
            expected: 8,
            found: 2
        }
    ));
}

#[test]
fn oversized_long_dimension_is_fatal() {
    use vb_nbt::Tag;
    let root = Tag::Compound(vec![
        ("Width".to_string(), Tag::Long(1 << 40)),
        ("Height".to_string(), Tag::Short(1)),
        ("Length".to_string(), Tag::Short(1)),
        ("Blocks".to_string(), Tag::ByteArray(vec![1])),
        ("Data".to_string(), Tag::ByteArray(vec![0])),
    ]);
    assert!(matches!(
        Schematic::from_tag(&root),
        Err(SchematicError::WrongType("Width"))
    ));
}

#[test]
fn short_legacy_data_array_is_fatal() {
    let root = json!({
        "Schematic": {"Width": 2, "Height": 1, "Length": 1, "Blocks": [1, 1], "Data": [0]}
    });
    let err = Schematic::from_json(&root).unwrap_err();
    assert!(matches!(
        err,
        SchematicError::LengthMismatch {
            expected: 2,
            found: 1
        }
    ));

    use vb_nbt::Tag;
    let root = Tag::Compound(vec![
        ("Width".to_string(), Tag::Short(2)),
        ("Height".to_string(), Tag::Short(1)),
        ("Length".to_string(), Tag::Short(1)),
        ("Blocks".to_string(), Tag::ByteArray(vec![1, 1])),
        ("Data".to_string(), Tag::ByteArray(vec![0])),
    ]);
    assert!(matches!(
        Schematic::from_tag(&root),
        Err(SchematicError::LengthMismatch { .. })
    ));
}

#[test]
fn parses_from_decoded_tag_tree() {
    use vb_nbt::Tag;
    let root = Tag::Compound(vec![
        ("Width".to_string(), Tag::Short(1)),
        ("Height".to_string(), Tag::Short(2)),
        ("Length".to_string(), Tag::Short(1)),
        ("Blocks".to_string(), Tag::ByteArray(vec![1, 0])),
        ("Data".to_string(), Tag::ByteArray(vec![2, 0])),
    ]);
    let schem = Schematic::from_tag(&root).unwrap();
    let placed = schem.placed_blocks(&TestLookup);
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].meta, BlockMeta::Legacy(2));
}

#[test]
fn negative_byte_ids_read_as_unsigned() {
    use vb_nbt::Tag;
    let root = Tag::Compound(vec![
        ("Width".to_string(), Tag::Short(1)),
        ("Height".to_string(), Tag::Short(1)),
        ("Length".to_string(), Tag::Short(1)),
        ("Blocks".to_string(), Tag::ByteArray(vec![-86])), // id 170
        ("Data".to_string(), Tag::ByteArray(vec![0])),
    ]);
    let schem = Schematic::from_tag(&root).unwrap();
    let placed = schem.placed_blocks(&LegacyRegistry);
    assert_eq!(placed[0].name, "hay_block");
}

#[test]
fn dumped_json_feeds_back_into_from_json() {
    use vb_nbt::Tag;
    let root = Tag::Compound(vec![(
        "Schematic".to_string(),
        Tag::Compound(vec![
            ("Width".to_string(), Tag::Short(1)),
            ("Height".to_string(), Tag::Short(1)),
            ("Length".to_string(), Tag::Short(1)),
            ("Blocks".to_string(), Tag::ByteArray(vec![-86])),
            ("Data".to_string(), Tag::ByteArray(vec![0])),
        ]),
    )]);
    let json = tag_to_json(&root);
    // Byte arrays dump as unsigned integers.
    assert_eq!(json["Schematic"]["Blocks"][0], 170);
    let schem = Schematic::from_json(&json).unwrap();
    assert_eq!(schem.placed_blocks(&LegacyRegistry)[0].name, "hay_block");
}

#[test]
fn block_state_string_parses_name_and_props() {
    let state = parse_block_state("minecraft:oak_stairs[facing=north,half=top]");
    assert_eq!(state.name, "oak_stairs");
    assert_eq!(
        state.props,
        vec![
            ("facing".to_string(), "north".to_string()),
            ("half".to_string(), "top".to_string()),
        ]
    );

    let bare = parse_block_state("stone");
    assert_eq!(bare.name, "stone");
    assert!(bare.props.is_empty());
}

#[test]
fn stairs_orientation_covers_directions_and_flip() {
    let m = BlockMeta::Legacy;
    assert_eq!(derive_orientation("oak_stairs", &m(0)), (1, 3));
    assert_eq!(derive_orientation("oak_stairs", &m(1)), (-1, 3));
    assert_eq!(derive_orientation("oak_stairs", &m(2)), (3, 1));
    assert_eq!(derive_orientation("oak_stairs", &m(3)), (-3, 1));
    // Bit 0x4 flips the up axis.
    assert_eq!(derive_orientation("oak_stairs", &m(6)), (3, -1));

    let props = BlockMeta::Props(vec![
        ("facing".to_string(), "south".to_string()),
        ("half".to_string(), "top".to_string()),
    ]);
    assert_eq!(derive_orientation("oak_stairs", &props), (3, -1));
}

#[test]
fn log_orientation_follows_axis() {
    let m = BlockMeta::Legacy;
    assert_eq!(derive_orientation("oak_log", &m(0)), (1, 2));
    assert_eq!(derive_orientation("oak_log", &m(4)), (2, 1));
    assert_eq!(derive_orientation("oak_log", &m(8)), (1, 3));

    let props = BlockMeta::Props(vec![("axis".to_string(), "x".to_string())]);
    assert_eq!(derive_orientation("birch_log", &props), (2, 1));
}

#[test]
fn torch_and_slab_rules() {
    let m = BlockMeta::Legacy;
    assert_eq!(derive_orientation("torch", &m(5)), (1, 2));
    assert_eq!(derive_orientation("torch", &m(2)), (-1, 3));
    assert_eq!(derive_orientation("stone_slab", &m(0)), (1, -2));
    assert_eq!(derive_orientation("stone_slab", &m(8)), (1, 2));
}

#[test]
fn unmatched_names_get_default_orientation() {
    assert_eq!(
        derive_orientation("glowstone", &BlockMeta::Legacy(13)),
        DEFAULT_ORIENTATION
    );
    assert_eq!(
        derive_orientation("bricks", &BlockMeta::Props(Vec::new())),
        DEFAULT_ORIENTATION
    );
}
