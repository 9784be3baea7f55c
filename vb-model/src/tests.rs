use super::*;
use image::RgbaImage;

fn textures(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn texture_variable_follows_references() {
    let table = textures(&[("all", "#side"), ("side", "minecraft:block/stone")]);
    assert_eq!(
        resolve_texture_variable("#all", &table),
        "minecraft:block/stone"
    );
}

#[test]
fn double_hash_reference_is_normalized() {
    let table = textures(&[("torch", "minecraft:block/torch")]);
    assert_eq!(
        resolve_texture_variable("##torch", &table),
        "minecraft:block/torch"
    );
}

#[test]
fn unresolved_variable_degrades_to_key() {
    let table = textures(&[]);
    assert_eq!(resolve_texture_variable("#torch", &table), "torch");
}

#[test]
fn self_referencing_variable_terminates() {
    let table = textures(&[("loop", "#loop")]);
    assert_eq!(resolve_texture_variable("#loop", &table), "loop");
}

#[test]
fn texture_path_defaults_namespace_and_folder() {
    let assets = Path::new("/assets");
    assert_eq!(
        texture_file_path("stone", assets),
        Path::new("/assets/minecraft/textures/block/stone.png")
    );
    assert_eq!(
        texture_file_path("minecraft:block/oak_planks", assets),
        Path::new("/assets/minecraft/textures/block/oak_planks.png")
    );
    assert_eq!(
        texture_file_path("custom:item/gem.png", assets),
        Path::new("/assets/custom/textures/item/gem.png")
    );
}

#[test]
fn resolve_model_builds_elements_with_faces() {
    let raw = serde_json::json!({
        "from": [0.0, 0.0, 0.0],
        "to": [16.0, 8.0, 16.0],
        "rotation": {"origin": [8.0, 8.0, 8.0], "axis": "y", "angle": 45.0},
        "faces": {
            "up": {"texture": "#top", "uv": [0.0, 0.0, 16.0, 16.0]},
            "north": {"texture": "#side", "rotation": 90},
            "bogus": {"texture": "#side"}
        }
    });
    let model = Model {
        textures: textures(&[("top", "block/stone"), ("side", "block/dirt")]),
        elements: vec![serde_json::from_value(raw).unwrap()],
    };

    let elements = resolve_model(&model, Path::new("/assets"));
    assert_eq!(elements.len(), 1);
    let elem = &elements[0];
    assert_eq!(elem.to[1], 8.0);

    let rot = elem.rotation.as_ref().unwrap();
    assert_eq!(rot.axis, RotationAxis::Y);
    assert_eq!(rot.origin, [8.0, 8.0, 8.0]);

    // Unknown face names are dropped; known ones carry resolved paths.
    assert_eq!(elem.faces.len(), 2);
    let up = &elem.faces[&Face::Up];
    assert_eq!(
        up.texture_file.as_deref(),
        Some(Path::new("/assets/minecraft/textures/block/stone.png"))
    );
    assert_eq!(up.uv, Some([0.0, 0.0, 16.0, 16.0]));
    assert_eq!(up.rotation, 0);
    assert_eq!(elem.faces[&Face::North].rotation, 90);
}

#[test]
fn zero_angle_rotation_is_dropped() {
    let rot = JsonRotation {
        origin: Some([8.0, 0.0, 8.0]),
        axis: Some("x".to_string()),
        angle: 0.0,
    };
    assert!(convert_rotation(&rot).is_none());
}

#[test]
fn sampler_is_nearest_with_edge_clamp() {
    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(0, 0, image::Rgba([10, 0, 0, 255]));
    img.put_pixel(1, 0, image::Rgba([20, 0, 0, 255]));
    img.put_pixel(0, 1, image::Rgba([30, 0, 0, 255]));
    img.put_pixel(1, 1, image::Rgba([40, 0, 0, 255]));

    assert_eq!(sample(&img, 0.0, 0.0), Some([10, 0, 0, 255]));
    assert_eq!(sample(&img, 0.75, 0.25), Some([20, 0, 0, 255]));
    // Exactly 1.0 and out-of-range both clamp to the last texel.
    assert_eq!(sample(&img, 1.0, 1.0), Some([40, 0, 0, 255]));
    assert_eq!(sample(&img, 5.0, -3.0), Some([20, 0, 0, 255]));
}

#[test]
fn cache_serves_preloaded_images() {
    let mut cache = TextureCache::new();
    let path = PathBuf::from("/virtual/stone.png");
    cache.insert(path.clone(), RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255])));
    let img = cache.load(&path).unwrap();
    assert_eq!(img.width(), 4);
}
