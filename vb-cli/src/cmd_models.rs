use std::fs;
use std::path::Path;

use tracing::{info, warn};
use vb_assemble::hollow_grid;
use vb_model::{ModelCache, TextureCache, load_model, resolve_model};

pub fn run(input: &Path, output: &Path, hollow: bool) -> Result<(), String> {
    let models_dir = input.join("minecraft").join("models").join("block");
    if !models_dir.is_dir() {
        return Err(format!(
            "cannot find block models in {}",
            models_dir.display()
        ));
    }
    if output.is_dir() {
        info!("clearing output directory {}", output.display());
        fs::remove_dir_all(output)
            .map_err(|err| format!("failed to clear {}: {err}", output.display()))?;
    }
    fs::create_dir_all(output)
        .map_err(|err| format!("failed to create {}: {err}", output.display()))?;

    let mut names: Vec<String> = fs::read_dir(&models_dir)
        .map_err(|err| format!("failed to list {}: {err}", models_dir.display()))?
        .flatten()
        .filter_map(|entry| {
            let file_name = entry.file_name();
            let file_name = file_name.to_str()?;
            Some(file_name.strip_suffix(".json")?.to_string())
        })
        .collect();
    names.sort();

    let mut models = ModelCache::default();
    let mut textures = TextureCache::new();
    let mut exported = 0usize;
    for name in names {
        let key = format!("minecraft:block/{name}");
        let model = match load_model(&key, input, &mut models) {
            Ok(model) => model,
            Err(err) => {
                warn!("skipping {name}: {err}");
                continue;
            }
        };
        // Item and template models carry no cuboids.
        if model.elements.is_empty() {
            continue;
        }
        let elements = resolve_model(&model, input);
        let mut grid = vb_voxel::voxelize(elements, &mut textures);
        if hollow {
            grid = hollow_grid(grid);
        }
        if grid.is_empty() {
            continue;
        }
        let parts = vb_blueprint::parts_from_voxels(&grid, &name);
        let description = format!("Voxel model of Minecraft block {name}");
        vb_blueprint::write_blueprint(parts, output, &name, &description)
            .map_err(|err| err.to_string())?;
        exported += 1;
    }
    info!("exported {exported} unit blueprints to {}", output.display());
    Ok(())
}
