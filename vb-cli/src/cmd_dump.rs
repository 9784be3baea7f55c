use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;
use vb_schematic::tag_to_json;

pub fn run(input: &Path, output: Option<PathBuf>) -> Result<(), String> {
    let out_path = output.unwrap_or_else(|| input.with_extension("json"));
    let (root_name, root) = vb_nbt::read_gzip(input)
        .map_err(|err| format!("failed to read NBT from {}: {err}", input.display()))?;

    // Keep the root name (usually "Schematic") as the top-level key.
    let mut obj = serde_json::Map::new();
    obj.insert(root_name, tag_to_json(&root));
    let raw = serde_json::to_string_pretty(&Value::Object(obj)).map_err(|err| err.to_string())?;

    fs::write(&out_path, raw)
        .map_err(|err| format!("failed to write {}: {err}", out_path.display()))?;
    info!("wrote JSON to {}", out_path.display());
    Ok(())
}
