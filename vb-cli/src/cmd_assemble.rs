use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;
use vb_assemble::{PlacedVoxel, UnitResolver, assemble, deduplicate, hollow, split};
use vb_blueprint::{Part, Vec3i, color_hex, write_blueprint};
use vb_schematic::{LegacyRegistry, Schematic};

#[derive(Args)]
pub struct AssembleArgs {
    /// Schematic file, gzipped NBT or a pre-converted `.json` dump
    pub schematic: PathBuf,
    /// Folder containing generated unit blueprints
    #[arg(short, long)]
    pub blueprints: PathBuf,
    /// Output directory for the assembled blueprint
    #[arg(short, long, default_value = "./assembled_blueprints")]
    pub output: PathBuf,
    /// Name for the assembled blueprint
    #[arg(short, long, default_value = "MinecraftSchematic")]
    pub name: String,
    /// Keep interior voxels instead of hollowing them out
    #[arg(long)]
    pub no_hollow: bool,
    /// Resource pack `assets` directory, used to voxelize blocks that have
    /// no stored unit blueprint
    #[arg(long)]
    pub assets: Option<PathBuf>,
    /// Split the result into blueprints of at most this many voxels
    #[arg(long, default_value_t = 50_000)]
    pub max_chunk_voxels: usize,
}

pub fn run(args: AssembleArgs) -> Result<(), String> {
    let schematic = read_schematic(&args.schematic)?;
    info!(
        "schematic dimensions: {}x{}x{}",
        schematic.width, schematic.height, schematic.length
    );
    let blocks = schematic.placed_blocks(&LegacyRegistry);
    info!("non-air blocks: {}", blocks.len());

    let mut resolver = UnitResolver::new(Some(args.blueprints.clone()), args.assets.clone());
    let (structure, summary) = assemble(&blocks, &mut resolver);
    summary.log();

    let mut structure = deduplicate(structure);
    if !args.no_hollow {
        let before = structure.len();
        structure = hollow(structure);
        info!("hollowed {before} -> {} voxels", structure.len());
    }
    let chunks = split(structure, args.max_chunk_voxels);

    fs::create_dir_all(&args.output)
        .map_err(|err| format!("failed to create {}: {err}", args.output.display()))?;
    let description = format!(
        "Voxel copy of Minecraft schematic - {}x{}x{}",
        schematic.width, schematic.height, schematic.length
    );
    let chunked = chunks.len() > 1;
    for chunk in chunks {
        let parts: Vec<Part> = chunk.voxels.iter().map(to_part).collect();
        let name = if chunked {
            format!("{}_part{}", args.name, chunk.id + 1)
        } else {
            args.name.clone()
        };
        let written = write_blueprint(parts, &args.output, &name, &description)
            .map_err(|err| err.to_string())?;
        info!(
            "wrote {name} ({} voxels) to {}",
            chunk.voxel_count(),
            written.folder.display()
        );
    }
    Ok(())
}

fn to_part(voxel: &PlacedVoxel) -> Part {
    Part {
        bounds: Vec3i::UNIT,
        shape_id: voxel.shape_id.clone(),
        color: color_hex(voxel.color),
        pos: Vec3i::new(voxel.pos.0, voxel.pos.1, voxel.pos.2),
        xaxis: voxel.orientation.0,
        zaxis: voxel.orientation.1,
    }
}

fn read_schematic(path: &Path) -> Result<Schematic, String> {
    if path.extension().is_some_and(|ext| ext == "json") {
        let raw = fs::read_to_string(path)
            .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|err| format!("failed to parse {}: {err}", path.display()))?;
        Schematic::from_json(&value).map_err(|err| err.to_string())
    } else {
        let (_, root) = vb_nbt::read_gzip(path)
            .map_err(|err| format!("failed to decode {}: {err}", path.display()))?;
        Schematic::from_tag(&root).map_err(|err| err.to_string())
    }
}
