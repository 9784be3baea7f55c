use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd_assemble;
mod cmd_dump;
mod cmd_models;

#[derive(Parser)]
#[command(name = "voxbridge", version, about = "Minecraft resource packs and schematics to Scrap Mechanic blueprints")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Voxelize every block model of a resource pack into unit blueprints
    Models {
        /// Path to the resource pack's `assets` directory
        #[arg(short, long)]
        input: PathBuf,
        /// Output directory for the generated blueprints (cleared first)
        #[arg(short, long)]
        output: PathBuf,
        /// Strip each unit's interior voxels
        #[arg(long)]
        hollow: bool,
    },
    /// Assemble a schematic into one large blueprint
    Assemble(cmd_assemble::AssembleArgs),
    /// Convert a gzipped NBT schematic to JSON
    Dump {
        /// `.schematic` file path
        input: PathBuf,
        /// Output JSON path, defaults to the input with a .json extension
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
    .without_time()
    .compact()
    .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Models {
            input,
            output,
            hollow,
        } => cmd_models::run(&input, &output, hollow),
        Command::Assemble(args) => cmd_assemble::run(args),
        Command::Dump { input, output } => cmd_dump::run(&input, output),
    };
    if let Err(err) = result {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
