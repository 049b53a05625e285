//! tessera CLI — validate meshes, build and inspect interleaved buffers.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tessera")]
#[command(version, about = "tessera — vertex normals and interleaved GPU buffers for triangle meshes")]
struct Cli {
    /// Also write logs to this file (truncated on start).
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a mesh file for out-of-range indices and non-finite positions.
    Validate {
        /// Path to mesh JSON (`positions` + `triangles`).
        path: PathBuf,
    },

    /// Build normals and packed buffers for a mesh.
    Build {
        /// Path to mesh JSON.
        path: PathBuf,

        /// Build configuration (TOML).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write packed buffers, layout and draw command as JSON.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the interleaved vertex layout.
    Layout,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::init_logging(cli.log_file.as_deref()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Validate { path } => commands::validate(&path),
        Commands::Build {
            path,
            config,
            output,
        } => commands::build(&path, config.as_deref(), output.as_deref()),
        Commands::Layout => commands::layout(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
