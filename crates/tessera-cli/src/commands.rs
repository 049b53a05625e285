//! CLI command implementations.

use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tessera_gpu::{upload, DrawCommand, RecordingBackend, VertexLayout};
use tessera_mesh::{BuildConfig, ElementCounts, Geometry, MeshInput};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

type CmdResult = Result<(), Box<dyn Error>>;

/// Everything `build --output` writes.
#[derive(Serialize)]
struct BuildReport<'a> {
    counts: ElementCounts,
    layout: &'a VertexLayout,
    draw: DrawCommand,
    vertices: &'a [f32],
    indices: &'a [u32],
}

/// Installs the global subscriber: stderr, plus an optional log file.
///
/// Level comes from `RUST_LOG`, defaulting to `info`.
pub fn init_logging(log_file: Option<&Path>) -> CmdResult {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()?;
    Ok(())
}

fn load_mesh(path: &Path) -> Result<MeshInput, Box<dyn Error>> {
    let content = std::fs::read_to_string(path)?;
    let mesh: MeshInput = serde_json::from_str(&content)?;
    debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "mesh loaded"
    );
    Ok(mesh)
}

/// Validate a mesh file.
pub fn validate(path: &Path) -> CmdResult {
    println!("tessera validator");
    println!("─────────────────");
    println!();

    let mesh = load_mesh(path)?;
    println!("Validating mesh: {}", path.display());
    match mesh.validate_indices().and_then(|_| mesh.validate_finite()) {
        Ok(()) => println!(
            "✅ Mesh is valid ({} verts, {} tris).",
            mesh.vertex_count(),
            mesh.face_count()
        ),
        Err(e) => {
            println!("❌ Mesh validation failed: {e}");
            return Err(e.into());
        }
    }
    Ok(())
}

/// Build normals and buffers for a mesh file.
pub fn build(path: &Path, config_path: Option<&Path>, output_path: Option<&Path>) -> CmdResult {
    println!("tessera build");
    println!("═════════════");
    println!();

    let config = match config_path {
        Some(p) => BuildConfig::load(p)?,
        None => BuildConfig::default(),
    };
    let mesh = load_mesh(path)?;
    println!(
        "Mesh: {} ({} verts, {} tris)",
        path.display(),
        mesh.vertex_count(),
        mesh.face_count()
    );
    println!(
        "Normals: {:?} adjacency, {:?} weighting{}",
        config.normals.strategy,
        config.normals.weighting,
        if config.normals.parallel { ", parallel" } else { "" }
    );

    let geometry = Geometry::build(&mesh, &config)?;
    let mut backend = RecordingBackend::new();
    let gpu_mesh = upload(&geometry, &mut backend)?;
    let draw = gpu_mesh.draw_command();

    let counts = geometry.counts();
    let zero_normals = geometry
        .vertex_normals()
        .iter()
        .filter(|n| n.length_squared() == 0.0)
        .count();
    println!();
    println!("  vertex buffer: {} floats ({} bytes)", geometry.buffers().vertices.len(), geometry.buffers().vertex_bytes().len());
    println!("  index buffer:  {} indices ({} bytes)", counts.indices, geometry.buffers().index_bytes().len());
    println!("  zero normals:  {zero_normals}");
    println!("  draw:          {} elements as {:?}", draw.element_count, draw.topology);

    if let Some(out) = output_path {
        let report = BuildReport {
            counts,
            layout: &gpu_mesh.layout,
            draw,
            vertices: &geometry.buffers().vertices,
            indices: &geometry.buffers().indices,
        };
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(out, json)?;
        println!();
        println!("Wrote {}", out.display());
    }

    Ok(())
}

/// Print the interleaved vertex layout.
pub fn layout() -> CmdResult {
    let layout = VertexLayout::interleaved_position_normal();
    println!("Interleaved vertex layout");
    println!("─────────────────────────");
    println!("stride: {} bytes", layout.stride_bytes);
    for attr in &layout.attributes {
        println!(
            "  location {}: {} x f32 at byte offset {}",
            attr.location, attr.components, attr.byte_offset
        );
    }
    Ok(())
}
