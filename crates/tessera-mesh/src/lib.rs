//! # tessera-mesh
//!
//! Turns an indexed triangle mesh into GPU-ready buffers.
//!
//! ## Pipeline
//!
//! - [`face`] — one unit normal per face, `cross(p1 - p0, p2 - p0)`.
//! - [`topology`] — vertex → face adjacency ([`VertexFaces`]).
//! - [`normals`] — per-vertex averages of adjacent face normals.
//! - [`packer`] — interleaved `[position, normal]` buffer plus flat indices.
//! - [`geometry`] — runs the stages above in order ([`Geometry::build`]).
//!
//! ## Input checks
//!
//! Out-of-range indices always fail the build. Degenerate faces,
//! isolated vertices and non-finite positions do not; they yield zero
//! normals. Set [`BuildConfig::validate_finite`] to reject NaN or
//! infinite positions instead.

pub mod config;
pub mod face;
pub mod geometry;
pub mod mesh;
pub mod normals;
pub mod packer;
pub mod topology;

pub use config::BuildConfig;
pub use geometry::{ElementCounts, Geometry};
pub use mesh::MeshInput;
pub use normals::{AdjacencyStrategy, NormalConfig, NormalWeighting};
pub use packer::PackedBuffers;
pub use topology::VertexFaces;
