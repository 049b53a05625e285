//! # tessera-types
//!
//! Shared types, identifiers, error types, and buffer layout constants
//! for the tessera mesh geometry pipeline.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other tessera crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{TesseraError, TesseraResult};
pub use ids::{FaceId, VertexId};
