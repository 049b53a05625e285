//! Interleaved buffer layout and index buffer constants.
//!
//! These values are part of the public contract with the upload layer.
//! Every consumer that binds vertex attributes reads them from here.

/// Floats per position or normal attribute.
pub const COMPONENTS_PER_ATTRIBUTE: usize = 3;

/// Floats per vertex block in the interleaved buffer (position.xyz, normal.xyz).
pub const FLOATS_PER_VERTEX: usize = 6;

/// Offset of the position attribute within a vertex block, in floats.
pub const POSITION_OFFSET_FLOATS: usize = 0;

/// Offset of the normal attribute within a vertex block, in floats.
pub const NORMAL_OFFSET_FLOATS: usize = 3;

/// Indices emitted per triangular face.
pub const INDICES_PER_FACE: usize = 3;

/// Size of one buffer float in bytes.
pub const FLOAT_SIZE: usize = std::mem::size_of::<f32>();

/// Distance in bytes between consecutive vertex blocks.
pub const VERTEX_STRIDE_BYTES: usize = FLOATS_PER_VERTEX * FLOAT_SIZE;

/// Byte offset of the normal attribute within a vertex block.
pub const NORMAL_OFFSET_BYTES: usize = NORMAL_OFFSET_FLOATS * FLOAT_SIZE;

/// Shader attribute location of the position.
pub const POSITION_LOCATION: u32 = 0;

/// Shader attribute location of the normal.
pub const NORMAL_LOCATION: u32 = 1;
