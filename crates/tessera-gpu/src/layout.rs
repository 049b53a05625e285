//! Vertex attribute layout of the interleaved buffer.
//!
//! The packed vertex buffer is a sequence of 24-byte blocks:
//!
//! ```text
//! offset  0        12       24
//!         | px py pz | nx ny nz | px py pz | ...
//!           loc 0      loc 1
//! ```

use serde::{Deserialize, Serialize};
use tessera_types::constants::{
    COMPONENTS_PER_ATTRIBUTE, FLOAT_SIZE, NORMAL_LOCATION, NORMAL_OFFSET_BYTES,
    POSITION_LOCATION, POSITION_OFFSET_FLOATS, VERTEX_STRIDE_BYTES,
};
use tessera_types::{TesseraError, TesseraResult};

/// One `f32` vector attribute inside a vertex block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexAttribute {
    /// Shader input location.
    pub location: u32,
    /// Number of `f32` components.
    pub components: u32,
    /// Offset from the start of the vertex block, in bytes.
    pub byte_offset: u32,
}

impl VertexAttribute {
    /// Size of the attribute in bytes, or `None` if it overflows `u32`.
    pub fn byte_len(&self) -> Option<u32> {
        self.components.checked_mul(FLOAT_SIZE as u32)
    }

    /// One past the last byte of the attribute, or `None` if it overflows `u32`.
    pub fn byte_end(&self) -> Option<u32> {
        self.byte_offset.checked_add(self.byte_len()?)
    }
}

/// Stride and attributes of an interleaved vertex buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexLayout {
    /// Distance between consecutive vertex blocks, in bytes.
    pub stride_bytes: u32,
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Position at location 0 (offset 0), normal at location 1 (offset 12), stride 24.
    pub fn interleaved_position_normal() -> Self {
        Self {
            stride_bytes: VERTEX_STRIDE_BYTES as u32,
            attributes: vec![
                VertexAttribute {
                    location: POSITION_LOCATION,
                    components: COMPONENTS_PER_ATTRIBUTE as u32,
                    byte_offset: (POSITION_OFFSET_FLOATS * FLOAT_SIZE) as u32,
                },
                VertexAttribute {
                    location: NORMAL_LOCATION,
                    components: COMPONENTS_PER_ATTRIBUTE as u32,
                    byte_offset: NORMAL_OFFSET_BYTES as u32,
                },
            ],
        }
    }

    /// Looks up the attribute bound to `location`.
    pub fn attribute(&self, location: u32) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.location == location)
    }

    /// Checks that attributes fit inside the stride, do not overlap,
    /// and use distinct locations.
    pub fn validate(&self) -> TesseraResult<()> {
        if self.stride_bytes == 0 {
            return Err(TesseraError::Upload("Vertex stride is zero".into()));
        }

        let mut spans: Vec<(u32, u32)> = Vec::with_capacity(self.attributes.len());
        for (i, attr) in self.attributes.iter().enumerate() {
            if attr.components == 0 {
                return Err(TesseraError::Upload(format!(
                    "Attribute at location {} has no components",
                    attr.location
                )));
            }
            let end = attr.byte_end().ok_or_else(|| {
                TesseraError::Upload(format!(
                    "Attribute at location {} overflows the addressable range",
                    attr.location
                ))
            })?;
            if end > self.stride_bytes {
                return Err(TesseraError::Upload(format!(
                    "Attribute at location {} ends at byte {} past stride {}",
                    attr.location, end, self.stride_bytes
                )));
            }
            if self.attributes[..i].iter().any(|a| a.location == attr.location) {
                return Err(TesseraError::Upload(format!(
                    "Location {} is bound twice",
                    attr.location
                )));
            }
            spans.push((attr.byte_offset, end));
        }

        spans.sort_unstable();
        if spans.windows(2).any(|w| w[0].1 > w[1].0) {
            return Err(TesseraError::Upload("Vertex attributes overlap".into()));
        }

        Ok(())
    }
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self::interleaved_position_normal()
    }
}
