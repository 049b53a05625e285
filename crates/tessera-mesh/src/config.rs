//! Geometry build configuration.
//!
//! Controls validation and the vertex normal accumulator. Loadable
//! from TOML; missing keys fall back to [`BuildConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tessera_types::{TesseraError, TesseraResult};

use crate::normals::{AdjacencyStrategy, NormalConfig, NormalWeighting};

/// Configuration for [`Geometry::build`](crate::Geometry::build).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Reject meshes with NaN or infinite positions before building.
    ///
    /// Off by default: non-finite positions are accepted and their faces
    /// get zero normals.
    pub validate_finite: bool,

    /// Vertex normal accumulator settings.
    pub normals: NormalConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            validate_finite: false,
            normals: NormalConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Reference configuration: full adjacency scan on one thread.
    pub fn debug() -> Self {
        Self {
            normals: NormalConfig {
                strategy: AdjacencyStrategy::Scan,
                weighting: NormalWeighting::Uniform,
                parallel: false,
            },
            ..Default::default()
        }
    }

    /// Adjacency index with the per-vertex map on the rayon pool.
    pub fn fast() -> Self {
        Self {
            normals: NormalConfig {
                strategy: AdjacencyStrategy::Indexed,
                weighting: NormalWeighting::Uniform,
                parallel: true,
            },
            ..Default::default()
        }
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> TesseraResult<Self> {
        toml::from_str(text).map_err(|e| TesseraError::InvalidConfig(e.to_string()))
    }

    /// Loads a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> TesseraResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Serializes the configuration to TOML text.
    pub fn to_toml(&self) -> TesseraResult<String> {
        toml::to_string(self).map_err(|e| TesseraError::Serialization(e.to_string()))
    }
}
