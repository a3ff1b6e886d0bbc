//! Export errors

use thiserror::Error;

use crate::config::ConfigError;

/// Result alias used across the export pipeline
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors surfaced by the bound and drawable dictionary exports
///
/// Every variant is fatal to the export that raised it; nothing is retried.
#[derive(Error, Debug)]
pub enum ExportError {
    /// A geometry bound produced neither mesh triangles nor primitive polygons
    #[error("bound geometry has no geometry")]
    NoGeometry {
        /// Name of the geometry object
        object: String,
    },

    /// The deduplicated vertex pool of a geometry bound is too large
    #[error("{object} can only have at most {limit} vertices")]
    VerticesLimit {
        /// Name of the geometry object
        object: String,
        /// Hard ceiling of the format
        limit: usize,
    },

    /// A triangle source object has no mesh data (strict mode only)
    #[error("{object} is a triangle source but has no mesh data")]
    MissingMesh {
        /// Name of the offending object
        object: String,
    },

    /// The object hierarchy revisits an object (strict mode only)
    #[error("object hierarchy below {object} is cyclic")]
    CyclicHierarchy {
        /// Name of the object whose traversal detected the cycle
        object: String,
    },

    /// An object id that is not part of the scene
    #[error("object is not part of the scene")]
    UnknownObject,

    /// A scene description references a material that was not declared
    #[error("unknown material '{name}'")]
    UnknownMaterial {
        /// Referenced material name
        name: String,
    },

    /// IO error while writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record tree serialization failure
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Configuration or scene description error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
