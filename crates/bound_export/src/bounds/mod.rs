//! Bound hierarchy export
//!
//! Turns a tree of typed scene objects into a [`BoundFile`] record tree:
//! composite → child bounds → geometry → polygons.
//!
//! # Module Organization
//!
//! - [`extents`] - Extents, centers and radii of object trees
//! - [`material_registry`] - Per-geometry collision material list
//! - [`polygon_builder`] - Box/sphere/cylinder/capsule polygons
//! - [`geometry_builder`] - Vertex pool and geometry bounds
//! - [`bound_builder`] - Common bound fields, bound dispatch, composites
//! - [`records`] - The record tree
//! - [`writer`] - Output sinks for a finished record tree
//! - [`export`] - Export entry points

pub mod bound_builder;
pub mod export;
pub mod extents;
pub mod geometry_builder;
pub mod material_registry;
pub mod polygon_builder;
pub mod records;
pub mod writer;

#[cfg(test)]
mod tests;

use log::warn;

use crate::core::ExportSettings;
use crate::error::{ExportError, Result};
use crate::scene::{ObjectId, Scene, SceneObject};

pub use bound_builder::{build_bound, build_composite, init_bound, init_bound_item};
pub use export::{bounds_from_object, export_ybn};
pub use geometry_builder::{build_geometry, GeometryBuilder, GeometryKind, VertexPool};
pub use material_registry::MaterialRegistry;
pub use polygon_builder::build_polygon;
pub use records::{
    BoundCommon, BoundFile, BoundGeometry, BoundItem, BoundKind, BoundsComposite, MaterialItem,
    Polygon, MAX_GEOMETRY_VERTICES,
};
pub use writer::{BoundWriter, RonBoundWriter};

/// Borrowed inputs shared by every builder of one export
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// Scene being exported
    pub scene: &'a Scene,
    /// Export settings
    pub settings: &'a ExportSettings,
}

impl<'a> BuildContext<'a> {
    /// Create a context
    pub fn new(scene: &'a Scene, settings: &'a ExportSettings) -> Self {
        Self { scene, settings }
    }

    /// Look up an object
    pub fn object(&self, id: ObjectId) -> Result<&'a SceneObject> {
        self.scene.object(id).ok_or(ExportError::UnknownObject)
    }

    /// Descendants of `id` in pre-order
    ///
    /// A cyclic hierarchy is cut with a warning, or rejected in strict mode.
    pub fn descendants(&self, id: ObjectId) -> Result<Vec<ObjectId>> {
        let walk = self.scene.walk_descendants(id);
        if let Some(revisited) = walk.revisited {
            if self.settings.strict {
                return Err(ExportError::CyclicHierarchy {
                    object: self.scene.object_name(id).to_string(),
                });
            }
            warn!(
                "Hierarchy below '{}' is cyclic at '{}', skipping repeated objects",
                self.scene.object_name(id),
                self.scene.object_name(revisited)
            );
        }
        Ok(walk.ids)
    }
}
