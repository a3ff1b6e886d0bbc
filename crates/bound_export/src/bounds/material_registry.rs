//! Per-geometry collision material list
//!
//! Each geometry bound owns one registry. Entries are keyed by the source
//! material handle, so a material referenced by several meshes or primitives
//! of the same geometry is stored once.

use std::collections::HashMap;

use log::debug;

use super::records::MaterialItem;
use crate::scene::{CollisionProperties, MaterialId, Scene};

/// Ordered, deduplicated collision materials of one geometry bound
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    items: Vec<MaterialItem>,
    by_source: HashMap<MaterialId, u32>,
}

impl MaterialRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and return its index in this registry
    ///
    /// An absent, unknown or non-collision material maps to index 0 and adds
    /// nothing. Registering the same source material again returns the index
    /// it was first given.
    pub fn register(&mut self, scene: &Scene, material: Option<MaterialId>) -> u32 {
        let Some(id) = material else {
            return 0;
        };
        if let Some(&index) = self.by_source.get(&id) {
            return index;
        }
        let Some(properties) = scene.material(id).and_then(|m| m.collision_properties()) else {
            return 0;
        };

        // Bounded by the material count of a scene, far below u32::MAX
        #[allow(clippy::cast_possible_truncation)]
        let index = self.items.len() as u32;
        self.items.push(material_item(properties));
        self.by_source.insert(id, index);
        index
    }

    /// Index previously assigned to a source material
    pub fn index_of(&self, material: MaterialId) -> Option<u32> {
        self.by_source.get(&material).copied()
    }

    /// Number of registered materials
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no material has been registered
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Registered materials in index order
    pub fn items(&self) -> &[MaterialItem] {
        &self.items
    }

    /// Consume the registry into the material list of a geometry
    ///
    /// Polygons without a collision material point at index 0. A geometry
    /// with polygons but no registered material gets one default entry;
    /// otherwise index 0 is the first registered material and such polygons
    /// share it.
    pub fn finish(self, has_polygons: bool) -> Vec<MaterialItem> {
        let mut items = self.items;
        if items.is_empty() && has_polygons {
            debug!("No collision material registered, adding a default material at index 0");
            items.push(MaterialItem::default());
        }
        items
    }
}

/// Build a material entry from collision properties
pub fn material_item(properties: &CollisionProperties) -> MaterialItem {
    MaterialItem {
        material_type: properties.collision_index,
        procedural_id: properties.procedural_id,
        room_id: properties.room_id,
        ped_density: properties.ped_density,
        material_color_index: properties.material_color_index,
        flags: properties.flags.to_flag_names(),
    }
}
