//! Scene storage and hierarchy queries
//!
//! Objects and materials live in slot maps; hierarchy links are ids. The
//! graph is read-only while an export runs, so exports only ever borrow it.

use std::collections::HashSet;

use log::warn;
use slotmap::SlotMap;

use super::material::Material;
use super::object::SceneObject;
use super::{MaterialId, ObjectId};
use crate::foundation::math::Mat4;

/// Result of a pre-order walk below an object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descendants {
    /// Descendants in pre-order, depth first
    pub ids: Vec<ObjectId>,
    /// First object reached a second time, if the links form a cycle
    pub revisited: Option<ObjectId>,
}

/// An in-memory scene: objects, materials and their hierarchy
#[derive(Debug, Default)]
pub struct Scene {
    objects: SlotMap<ObjectId, SceneObject>,
    materials: SlotMap<MaterialId, Material>,
    roots: Vec<ObjectId>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.insert(material)
    }

    /// Add an object at the root of the hierarchy
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = self.objects.insert(SceneObject {
            parent: None,
            children: Vec::new(),
            ..object
        });
        self.roots.push(id);
        id
    }

    /// Add an object as the last child of `parent`
    ///
    /// Returns `None` if `parent` is not part of the scene.
    pub fn add_child(&mut self, parent: ObjectId, object: SceneObject) -> Option<ObjectId> {
        if !self.objects.contains_key(parent) {
            return None;
        }
        let id = self.add_object(object);
        self.set_parent(id, Some(parent));
        Some(id)
    }

    /// Re-parent an object, `None` moves it to the root
    ///
    /// Links are not checked for cycles; traversals detect and report them.
    /// Returns `false` if either id is unknown.
    pub fn set_parent(&mut self, child: ObjectId, parent: Option<ObjectId>) -> bool {
        if !self.objects.contains_key(child) || parent.is_some_and(|p| !self.objects.contains_key(p)) {
            return false;
        }

        let previous = self.objects[child].parent;
        match previous {
            Some(old) => self.objects[old].children.retain(|&c| c != child),
            None => self.roots.retain(|&r| r != child),
        }

        match parent {
            Some(new) => self.objects[new].children.push(child),
            None => self.roots.push(child),
        }
        self.objects[child].parent = parent;
        true
    }

    /// Look up an object
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// Look up an object mutably
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    /// Look up a material
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Find the first object with a given name
    pub fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().find(|(_, o)| o.name == name).map(|(id, _)| id)
    }

    /// Root objects, in insertion order
    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }

    /// Number of objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Direct children of an object
    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        self.objects.get(id).map_or(&[], |o| o.children())
    }

    /// Walk every descendant of `id` in pre-order, depth first
    ///
    /// The walk never enters an object twice; the first revisit is recorded
    /// in [`Descendants::revisited`].
    pub fn walk_descendants(&self, id: ObjectId) -> Descendants {
        let mut result = Descendants::default();
        let mut visited = HashSet::new();
        visited.insert(id);

        // Children pushed in reverse so they pop in order
        let mut stack: Vec<ObjectId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if !visited.insert(next) {
                result.revisited.get_or_insert(next);
                continue;
            }
            result.ids.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }

        result
    }

    /// Every descendant of `id` in pre-order; cycles are cut with a warning
    pub fn children_recursive(&self, id: ObjectId) -> Vec<ObjectId> {
        let walk = self.walk_descendants(id);
        if let Some(revisited) = walk.revisited {
            warn!(
                "Hierarchy below '{}' is cyclic at '{}', skipping repeated objects",
                self.object_name(id),
                self.object_name(revisited)
            );
        }
        walk.ids
    }

    /// World matrix: parent chain of local matrices, outermost first
    ///
    /// A cyclic parent chain stops after every object has been visited once.
    pub fn matrix_world(&self, id: ObjectId) -> Mat4 {
        let mut matrix = Mat4::identity();
        let mut current = Some(id);
        let mut remaining = self.objects.len();

        while let Some(object_id) = current {
            let Some(object) = self.objects.get(object_id) else {
                break;
            };
            if remaining == 0 {
                break;
            }
            matrix = object.matrix_local * matrix;
            current = object.parent;
            remaining -= 1;
        }

        matrix
    }

    /// Name of an object, empty if unknown
    pub fn object_name(&self, id: ObjectId) -> &str {
        self.objects.get(id).map_or("", |o| o.name.as_str())
    }
}
