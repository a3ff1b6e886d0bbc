//! Scene object model
//!
//! The host side of an export: typed objects with transforms, meshes and
//! bound properties, arranged in a hierarchy, plus the materials they use.
//! Exports only read from a [`Scene`].
//!
//! # Module Organization
//!
//! - [`scene_graph`] - Object/material storage and hierarchy queries
//! - [`object`] - Scene objects, kinds and composite flags
//! - [`material`] - Collision and shader materials
//! - [`mesh`] - Loop-indexed mesh data and tessellation
//! - [`description`] - Serializable scene descriptions

pub mod description;
pub mod material;
pub mod mesh;
pub mod object;
pub mod scene_graph;

slotmap::new_key_type! {
    /// Handle of an object in a [`Scene`]
    pub struct ObjectId;
    /// Handle of a material in a [`Scene`]
    pub struct MaterialId;
}

pub use description::{MaterialDescription, MeshDescription, ObjectDescription, SceneDescription};
pub use material::{CollisionMatFlags, CollisionProperties, Material, MaterialKind};
pub use mesh::{ColorLayer, LoopTriangle, MeshData, MeshPolygon};
pub use object::{BoundFlags, BoundProperties, ObjectKind, SceneObject};
pub use scene_graph::{Descendants, Scene};
