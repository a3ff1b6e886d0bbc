//! # Bound Export
//!
//! Collision bound (ybn) and drawable dictionary (ydd) export from an
//! in-memory scene graph.
//!
//! ## Features
//!
//! - **Bound Hierarchies**: Composite roots with box, sphere, cylinder,
//!   capsule, disc, cloth and polygon-soup child bounds
//! - **Geometry Bounds**: Deduplicated vertex pools, per-geometry collision
//!   materials, triangle meshes plus box/sphere/cylinder/capsule primitives
//! - **Output**: CodeWalker-style XML, or a RON dump of the record tree
//! - **Drawable Dictionaries**: Skeleton assignment and name-hash ordering
//!   around a pluggable drawable exporter
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bound_export::prelude::*;
//!
//! fn main() -> Result<(), ExportError> {
//!     let mut scene = Scene::new();
//!     let root = scene.add_object(SceneObject::new("crate", ObjectKind::BoundComposite));
//!     scene.add_child(
//!         root,
//!         SceneObject::new("body", ObjectKind::BoundBox).with_dimensions(Vec3::new(1.0, 1.0, 0.5)),
//!     );
//!
//!     export_ybn(&scene, root, "crate.ybn.xml", &ExportSettings::default())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;

pub mod bounds;
pub mod config;
pub mod drawable;
pub mod error;
pub mod foundation;
pub mod scene;
pub mod xml;

pub use error::{ExportError, Result};

/// Common imports for export users
pub mod prelude {
    pub use crate::{
        bounds::{
            bounds_from_object, export_ybn, BoundFile, BoundItem, BoundKind, BoundWriter,
            Polygon, RonBoundWriter,
        },
        config::Config,
        core::config::{AppConfig, ExportSettings, OutputFormat},
        drawable::{create_ydd, export_ydd, DrawableExporter, DrawableRecord},
        error::ExportError,
        foundation::math::{Mat4, Quat, Transform, Vec3},
        scene::{
            BoundFlags, CollisionMatFlags, CollisionProperties, Material, MeshData, ObjectId,
            ObjectKind, Scene, SceneDescription, SceneObject,
        },
        xml::XmlBoundWriter,
    };
}
