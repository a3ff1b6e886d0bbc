//! Serializable scene descriptions
//!
//! A nested, name-referenced form of a [`Scene`] that can be written by hand
//! in RON or TOML and loaded through the [`Config`] trait.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::material::{CollisionProperties, Material};
use super::mesh::MeshData;
use super::object::{BoundFlags, BoundProperties, ObjectKind, SceneObject};
use super::scene_graph::Scene;
use super::{MaterialId, ObjectId};
use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::foundation::math::{Transform, Vec3};

/// Whole-scene description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    /// Materials, referenced by name
    pub materials: Vec<MaterialDescription>,
    /// Root objects
    pub objects: Vec<ObjectDescription>,
}

impl Config for SceneDescription {}

/// A named material; without collision properties it is a shader material
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDescription {
    /// Unique material name
    pub name: String,
    /// Collision properties
    pub collision: Option<CollisionProperties>,
}

/// Mesh given as vertices and faces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshDescription {
    /// Vertex positions
    pub vertices: Vec<[f32; 3]>,
    /// Faces as vertex index lists
    pub faces: Vec<Vec<usize>>,
    /// Material slot per face
    pub face_materials: Vec<usize>,
    /// Material slots by material name
    pub materials: Vec<String>,
    /// One RGBA color per face corner, in face order
    pub colors: Vec<[f32; 4]>,
}

/// One object and its subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectDescription {
    /// Object name
    pub name: String,
    /// Type tag
    pub kind: ObjectKind,
    /// Local translation
    pub location: [f32; 3],
    /// Local XYZ euler rotation in radians
    pub rotation: [f32; 3],
    /// Local scale
    pub scale: [f32; 3],
    /// Mesh data
    pub mesh: Option<MeshDescription>,
    /// Active material name
    pub material: Option<String>,
    /// Armature marker
    pub armature: bool,
    /// Bound properties
    pub properties: BoundProperties,
    /// Collision margin
    pub margin: f32,
    /// Box half-extents
    pub dimensions: [f32; 3],
    /// Radius
    pub radius: f32,
    /// First composite flag group
    pub composite_flags1: BoundFlags,
    /// Second composite flag group
    pub composite_flags2: BoundFlags,
    /// Child objects
    pub children: Vec<ObjectDescription>,
}

impl Default for ObjectDescription {
    fn default() -> Self {
        let defaults = SceneObject::new("", ObjectKind::None);
        Self {
            name: String::new(),
            kind: ObjectKind::None,
            location: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            mesh: None,
            material: None,
            armature: false,
            properties: BoundProperties::default(),
            margin: defaults.margin,
            dimensions: [0.0; 3],
            radius: 0.0,
            composite_flags1: BoundFlags::empty(),
            composite_flags2: BoundFlags::empty(),
            children: Vec::new(),
        }
    }
}

impl Scene {
    /// Build a scene from a description
    ///
    /// Material names must be unique and every referenced name must be
    /// declared.
    pub fn from_description(description: &SceneDescription) -> Result<Self> {
        let mut scene = Self::new();
        let mut materials = HashMap::new();

        for material in &description.materials {
            let built = match &material.collision {
                Some(properties) => Material::collision(&material.name, properties.clone()),
                None => Material::shader(&material.name),
            };
            materials.insert(material.name.clone(), scene.add_material(built));
        }

        for object in &description.objects {
            add_described(&mut scene, &materials, None, object)?;
        }

        Ok(scene)
    }
}

fn add_described(
    scene: &mut Scene,
    materials: &HashMap<String, MaterialId>,
    parent: Option<ObjectId>,
    description: &ObjectDescription,
) -> Result<ObjectId> {
    let transform = Transform::from_position_euler_scale(
        Vec3::from(description.location),
        Vec3::from(description.rotation),
        Vec3::from(description.scale),
    );

    let mut object = SceneObject::new(&description.name, description.kind)
        .with_transform(&transform)
        .with_bound_properties(description.properties.clone())
        .with_margin(description.margin)
        .with_dimensions(Vec3::from(description.dimensions))
        .with_radius(description.radius)
        .with_composite_flags(description.composite_flags1, description.composite_flags2);

    if description.armature {
        object = object.as_armature();
    }
    if let Some(name) = &description.material {
        object = object.with_material(lookup(materials, name)?);
    }
    if let Some(mesh) = &description.mesh {
        object = object.with_mesh(build_mesh(materials, mesh)?);
    }

    let id = match parent {
        Some(parent) => scene.add_child(parent, object).ok_or(ExportError::UnknownObject)?,
        None => scene.add_object(object),
    };

    for child in &description.children {
        add_described(scene, materials, Some(id), child)?;
    }

    Ok(id)
}

fn build_mesh(materials: &HashMap<String, MaterialId>, mesh: &MeshDescription) -> Result<MeshData> {
    let slots = mesh
        .materials
        .iter()
        .map(|name| lookup(materials, name).map(Some))
        .collect::<Result<Vec<_>>>()?;

    let vertices = mesh.vertices.iter().copied().map(Vec3::from).collect();
    let mut data = MeshData::from_faces(vertices, &mesh.faces)
        .with_face_materials(&mesh.face_materials)
        .with_materials(slots);
    if !mesh.colors.is_empty() {
        data = data.with_color_layer("Col", mesh.colors.clone());
    }
    Ok(data)
}

fn lookup(materials: &HashMap<String, MaterialId>, name: &str) -> Result<MaterialId> {
    materials
        .get(name)
        .copied()
        .ok_or_else(|| ExportError::UnknownMaterial { name: name.to_string() })
}
