//! Scene objects
//!
//! A scene object is a typed node: its [`ObjectKind`] decides which builder
//! (if any) turns it into a record.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::mesh::MeshData;
use super::{MaterialId, ObjectId};
use crate::foundation::math::{Mat4, Transform, Vec3};

/// Type tag of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Plain object with no export meaning
    #[default]
    None,
    /// Root of a bound hierarchy
    BoundComposite,
    /// Box bound
    BoundBox,
    /// Sphere bound
    BoundSphere,
    /// Cylinder bound
    BoundCylinder,
    /// Capsule bound
    BoundCapsule,
    /// Disc bound
    BoundDisc,
    /// Cloth bound
    BoundCloth,
    /// Polygon soup bound
    BoundGeometry,
    /// Polygon soup bound with a BVH
    BoundGeometryBvh,
    /// Box polygon inside a geometry bound
    PolyBox,
    /// Sphere polygon inside a geometry bound
    PolySphere,
    /// Cylinder polygon inside a geometry bound
    PolyCylinder,
    /// Capsule polygon inside a geometry bound
    PolyCapsule,
    /// Triangle mesh whose faces become triangle polygons
    PolyTriangle,
    /// Drawable (handled by the drawable exporter)
    Drawable,
    /// Drawable dictionary root
    DrawableDictionary,
}

impl ObjectKind {
    /// Primitive polygon kinds built by the polygon builder
    pub fn is_primitive_polygon(self) -> bool {
        matches!(
            self,
            Self::PolyBox | Self::PolySphere | Self::PolyCylinder | Self::PolyCapsule
        )
    }
}

bitflags! {
    /// Composite type/include flag group of a bound
    ///
    /// Declaration order is the order flags are emitted in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct BoundFlags: u32 {
        /// Unknown
        const UNKNOWN = 1 << 0;
        /// Map weapon
        const MAP_WEAPON = 1 << 1;
        /// Map dynamic
        const MAP_DYNAMIC = 1 << 2;
        /// Map animal
        const MAP_ANIMAL = 1 << 3;
        /// Map cover
        const MAP_COVER = 1 << 4;
        /// Map vehicle
        const MAP_VEHICLE = 1 << 5;
        /// Vehicle without BVH
        const VEHICLE_NOT_BVH = 1 << 6;
        /// Vehicle BVH
        const VEHICLE_BVH = 1 << 7;
        /// Vehicle box
        const VEHICLE_BOX = 1 << 8;
        /// Ped
        const PED = 1 << 9;
        /// Ragdoll
        const RAGDOLL = 1 << 10;
        /// Animal
        const ANIMAL = 1 << 11;
        /// Animal ragdoll
        const ANIMAL_RAGDOLL = 1 << 12;
        /// Object
        const OBJECT = 1 << 13;
        /// Object environment cloth
        const OBJECT_ENV_CLOTH = 1 << 14;
        /// Plant
        const PLANT = 1 << 15;
        /// Projectile
        const PROJECTILE = 1 << 16;
        /// Explosion
        const EXPLOSION = 1 << 17;
        /// Pickup
        const PICKUP = 1 << 18;
        /// Foliage
        const FOLIAGE = 1 << 19;
        /// Forklift forks
        const FORKLIFT_FORKS = 1 << 20;
        /// Weapon test
        const TEST_WEAPON = 1 << 21;
        /// Camera test
        const TEST_CAMERA = 1 << 22;
        /// AI test
        const TEST_AI = 1 << 23;
        /// Script test
        const TEST_SCRIPT = 1 << 24;
        /// Vehicle wheel test
        const TEST_VEHICLE_WHEEL = 1 << 25;
        /// Glass
        const GLASS = 1 << 26;
    }
}

impl BoundFlags {
    /// Names of the set flags, in declaration order
    pub fn to_flag_names(self) -> Vec<String> {
        self.iter_names().map(|(name, _)| name.to_string()).collect()
    }
}

/// Authored physical properties of a bound object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundProperties {
    /// Procedural object id
    pub procedural_id: u8,
    /// Interior room id
    pub room_id: u8,
    /// Ambient ped density
    pub ped_density: u8,
    /// Polygon flags
    pub poly_flags: u8,
    /// Inertia tensor diagonal
    pub inertia: Vec3,
    /// Volume
    pub volume: f32,
}

/// A typed node of the scene hierarchy
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Object name
    pub name: String,
    /// Type tag
    pub kind: ObjectKind,
    /// Transform relative to the parent
    pub matrix_local: Mat4,
    /// Mesh data in local space
    pub mesh: Option<MeshData>,
    /// Whether this object is an armature (skeleton)
    pub is_armature: bool,
    /// Active material
    pub active_material: Option<MaterialId>,
    /// Authored bound properties
    pub bound_properties: BoundProperties,
    /// Collision margin
    pub margin: f32,
    /// Authored half-extents of a box bound
    pub bound_dimensions: Vec3,
    /// Authored radius of sphere, cylinder, capsule and disc bounds
    pub bound_radius: f32,
    /// First composite flag group
    pub composite_flags1: BoundFlags,
    /// Second composite flag group
    pub composite_flags2: BoundFlags,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: Vec<ObjectId>,
}

impl SceneObject {
    /// Create an object with an identity transform and default properties
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            matrix_local: Mat4::identity(),
            mesh: None,
            is_armature: false,
            active_material: None,
            bound_properties: BoundProperties::default(),
            margin: 0.04,
            bound_dimensions: Vec3::zeros(),
            bound_radius: 0.0,
            composite_flags1: BoundFlags::empty(),
            composite_flags2: BoundFlags::empty(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Set the local transform
    pub fn with_transform(mut self, transform: &Transform) -> Self {
        self.matrix_local = transform.to_matrix();
        self
    }

    /// Set the local transform to a pure translation
    pub fn at(mut self, location: Vec3) -> Self {
        self.matrix_local = Mat4::new_translation(&location);
        self
    }

    /// Attach mesh data
    pub fn with_mesh(mut self, mesh: MeshData) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Set the active material
    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.active_material = Some(material);
        self
    }

    /// Set bound properties
    pub fn with_bound_properties(mut self, properties: BoundProperties) -> Self {
        self.bound_properties = properties;
        self
    }

    /// Set the authored box half-extents
    pub fn with_dimensions(mut self, dimensions: Vec3) -> Self {
        self.bound_dimensions = dimensions;
        self
    }

    /// Set the authored radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.bound_radius = radius;
        self
    }

    /// Set the collision margin
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set both composite flag groups
    pub fn with_composite_flags(mut self, flags1: BoundFlags, flags2: BoundFlags) -> Self {
        self.composite_flags1 = flags1;
        self.composite_flags2 = flags2;
        self
    }

    /// Mark as armature
    pub fn as_armature(mut self) -> Self {
        self.is_armature = true;
        self
    }

    /// Translation part of the local transform
    pub fn location(&self) -> Vec3 {
        Vec3::new(self.matrix_local.m14, self.matrix_local.m24, self.matrix_local.m34)
    }

    /// Parent object
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Direct children, in insertion order
    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }
}
