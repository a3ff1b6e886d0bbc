//! Bound file record tree
//!
//! Plain data handed to the writers. Records are built bottom-up by the
//! builders and never modified after a build returns.

use serde::Serialize;

use crate::foundation::math::{Quat, Vec3};

/// Hard ceiling on the vertex pool of one geometry bound
///
/// Polygons store vertex indices in 15 bits.
pub const MAX_GEOMETRY_VERTICES: usize = 32767;

/// Collision material entry of a geometry bound
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterialItem {
    /// Collision material type index
    #[serde(rename = "type")]
    pub material_type: u32,
    /// Procedural object id
    pub procedural_id: u8,
    /// Interior room id
    pub room_id: u8,
    /// Ambient ped density
    pub ped_density: u8,
    /// Material colour palette index
    pub material_color_index: u8,
    /// `FLAG_*` names of the set collision flags
    pub flags: Vec<String>,
}

/// A polygon of a geometry bound
///
/// Vertex indices point into [`BoundGeometry::vertices`], material indices
/// into [`BoundGeometry::materials`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Polygon {
    /// Mesh triangle
    Triangle {
        /// Material index
        material_index: u32,
        /// First corner
        v1: u32,
        /// Second corner
        v2: u32,
        /// Third corner
        v3: u32,
    },
    /// Box given by four alternating corners
    Box {
        /// Material index
        material_index: u32,
        /// Corner 0 of the box
        v1: u32,
        /// Corner 5 of the box
        v2: u32,
        /// Corner 2 of the box
        v3: u32,
        /// Corner 7 of the box
        v4: u32,
    },
    /// Sphere around one vertex
    Sphere {
        /// Material index
        material_index: u32,
        /// Center vertex
        v: u32,
        /// Radius
        radius: f32,
    },
    /// Cylinder between two end vertices
    Cylinder {
        /// Material index
        material_index: u32,
        /// Bottom center
        v1: u32,
        /// Top center
        v2: u32,
        /// Radius
        radius: f32,
    },
    /// Capsule between two cap centers
    Capsule {
        /// Material index
        material_index: u32,
        /// Bottom cap center
        v1: u32,
        /// Top cap center
        v2: u32,
        /// Radius
        radius: f32,
    },
}

impl Polygon {
    /// Material index of this polygon
    pub fn material_index(&self) -> u32 {
        match self {
            Self::Triangle { material_index, .. }
            | Self::Box { material_index, .. }
            | Self::Sphere { material_index, .. }
            | Self::Cylinder { material_index, .. }
            | Self::Capsule { material_index, .. } => *material_index,
        }
    }

    /// Vertex indices referenced by this polygon
    pub fn vertex_indices(&self) -> Vec<u32> {
        match *self {
            Self::Triangle { v1, v2, v3, .. } => vec![v1, v2, v3],
            Self::Box { v1, v2, v3, v4, .. } => vec![v1, v2, v3, v4],
            Self::Sphere { v, .. } => vec![v],
            Self::Cylinder { v1, v2, .. } | Self::Capsule { v1, v2, .. } => vec![v1, v2],
        }
    }

    /// Element name used by the XML writer
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Triangle { .. } => "Triangle",
            Self::Box { .. } => "Box",
            Self::Sphere { .. } => "Sphere",
            Self::Cylinder { .. } => "Cylinder",
            Self::Capsule { .. } => "Capsule",
        }
    }
}

/// Polygon soup payload of a geometry bound
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoundGeometry {
    /// Offset subtracted from every vertex
    pub geometry_center: Vec3,
    /// Deduplicated, center-relative vertex pool
    pub vertices: Vec<Vec3>,
    /// RGBA colors in mesh loop order
    ///
    /// One entry per face corner of the source meshes, so this is usually
    /// longer than `vertices` and is not indexed by vertex index.
    pub vertex_colors: Vec<[f32; 4]>,
    /// Collision materials referenced by the polygons
    pub materials: Vec<MaterialItem>,
    /// Polygons
    pub polygons: Vec<Polygon>,
}

impl BoundGeometry {
    /// Whether every polygon references existing vertices and materials
    pub fn indices_in_range(&self) -> bool {
        self.polygons.iter().all(|polygon| {
            (polygon.material_index() as usize) < self.materials.len()
                && polygon
                    .vertex_indices()
                    .iter()
                    .all(|&v| (v as usize) < self.vertices.len())
        })
    }
}

/// Fields shared by every bound record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundCommon {
    /// Local bounding box minimum
    pub box_min: Vec3,
    /// Local bounding box maximum
    pub box_max: Vec3,
    /// Local bounding box center
    pub box_center: Vec3,
    /// Bounding sphere center
    pub sphere_center: Vec3,
    /// Bounding sphere radius
    pub sphere_radius: f32,
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
    /// Collision margin
    pub margin: f32,
    /// Position inside the parent composite
    pub composite_position: Vec3,
    /// Rotation inside the parent composite
    pub composite_rotation: Quat,
    /// Scale inside the parent composite
    pub composite_scale: Vec3,
    /// First composite flag group
    pub composite_flags1: Vec<String>,
    /// Second composite flag group
    pub composite_flags2: Vec<String>,
    /// Collision material type index of the whole bound
    pub material_index: u32,
}

impl Default for BoundCommon {
    fn default() -> Self {
        Self {
            box_min: Vec3::zeros(),
            box_max: Vec3::zeros(),
            box_center: Vec3::zeros(),
            sphere_center: Vec3::zeros(),
            sphere_radius: 0.0,
            procedural_id: 0,
            room_id: 0,
            ped_density: 0,
            poly_flags: 0,
            inertia: Vec3::zeros(),
            volume: 0.0,
            margin: 0.0,
            composite_position: Vec3::zeros(),
            composite_rotation: Quat::identity(),
            composite_scale: Vec3::new(1.0, 1.0, 1.0),
            composite_flags1: Vec::new(),
            composite_flags2: Vec::new(),
            material_index: 0,
        }
    }
}

/// Variant payload of a bound
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BoundKind {
    /// Box
    Box,
    /// Sphere
    Sphere,
    /// Cylinder
    Cylinder,
    /// Capsule
    Capsule,
    /// Disc
    Disc,
    /// Cloth
    Cloth,
    /// Polygon soup
    Geometry(BoundGeometry),
    /// Polygon soup with a BVH
    GeometryBvh(BoundGeometry),
}

impl BoundKind {
    /// Type name used by the XML writer
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Box => "Box",
            Self::Sphere => "Sphere",
            Self::Cylinder => "Cylinder",
            Self::Capsule => "Capsule",
            Self::Disc => "Disc",
            Self::Cloth => "Cloth",
            Self::Geometry(_) => "Geometry",
            Self::GeometryBvh(_) => "GeometryBVH",
        }
    }

    /// Geometry payload of the geometry variants
    pub fn geometry(&self) -> Option<&BoundGeometry> {
        match self {
            Self::Geometry(geometry) | Self::GeometryBvh(geometry) => Some(geometry),
            _ => None,
        }
    }
}

/// One child bound of a composite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundItem {
    /// Shared fields
    pub common: BoundCommon,
    /// Variant payload
    pub kind: BoundKind,
}

/// Composite bound: the container of all child bounds
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoundsComposite {
    /// Shared fields
    pub common: BoundCommon,
    /// Child bounds in traversal order
    pub children: Vec<BoundItem>,
}

/// Root of a bound file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoundFile {
    /// Root composite
    pub composite: BoundsComposite,
}
