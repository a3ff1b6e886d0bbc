//! Geometry bounds
//!
//! A [`GeometryBuilder`] owns everything one geometry bound accumulates
//! while its subtree is walked: the vertex pool, vertex colors, the
//! material registry and the polygon list. Builders are never shared
//! between geometry nodes, so vertex dedup and material indices are always
//! local to one geometry.

use std::collections::HashMap;

use log::{debug, warn};

use super::bound_builder::init_bound_item;
use super::material_registry::MaterialRegistry;
use super::polygon_builder::build_polygon;
use super::records::{BoundGeometry, BoundItem, BoundKind, Polygon, MAX_GEOMETRY_VERTICES};
use super::BuildContext;
use crate::error::{ExportError, Result};
use crate::foundation::math::{transform_point, Mat4, Vec3};
use crate::scene::{MaterialId, MeshData, ObjectId, ObjectKind, Scene};

/// Color given to loops a short color layer does not cover
pub const MISSING_LOOP_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Which geometry record to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    /// Plain polygon soup
    Geometry,
    /// Polygon soup with a BVH
    GeometryBvh,
}

/// Exact-match key of a position
///
/// Raw bit patterns, with -0.0 folded into +0.0 so the two zeros compare
/// equal as they do numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VertexKey([u32; 3]);

impl VertexKey {
    fn new(position: &Vec3) -> Self {
        fn bits(value: f32) -> u32 {
            if value == 0.0 {
                0
            } else {
                value.to_bits()
            }
        }
        Self([bits(position.x), bits(position.y), bits(position.z)])
    }
}

/// Ordered vertex pool with optional exact-match deduplication
#[derive(Debug, Default)]
pub struct VertexPool {
    vertices: Vec<Vec3>,
    lookup: HashMap<VertexKey, u32>,
}

impl VertexPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of an identical vertex inserted earlier, or append
    pub fn insert(&mut self, position: Vec3) -> u32 {
        let next = self.next_index();
        let index = *self.lookup.entry(VertexKey::new(&position)).or_insert(next);
        if index == next {
            self.vertices.push(position);
        }
        index
    }

    /// Append without deduplication
    ///
    /// Pushed vertices are not candidates for later [`insert`](Self::insert) calls.
    pub fn push(&mut self, position: Vec3) -> u32 {
        let index = self.next_index();
        self.vertices.push(position);
        index
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the pool is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in index order
    pub fn as_slice(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Consume into the vertex list
    pub fn into_vec(self) -> Vec<Vec3> {
        self.vertices
    }

    // Pools past MAX_GEOMETRY_VERTICES are rejected long before u32 overflows
    #[allow(clippy::cast_possible_truncation)]
    fn next_index(&self) -> u32 {
        self.vertices.len() as u32
    }
}

/// Accumulates the contents of one geometry bound
#[derive(Debug)]
pub struct GeometryBuilder {
    geometry_center: Vec3,
    vertices: VertexPool,
    vertex_colors: Vec<[f32; 4]>,
    materials: MaterialRegistry,
    polygons: Vec<Polygon>,
}

impl GeometryBuilder {
    /// Create a builder whose vertices are stored relative to `geometry_center`
    pub fn new(geometry_center: Vec3) -> Self {
        Self {
            geometry_center,
            vertices: VertexPool::new(),
            vertex_colors: Vec::new(),
            materials: MaterialRegistry::new(),
            polygons: Vec::new(),
        }
    }

    /// Offset subtracted from every world-space vertex
    pub fn geometry_center(&self) -> Vec3 {
        self.geometry_center
    }

    /// Append a world-space vertex without deduplication
    pub fn push_vertex(&mut self, world: &Vec3) -> u32 {
        self.vertices.push(world - self.geometry_center)
    }

    /// Insert a world-space vertex, reusing an identical earlier one
    pub fn insert_vertex(&mut self, world: &Vec3) -> u32 {
        self.vertices.insert(world - self.geometry_center)
    }

    /// Register a material in this geometry's material list
    pub fn register_material(&mut self, scene: &Scene, material: Option<MaterialId>) -> u32 {
        self.materials.register(scene, material)
    }

    /// Append a polygon
    pub fn add_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    /// Add every face of a mesh as triangles
    ///
    /// `matrix_world` places the mesh in the world. Material slots are
    /// registered in slot order before any triangle is built. Colors of the
    /// first color layer are appended per loop, face by face; loops past the
    /// end of a short layer get [`MISSING_LOOP_COLOR`]. Returns the number of
    /// triangles added.
    pub fn add_mesh(&mut self, scene: &Scene, matrix_world: &Mat4, mesh: &MeshData) -> usize {
        for slot in 0..mesh.materials.len() {
            self.materials.register(scene, mesh.material_for_slot(slot));
        }

        if let Some(layer) = mesh.first_color_layer() {
            let mut missing = 0usize;
            for polygon in &mesh.polygons {
                let loops = polygon.loop_start..polygon.loop_start + polygon.loop_total;
                self.vertex_colors.extend(loops.map(|l| {
                    layer.data.get(l).copied().unwrap_or_else(|| {
                        missing += 1;
                        MISSING_LOOP_COLOR
                    })
                }));
            }
            if missing > 0 {
                warn!(
                    "Color layer '{}' covers {} of {} loops, padding {missing} colors",
                    layer.name,
                    layer.data.len(),
                    layer.data.len() + missing
                );
            }
        }

        let mut added = 0;
        for triangle in mesh.loop_triangles() {
            let Some(corners) = triangle
                .loops
                .iter()
                .map(|&l| mesh.loop_position(l))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };

            let material_index = self
                .materials
                .register(scene, mesh.material_for_slot(triangle.material_index));
            let [v1, v2, v3] = [corners[0], corners[1], corners[2]]
                .map(|local| self.insert_vertex(&transform_point(matrix_world, local)));

            self.polygons.push(Polygon::Triangle {
                material_index,
                v1,
                v2,
                v3,
            });
            added += 1;
        }
        added
    }

    /// Number of vertices in the pool
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of polygons added so far
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Consume the builder into a geometry record
    pub fn finish(self) -> BoundGeometry {
        let has_polygons = !self.polygons.is_empty();
        BoundGeometry {
            geometry_center: self.geometry_center,
            vertices: self.vertices.into_vec(),
            vertex_colors: self.vertex_colors,
            materials: self.materials.finish(has_polygons),
            polygons: self.polygons,
        }
    }
}

/// Build a geometry bound from an object and its subtree
///
/// Triangle meshes below the object are added first, then primitive
/// polygons, both in pre-order. Fails when nothing was produced or when the
/// deduplicated vertex pool exceeds [`MAX_GEOMETRY_VERTICES`].
pub fn build_geometry(ctx: &BuildContext<'_>, id: ObjectId, kind: GeometryKind) -> Result<BoundItem> {
    let object = ctx.object(id)?;

    let mut common = init_bound_item(ctx, id)?;
    common.composite_position = Vec3::zeros();

    let mut builder = GeometryBuilder::new(object.location());
    let descendants = ctx.descendants(id)?;

    for &child_id in &descendants {
        let child = ctx.object(child_id)?;
        if child.kind != ObjectKind::PolyTriangle {
            continue;
        }
        match &child.mesh {
            Some(mesh) => {
                let added = builder.add_mesh(ctx.scene, &ctx.scene.matrix_world(child_id), mesh);
                debug!("'{}': {} triangles from '{}'", object.name, added, child.name);
            }
            None if ctx.settings.strict => {
                return Err(ExportError::MissingMesh {
                    object: child.name.clone(),
                });
            }
            None => warn!("'{}' is a triangle source without mesh data, skipping", child.name),
        }
    }

    for &child_id in &descendants {
        if let Some(polygon) = build_polygon(ctx, child_id, &mut builder) {
            builder.add_polygon(polygon);
        }
    }

    if builder.polygon_count() == 0 {
        return Err(ExportError::NoGeometry {
            object: object.name.clone(),
        });
    }

    debug!(
        "'{}': {} vertices, {} polygons",
        object.name,
        builder.vertex_count(),
        builder.polygon_count()
    );
    if builder.vertex_count() > MAX_GEOMETRY_VERTICES {
        return Err(ExportError::VerticesLimit {
            object: object.name.clone(),
            limit: MAX_GEOMETRY_VERTICES,
        });
    }

    let geometry = builder.finish();
    let kind = match kind {
        GeometryKind::Geometry => BoundKind::Geometry(geometry),
        GeometryKind::GeometryBvh => BoundKind::GeometryBvh(geometry),
    };
    Ok(BoundItem { common, kind })
}
