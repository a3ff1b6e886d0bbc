//! Loop-indexed mesh data
//!
//! Faces reference vertices through loops: every face owns a contiguous run
//! of loops, each loop names one vertex. Per-corner data (vertex colors)
//! is stored per loop, so a vertex shared by several faces has several
//! loops and possibly several colors.

use super::MaterialId;
use crate::foundation::math::Vec3;

/// One n-gon of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshPolygon {
    /// First loop of this face
    pub loop_start: usize,
    /// Number of loops (corners)
    pub loop_total: usize,
    /// Material slot of this face
    pub material_index: usize,
}

/// A triangle produced by tessellating a face, referencing loops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTriangle {
    /// Loop indices of the three corners
    pub loops: [usize; 3],
    /// Material slot inherited from the source face
    pub material_index: usize,
}

/// A named per-loop RGBA color layer
#[derive(Debug, Clone, PartialEq)]
pub struct ColorLayer {
    /// Layer name
    pub name: String,
    /// One color per loop, components in 0..=1
    pub data: Vec<[f32; 4]>,
}

/// Mesh data attached to a scene object, in the object's local space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Vertex index of each loop
    pub loops: Vec<usize>,
    /// Faces
    pub polygons: Vec<MeshPolygon>,
    /// Per-loop color layers
    pub color_layers: Vec<ColorLayer>,
    /// Material slots, `None` for an empty slot
    pub materials: Vec<Option<MaterialId>>,
}

impl MeshData {
    /// Build a mesh from vertex positions and faces given as vertex index lists
    pub fn from_faces(vertices: Vec<Vec3>, faces: &[Vec<usize>]) -> Self {
        let mut loops = Vec::with_capacity(faces.iter().map(Vec::len).sum());
        let mut polygons = Vec::with_capacity(faces.len());

        for face in faces {
            polygons.push(MeshPolygon {
                loop_start: loops.len(),
                loop_total: face.len(),
                material_index: 0,
            });
            loops.extend_from_slice(face);
        }

        Self {
            vertices,
            loops,
            polygons,
            color_layers: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// Axis-aligned box mesh spanning `min..max`: 8 vertices, 6 quads
    ///
    /// Vertices follow the standard corner ordering used by
    /// [`crate::bounds::extents::box_corners`].
    pub fn cuboid(min: Vec3, max: Vec3) -> Self {
        let vertices = crate::bounds::extents::box_corners(&min, &max).to_vec();
        let faces = [
            vec![0, 1, 2, 3],
            vec![4, 7, 6, 5],
            vec![0, 4, 5, 1],
            vec![1, 5, 6, 2],
            vec![2, 6, 7, 3],
            vec![3, 7, 4, 0],
        ];
        Self::from_faces(vertices, &faces)
    }

    /// Set material slots
    pub fn with_materials(mut self, materials: Vec<Option<MaterialId>>) -> Self {
        self.materials = materials;
        self
    }

    /// Assign a material slot to every face, in face order
    ///
    /// Faces beyond the end of `slots` keep their current slot.
    pub fn with_face_materials(mut self, slots: &[usize]) -> Self {
        for (polygon, slot) in self.polygons.iter_mut().zip(slots) {
            polygon.material_index = *slot;
        }
        self
    }

    /// Append a color layer
    pub fn with_color_layer(mut self, name: impl Into<String>, data: Vec<[f32; 4]>) -> Self {
        self.color_layers.push(ColorLayer {
            name: name.into(),
            data,
        });
        self
    }

    /// First color layer, the one exported as vertex colors
    pub fn first_color_layer(&self) -> Option<&ColorLayer> {
        self.color_layers.first()
    }

    /// Position of the vertex referenced by a loop
    pub fn loop_position(&self, loop_index: usize) -> Option<&Vec3> {
        self.loops.get(loop_index).and_then(|&vertex| self.vertices.get(vertex))
    }

    /// Material assigned to a slot
    pub fn material_for_slot(&self, slot: usize) -> Option<MaterialId> {
        self.materials.get(slot).copied().flatten()
    }

    /// Fan-tessellate every face into loop triangles
    ///
    /// Faces with fewer than three corners, or whose loops point outside the
    /// loop or vertex arrays, are skipped.
    pub fn loop_triangles(&self) -> Vec<LoopTriangle> {
        let mut triangles = Vec::new();

        for polygon in &self.polygons {
            let end = polygon.loop_start + polygon.loop_total;
            if polygon.loop_total < 3 || end > self.loops.len() {
                continue;
            }
            if (polygon.loop_start..end).any(|l| self.loop_position(l).is_none()) {
                continue;
            }

            for corner in 1..polygon.loop_total - 1 {
                triangles.push(LoopTriangle {
                    loops: [
                        polygon.loop_start,
                        polygon.loop_start + corner,
                        polygon.loop_start + corner + 1,
                    ],
                    material_index: polygon.material_index,
                });
            }
        }

        triangles
    }

    /// Local-space min/max over all vertices, `None` for an empty mesh
    pub fn extents(&self) -> Option<(Vec3, Vec3)> {
        let first = self.vertices.first()?;
        Some(self.vertices.iter().fold((*first, *first), |(min, max), v| {
            (min.inf(v), max.sup(v))
        }))
    }
}
