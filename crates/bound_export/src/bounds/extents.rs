//! Geometric extent helpers
//!
//! Axis-aligned extents, centers and radii of an object together with the
//! meshes of all its descendants. Pure functions over a borrowed scene.
//!
//! Eight-corner boxes use one ordering throughout the crate:
//!
//! | index | corner     |
//! |-------|------------|
//! | 0     | (-x,-y,-z) |
//! | 1     | (-x,-y,+z) |
//! | 2     | (-x,+y,+z) |
//! | 3     | (-x,+y,-z) |
//! | 4     | (+x,-y,-z) |
//! | 5     | (+x,-y,+z) |
//! | 6     | (+x,+y,+z) |
//! | 7     | (+x,+y,-z) |

use log::debug;

use crate::foundation::math::{transform_point, Mat4, Vec3};
use crate::scene::{ObjectId, Scene};

pub use crate::foundation::math::distance;

/// Coordinate frame extents are measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    /// The object's own local frame
    Local,
    /// World frame
    World,
}

/// Expand min/max into the eight corners, in the crate's corner ordering
pub fn box_corners(min: &Vec3, max: &Vec3) -> [Vec3; 8] {
    [
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(min.x, max.y, max.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(max.x, max.y, max.z),
        Vec3::new(max.x, max.y, min.z),
    ]
}

/// Min/max over the meshes of `id` and all its descendants
///
/// An object tree without any mesh vertices yields a zero box.
pub fn bound_extents(scene: &Scene, id: ObjectId, space: Space) -> (Vec3, Vec3) {
    let to_frame = match space {
        Space::World => Mat4::identity(),
        Space::Local => scene.matrix_world(id).try_inverse().unwrap_or_else(|| {
            debug!("'{}' has a singular world matrix, measuring extents in world space", scene.object_name(id));
            Mat4::identity()
        }),
    };

    let mut extents: Option<(Vec3, Vec3)> = None;
    for object_id in std::iter::once(id).chain(scene.children_recursive(id)) {
        let Some(mesh) = scene.object(object_id).and_then(|o| o.mesh.as_ref()) else {
            continue;
        };
        let matrix = to_frame * scene.matrix_world(object_id);
        for vertex in &mesh.vertices {
            let p = transform_point(&matrix, vertex);
            extents = Some(match extents {
                Some((min, max)) => (min.inf(&p), max.sup(&p)),
                None => (p, p),
            });
        }
    }

    extents.unwrap_or_else(|| {
        debug!("'{}' has no mesh data, using an empty bounding box", scene.object_name(id));
        (Vec3::zeros(), Vec3::zeros())
    })
}

/// Center of [`bound_extents`]
pub fn bound_center(scene: &Scene, id: ObjectId, space: Space) -> Vec3 {
    let (min, max) = bound_extents(scene, id, space);
    (min + max) * 0.5
}

/// Radius of the sphere through the corners of [`bound_extents`]
pub fn object_radius(scene: &Scene, id: ObjectId, space: Space) -> f32 {
    let (min, max) = bound_extents(scene, id, space);
    distance(&min, &max) * 0.5
}

/// World-space corners of the object's own local bounding box
///
/// Only the object's own mesh counts; children are ignored.
pub fn world_bound_box(scene: &Scene, id: ObjectId) -> [Vec3; 8] {
    let (min, max) = scene
        .object(id)
        .and_then(|o| o.mesh.as_ref())
        .and_then(|mesh| mesh.extents())
        .unwrap_or_else(|| (Vec3::zeros(), Vec3::zeros()));

    let matrix = scene.matrix_world(id);
    box_corners(&min, &max).map(|corner| transform_point(&matrix, &corner))
}

/// Corners of the local extents scaled by the object's world scale
///
/// The box stays axis-aligned in the object's frame, so edge lengths measure
/// the primitive's own dimensions whatever its world rotation. Scale per
/// axis is the length of the matching world matrix column.
pub fn total_bounds(scene: &Scene, id: ObjectId) -> [Vec3; 8] {
    let (min, max) = bound_extents(scene, id, Space::Local);
    let matrix = scene.matrix_world(id);
    let scale = Vec3::new(
        matrix.fixed_view::<3, 1>(0, 0).magnitude(),
        matrix.fixed_view::<3, 1>(0, 1).magnitude(),
        matrix.fixed_view::<3, 1>(0, 2).magnitude(),
    );

    box_corners(&min.component_mul(&scale), &max.component_mul(&scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;
    use crate::scene::{MeshData, ObjectKind, SceneObject};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn cube(min: Vec3, max: Vec3) -> MeshData {
        MeshData::cuboid(min, max)
    }

    #[test]
    fn test_corner_ordering() {
        let corners = box_corners(&Vec3::new(-1.0, -2.0, -3.0), &Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(corners[0], Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(corners[5], Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(corners[2], Vec3::new(-1.0, 2.0, 3.0));
        assert_eq!(corners[7], Vec3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn test_extents_include_descendants_in_local_space() {
        let mut scene = Scene::new();
        let parent = scene.add_object(
            SceneObject::new("parent", ObjectKind::BoundComposite)
                .at(Vec3::new(10.0, 0.0, 0.0))
                .with_mesh(cube(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))),
        );
        scene
            .add_child(
                parent,
                SceneObject::new("child", ObjectKind::BoundBox)
                    .at(Vec3::new(0.0, 0.0, 5.0))
                    .with_mesh(cube(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))),
            )
            .unwrap();

        let (min, max) = bound_extents(&scene, parent, Space::Local);
        assert_relative_eq!(min, Vec3::new(-1.0, -1.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(max, Vec3::new(1.0, 1.0, 6.0), epsilon = EPSILON);

        let (min, max) = bound_extents(&scene, parent, Space::World);
        assert_relative_eq!(min, Vec3::new(9.0, -1.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(max, Vec3::new(11.0, 1.0, 6.0), epsilon = EPSILON);

        assert_relative_eq!(
            bound_center(&scene, parent, Space::Local),
            Vec3::new(0.0, 0.0, 2.5),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_no_mesh_gives_zero_box() {
        let mut scene = Scene::new();
        let empty = scene.add_object(SceneObject::new("empty", ObjectKind::BoundComposite));

        assert_eq!(bound_extents(&scene, empty, Space::Local), (Vec3::zeros(), Vec3::zeros()));
        assert_eq!(object_radius(&scene, empty, Space::Local), 0.0);
    }

    #[test]
    fn test_radius_is_half_diagonal() {
        let mut scene = Scene::new();
        let id = scene.add_object(
            SceneObject::new("box", ObjectKind::BoundBox)
                .with_mesh(cube(Vec3::new(0.0, 0.0, 0.0), Vec3::new(3.0, 4.0, 0.0))),
        );

        assert_relative_eq!(object_radius(&scene, id, Space::Local), 2.5, epsilon = EPSILON);
    }

    #[test]
    fn test_total_bounds_ignore_rotation_and_apply_scale() {
        let mut scene = Scene::new();
        let transform = Transform::from_position_euler_scale(
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        let id = scene.add_object(
            SceneObject::new("cylinder", ObjectKind::PolyCylinder)
                .with_transform(&transform)
                .with_mesh(cube(Vec3::new(-1.0, -1.0, -3.0), Vec3::new(1.0, 1.0, 3.0))),
        );

        let corners = total_bounds(&scene, id);

        // Edge 0-1 runs along local Z, edge 1-2 along local Y
        assert_relative_eq!(distance(&corners[0], &corners[1]), 12.0, epsilon = 1e-4);
        assert_relative_eq!(distance(&corners[1], &corners[2]), 4.0, epsilon = 1e-4);
    }

    #[test]
    fn test_world_bound_box_applies_transform() {
        let mut scene = Scene::new();
        let id = scene.add_object(
            SceneObject::new("box", ObjectKind::PolyBox)
                .at(Vec3::new(0.0, 0.0, 10.0))
                .with_mesh(cube(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))),
        );

        let corners = world_bound_box(&scene, id);
        assert_relative_eq!(corners[0], Vec3::new(-1.0, -1.0, 9.0), epsilon = EPSILON);
        assert_relative_eq!(corners[6], Vec3::new(1.0, 1.0, 11.0), epsilon = EPSILON);
    }
}
