//! End-to-end tests of the bound pipeline
//!
//! Scenes are assembled in code; each test drives the public builders from
//! a composite root down to the record tree.

mod pipeline;

use crate::foundation::math::Vec3;
use crate::scene::{
    CollisionMatFlags, CollisionProperties, Material, MaterialId, MeshData, ObjectId, ObjectKind,
    Scene, SceneObject,
};

/// Axis-aligned cube mesh between -half and +half
fn cube(half: f32) -> MeshData {
    MeshData::cuboid(Vec3::new(-half, -half, -half), Vec3::new(half, half, half))
}

/// Box mesh standing along local Z
fn upright(half_width: f32, half_height: f32) -> MeshData {
    MeshData::cuboid(
        Vec3::new(-half_width, -half_width, -half_height),
        Vec3::new(half_width, half_width, half_height),
    )
}

/// Triangle strip over `count` distinct vertices, `count - 2` triangles
fn strip(count: usize) -> MeshData {
    let vertices = (0..count)
        .map(|i| Vec3::new(i as f32, (i % 2) as f32, 0.0))
        .collect();
    let faces: Vec<Vec<usize>> = (0..count.saturating_sub(2)).map(|i| vec![i, i + 1, i + 2]).collect();
    MeshData::from_faces(vertices, &faces)
}

fn collision_material(scene: &mut Scene, name: &str, index: u32) -> MaterialId {
    scene.add_material(Material::collision(
        name,
        CollisionProperties {
            collision_index: index,
            flags: CollisionMatFlags::SEE_THROUGH,
            ..Default::default()
        },
    ))
}

/// Composite root with a single geometry child placed at `center`
fn geometry_scene(kind: ObjectKind, center: Vec3) -> (Scene, ObjectId, ObjectId) {
    let mut scene = Scene::new();
    let root = scene.add_object(SceneObject::new("root", ObjectKind::BoundComposite));
    let geometry = scene
        .add_child(root, SceneObject::new("geometry", kind).at(center))
        .unwrap();
    (scene, root, geometry)
}
