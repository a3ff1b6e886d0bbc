//! Whole-hierarchy exports

use approx::assert_relative_eq;

use super::{collision_material, cube, geometry_scene, upright};
use crate::bounds::{bounds_from_object, export_ybn, BoundKind, Polygon};
use crate::core::{ExportSettings, OutputFormat};
use crate::error::ExportError;
use crate::foundation::math::{Mat4, Vec3};
use crate::scene::{ObjectKind, Scene, SceneObject};

#[test]
fn test_mixed_composite() {
    let (mut scene, root, geometry) =
        geometry_scene(ObjectKind::BoundGeometryBvh, Vec3::new(0.0, 0.0, 10.0));
    let concrete = collision_material(&mut scene, "concrete", 1);
    let glass = collision_material(&mut scene, "glass", 2);

    let colors = (0..24).map(|i| [i as f32 / 24.0, 0.0, 0.0, 1.0]).collect();
    scene
        .add_child(
            geometry,
            SceneObject::new("mesh", ObjectKind::PolyTriangle).with_mesh(
                cube(1.0)
                    .with_materials(vec![Some(concrete)])
                    .with_color_layer("Colour", colors),
            ),
        )
        .unwrap();
    scene
        .add_child(
            geometry,
            SceneObject::new("box", ObjectKind::PolyBox)
                .at(Vec3::new(3.0, 0.0, 0.0))
                .with_mesh(cube(0.5))
                .with_material(glass),
        )
        .unwrap();
    scene
        .add_child(
            geometry,
            SceneObject::new("sphere", ObjectKind::PolySphere)
                .with_mesh(cube(1.0))
                .with_material(concrete),
        )
        .unwrap();
    scene
        .add_child(
            geometry,
            SceneObject::new("capsule", ObjectKind::PolyCapsule).with_mesh(upright(0.5, 3.0)),
        )
        .unwrap();
    scene
        .add_child(
            root,
            SceneObject::new("crate", ObjectKind::BoundBox).with_dimensions(Vec3::new(1.0, 1.0, 1.0)),
        )
        .unwrap();

    let file = bounds_from_object(&scene, root, &ExportSettings::default()).unwrap();
    let children = &file.composite.children;

    assert_eq!(children.len(), 2);
    assert_eq!(children[0].kind.type_name(), "GeometryBVH");
    assert_eq!(children[1].kind, BoundKind::Box);

    let item = &children[0];
    assert_eq!(item.common.composite_position, Vec3::zeros());
    let geometry = item.kind.geometry().unwrap();
    assert_eq!(geometry.geometry_center, Vec3::new(0.0, 0.0, 10.0));

    // 12 triangles from the cube, then box, sphere, capsule
    let names: Vec<_> = geometry.polygons.iter().map(Polygon::type_name).collect();
    assert_eq!(names.len(), 15);
    assert!(names[..12].iter().all(|&n| n == "Triangle"));
    assert_eq!(&names[12..], &["Box", "Sphere", "Capsule"]);

    // 8 shared cube corners, then 4 + 1 + 2 appended primitive vertices
    assert_eq!(geometry.vertices.len(), 15);
    assert_eq!(geometry.vertex_colors.len(), 24);
    assert!(geometry.indices_in_range());

    // Cube vertices are relative to the geometry center
    assert!(geometry.vertices[..8]
        .iter()
        .all(|v| v.amax() <= 1.0 + f32::EPSILON));

    // concrete (mesh slot and sphere) once, glass once
    let types: Vec<_> = geometry.materials.iter().map(|m| m.material_type).collect();
    assert_eq!(types, vec![1, 2]);
    assert_eq!(geometry.polygons[12].material_index(), 1);
    assert_eq!(geometry.polygons[13].material_index(), 0);
    assert_eq!(geometry.materials[0].flags, vec!["FLAG_SEE_THROUGH"]);

    let Polygon::Sphere { v, radius, .. } = geometry.polygons[13] else {
        panic!("expected a sphere");
    };
    assert_relative_eq!(geometry.vertices[v as usize], Vec3::zeros(), epsilon = 1e-5);
    assert_relative_eq!(radius, 1.0, epsilon = 1e-5);
}

#[test]
fn test_cyclic_hierarchy() {
    let mut scene = Scene::new();
    let root = scene.add_object(SceneObject::new("root", ObjectKind::BoundComposite));
    let child = scene
        .add_child(root, SceneObject::new("child", ObjectKind::BoundSphere).with_radius(1.0))
        .unwrap();
    // root -> child -> root
    assert!(scene.set_parent(root, Some(child)));

    let file = bounds_from_object(&scene, root, &ExportSettings::default()).unwrap();
    assert_eq!(file.composite.children.len(), 1);

    let strict = ExportSettings::default().with_strict(true);
    let err = bounds_from_object(&scene, root, &strict).unwrap_err();
    assert!(matches!(err, ExportError::CyclicHierarchy { ref object } if object == "root"));
}

#[test]
fn test_export_writes_only_on_success() {
    let dir = std::env::temp_dir();
    let good = dir.join(format!("bound_export_ok_{}.ybn.xml", std::process::id()));
    let bad = dir.join(format!("bound_export_err_{}.ybn.xml", std::process::id()));

    let mut scene = Scene::new();
    let root = scene.add_object(SceneObject::new("root", ObjectKind::BoundComposite));
    scene
        .add_child(
            root,
            SceneObject::new("crate", ObjectKind::BoundBox).with_dimensions(Vec3::new(1.0, 2.0, 3.0)),
        )
        .unwrap();

    export_ybn(&scene, root, &good, &ExportSettings::default()).unwrap();
    let text = std::fs::read_to_string(&good).unwrap();
    assert!(text.contains("<Bounds type=\"Composite\">"));
    assert!(text.contains("<Item type=\"Box\">"));
    std::fs::remove_file(&good).unwrap();

    let (scene, root, _) = geometry_scene(ObjectKind::BoundGeometry, Vec3::zeros());
    let ron = ExportSettings::default().with_format(OutputFormat::Ron);
    assert!(export_ybn(&scene, root, &bad, &ron).is_err());
    assert!(!bad.exists());
}

#[test]
fn test_mirrored_rotated_children() {
    let mirrored = Mat4::new_rotation(Vec3::new(0.3, 0.7, -0.2))
        * Mat4::new_nonuniform_scaling(&Vec3::new(-1.0, 1.0, 1.0));
    let (mut scene, root, geometry) = geometry_scene(ObjectKind::BoundGeometry, Vec3::zeros());

    let mut body = SceneObject::new("body", ObjectKind::BoundBox).with_mesh(cube(1.0));
    body.matrix_local = mirrored;
    scene.add_child(root, body).unwrap();

    let mut capsule = SceneObject::new("capsule", ObjectKind::PolyCapsule).with_mesh(upright(0.5, 2.0));
    capsule.matrix_local = mirrored;
    scene.add_child(geometry, capsule).unwrap();

    let file = bounds_from_object(&scene, root, &ExportSettings::default()).unwrap();
    let children = &file.composite.children;
    assert_eq!(children.len(), 2);

    let body = &children[1].common;
    assert_relative_eq!(body.composite_rotation.norm(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(body.composite_scale.x, mirrored.m11, epsilon = 1e-5);

    let geometry = children[0].kind.geometry().unwrap();
    let Polygon::Capsule { v1, v2, radius, .. } = geometry.polygons[0] else {
        panic!("expected a capsule");
    };
    assert_relative_eq!(radius, 0.5, epsilon = 1e-4);
    // Height 4 minus both caps
    let length = (geometry.vertices[v2 as usize] - geometry.vertices[v1 as usize]).magnitude();
    assert_relative_eq!(length, 3.0, epsilon = 1e-4);
}

#[test]
fn test_unassigned_primitive_shares_index_zero_with_first_material() {
    let (mut scene, root, geometry) = geometry_scene(ObjectKind::BoundGeometry, Vec3::zeros());
    let concrete = collision_material(&mut scene, "concrete", 7);
    scene
        .add_child(
            geometry,
            SceneObject::new("mesh", ObjectKind::PolyTriangle)
                .with_mesh(cube(1.0).with_materials(vec![Some(concrete)])),
        )
        .unwrap();
    scene
        .add_child(
            geometry,
            SceneObject::new("box", ObjectKind::PolyBox).with_mesh(cube(0.5)),
        )
        .unwrap();

    let file = bounds_from_object(&scene, root, &ExportSettings::default()).unwrap();
    let geometry = file.composite.children[0].kind.geometry().unwrap();

    // No default entry is reserved once a collision material exists
    assert_eq!(geometry.materials.len(), 1);
    assert_eq!(geometry.materials[0].material_type, 7);
    let Some(Polygon::Box { material_index, .. }) = geometry.polygons.last() else {
        panic!("expected the box last");
    };
    assert_eq!(*material_index, 0);
}
