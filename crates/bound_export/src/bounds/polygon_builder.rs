//! Primitive polygons inside a geometry bound

use super::extents::{distance, total_bounds, world_bound_box};
use super::geometry_builder::GeometryBuilder;
use super::records::Polygon;
use super::BuildContext;
use crate::foundation::math::{Transform, Vec3};
use crate::scene::{ObjectId, ObjectKind};

/// Corners of the world bounding box that describe a box polygon
pub const BOX_POLYGON_CORNERS: [usize; 4] = [0, 5, 2, 7];

/// Radius of a sphere polygon from its scaled extents
pub fn sphere_radius(bounds: &[Vec3; 8]) -> f32 {
    distance(&bounds[1], &bounds[2]) / 2.0
}

/// Height and radius of a cylinder or capsule polygon from its scaled extents
///
/// Height runs along the local Z edge. A capsule's height excludes its caps.
pub fn cylinder_dimensions(bounds: &[Vec3; 8], capsule: bool) -> (f32, f32) {
    let radius = distance(&bounds[1], &bounds[2]) / 2.0;
    let mut height = distance(&bounds[0], &bounds[1]);
    if capsule {
        height -= radius * 2.0;
    }
    (height, radius)
}

/// Build the polygon for a primitive polygon object
///
/// Vertices are appended to the builder's pool without deduplication.
/// Returns `None` for every object that is not a box, sphere, cylinder or
/// capsule polygon.
pub fn build_polygon(
    ctx: &BuildContext<'_>,
    id: ObjectId,
    geometry: &mut GeometryBuilder,
) -> Option<Polygon> {
    let object = ctx.scene.object(id)?;
    if !object.kind.is_primitive_polygon() {
        return None;
    }

    let material_index = geometry.register_material(ctx.scene, object.active_material);
    let world = Transform::from_matrix(&ctx.scene.matrix_world(id));

    match object.kind {
        ObjectKind::PolyBox => {
            let corners = world_bound_box(ctx.scene, id);
            let [v1, v2, v3, v4] = BOX_POLYGON_CORNERS.map(|i| geometry.push_vertex(&corners[i]));
            Some(Polygon::Box {
                material_index,
                v1,
                v2,
                v3,
                v4,
            })
        }
        ObjectKind::PolySphere => {
            let v = geometry.push_vertex(&world.position);
            let radius = sphere_radius(&total_bounds(ctx.scene, id));
            Some(Polygon::Sphere {
                material_index,
                v,
                radius,
            })
        }
        ObjectKind::PolyCylinder | ObjectKind::PolyCapsule => {
            let capsule = object.kind == ObjectKind::PolyCapsule;
            let (height, radius) = cylinder_dimensions(&total_bounds(ctx.scene, id), capsule);

            let offset = world.rotation * Vec3::new(0.0, 0.0, height / 2.0);
            let v1 = geometry.push_vertex(&(world.position - offset));
            let v2 = geometry.push_vertex(&(world.position + offset));

            Some(if capsule {
                Polygon::Capsule {
                    material_index,
                    v1,
                    v2,
                    radius,
                }
            } else {
                Polygon::Cylinder {
                    material_index,
                    v1,
                    v2,
                    radius,
                }
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExportSettings;
    use crate::scene::{CollisionProperties, Material, MeshData, Scene, SceneObject};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    fn unit_cube() -> MeshData {
        MeshData::cuboid(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
    }

    fn build(scene: &Scene, id: ObjectId, center: Vec3) -> (Option<Polygon>, GeometryBuilder) {
        let settings = ExportSettings::default();
        let ctx = BuildContext::new(scene, &settings);
        let mut builder = GeometryBuilder::new(center);
        let polygon = build_polygon(&ctx, id, &mut builder);
        (polygon, builder)
    }

    #[test]
    fn test_box_uses_alternating_corners() {
        let mut scene = Scene::new();
        let id = scene.add_object(
            SceneObject::new("box", ObjectKind::PolyBox)
                .at(Vec3::new(10.0, 0.0, 0.0))
                .with_mesh(unit_cube()),
        );

        let (polygon, builder) = build(&scene, id, Vec3::new(10.0, 0.0, 0.0));
        let geometry = builder.finish();

        assert_eq!(
            polygon,
            Some(Polygon::Box {
                material_index: 0,
                v1: 0,
                v2: 1,
                v3: 2,
                v4: 3
            })
        );
        assert_relative_eq!(geometry.vertices[0], Vec3::new(-1.0, -1.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(geometry.vertices[1], Vec3::new(1.0, -1.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(geometry.vertices[2], Vec3::new(-1.0, 1.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(geometry.vertices[3], Vec3::new(1.0, 1.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_sphere_radius_and_center() {
        let mut scene = Scene::new();
        let id = scene.add_object(
            SceneObject::new("sphere", ObjectKind::PolySphere)
                .at(Vec3::new(0.0, 3.0, 0.0))
                .with_mesh(MeshData::cuboid(
                    Vec3::new(-2.0, -2.0, -2.0),
                    Vec3::new(2.0, 2.0, 2.0),
                )),
        );

        let (polygon, builder) = build(&scene, id, Vec3::new(0.0, 1.0, 0.0));
        let geometry = builder.finish();

        let Some(Polygon::Sphere { v, radius, .. }) = polygon else {
            panic!("expected a sphere polygon, got {polygon:?}");
        };
        assert_relative_eq!(geometry.vertices[v as usize], Vec3::new(0.0, 2.0, 0.0), epsilon = EPSILON);
        // Corners 1 and 2 are (-2,-2,2) and (-2,2,2)
        assert_relative_eq!(radius, 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_cylinder_and_capsule_dimensions() {
        let bounds = crate::bounds::extents::box_corners(
            &Vec3::new(-1.0, -1.0, -3.0),
            &Vec3::new(1.0, 1.0, 3.0),
        );

        let (height, radius) = cylinder_dimensions(&bounds, false);
        assert_relative_eq!(height, 6.0, epsilon = EPSILON);
        assert_relative_eq!(radius, 1.0, epsilon = EPSILON);

        let (height, radius) = cylinder_dimensions(&bounds, true);
        assert_relative_eq!(height, 4.0, epsilon = EPSILON);
        assert_relative_eq!(radius, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_capsule_endpoints_follow_rotation() {
        let mut scene = Scene::new();
        let transform = Transform::from_position_euler_scale(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
        );
        let id = scene.add_object(
            SceneObject::new("capsule", ObjectKind::PolyCapsule)
                .with_transform(&transform)
                .with_mesh(MeshData::cuboid(
                    Vec3::new(-1.0, -1.0, -3.0),
                    Vec3::new(1.0, 1.0, 3.0),
                )),
        );

        let (polygon, builder) = build(&scene, id, Vec3::zeros());
        let geometry = builder.finish();

        let Some(Polygon::Capsule { v1, v2, radius, .. }) = polygon else {
            panic!("expected a capsule polygon, got {polygon:?}");
        };
        assert_relative_eq!(radius, 1.0, epsilon = EPSILON);
        // Height 4 with caps removed, local Z turned onto world X
        let a = geometry.vertices[v1 as usize];
        let b = geometry.vertices[v2 as usize];
        assert_relative_eq!(distance(&a, &b), 4.0, epsilon = EPSILON);
        assert_relative_eq!((a + b) * 0.5, Vec3::new(0.0, 0.0, 5.0), epsilon = EPSILON);
        assert_relative_eq!((b - a).x.abs(), 4.0, epsilon = EPSILON);
    }

    #[test]
    fn test_material_resolved_through_registry() {
        let mut scene = Scene::new();
        let material = scene.add_material(Material::collision(
            "metal",
            CollisionProperties {
                collision_index: 8,
                ..Default::default()
            },
        ));
        let id = scene.add_object(
            SceneObject::new("sphere", ObjectKind::PolySphere)
                .with_mesh(unit_cube())
                .with_material(material),
        );

        let settings = ExportSettings::default();
        let ctx = BuildContext::new(&scene, &settings);
        let mut builder = GeometryBuilder::new(Vec3::zeros());
        builder.register_material(&scene, None);
        let first = build_polygon(&ctx, id, &mut builder);
        let second = build_polygon(&ctx, id, &mut builder);

        assert_eq!(first.map(|p| p.material_index()), Some(0));
        assert_eq!(second.map(|p| p.material_index()), Some(0));
        assert_eq!(builder.finish().materials[0].material_type, 8);
    }

    #[test]
    fn test_non_polygon_objects_are_skipped() {
        let mut scene = Scene::new();
        let triangle = scene.add_object(
            SceneObject::new("mesh", ObjectKind::PolyTriangle).with_mesh(unit_cube()),
        );
        let bound = scene.add_object(SceneObject::new("bound", ObjectKind::BoundBox));

        let (polygon, builder) = build(&scene, triangle, Vec3::zeros());
        assert!(polygon.is_none());
        assert_eq!(builder.vertex_count(), 0);

        let (polygon, _) = build(&scene, bound, Vec3::zeros());
        assert!(polygon.is_none());
    }
}
