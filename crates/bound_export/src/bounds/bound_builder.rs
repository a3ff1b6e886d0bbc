//! Bound records from scene objects
//!
//! [`build_bound`] dispatches on [`ObjectKind`]; [`build_composite`] walks a
//! composite's subtree and collects every bound it finds.

use log::debug;

use super::extents::{bound_center, bound_extents, object_radius, Space};
use super::geometry_builder::{build_geometry, GeometryKind};
use super::records::{BoundCommon, BoundItem, BoundKind, BoundsComposite};
use super::BuildContext;
use crate::error::Result;
use crate::foundation::math::Transform;
use crate::scene::{ObjectId, ObjectKind};

/// Common fields derived from the object's extents and authored properties
pub fn init_bound(ctx: &BuildContext<'_>, id: ObjectId) -> Result<BoundCommon> {
    let object = ctx.object(id)?;
    let (box_min, box_max) = bound_extents(ctx.scene, id, Space::Local);
    let center = bound_center(ctx.scene, id, Space::Local);
    let properties = &object.bound_properties;

    Ok(BoundCommon {
        box_min,
        box_max,
        box_center: center,
        sphere_center: center,
        sphere_radius: object_radius(ctx.scene, id, Space::Local),
        procedural_id: properties.procedural_id,
        room_id: properties.room_id,
        ped_density: properties.ped_density,
        poly_flags: properties.poly_flags,
        inertia: properties.inertia,
        volume: properties.volume,
        margin: object.margin,
        ..BoundCommon::default()
    })
}

/// [`init_bound`] plus the fields a composite child carries
///
/// Composite flags, the decomposed world transform and the material index
/// of the object's active collision material.
pub fn init_bound_item(ctx: &BuildContext<'_>, id: ObjectId) -> Result<BoundCommon> {
    let object = ctx.object(id)?;
    let mut common = init_bound(ctx, id)?;

    common.composite_flags1 = object.composite_flags1.to_flag_names();
    common.composite_flags2 = object.composite_flags2.to_flag_names();

    let world = Transform::from_matrix(&ctx.scene.matrix_world(id));
    common.composite_position = world.position;
    common.composite_rotation = world.rotation;
    common.composite_scale = world.scale;

    if let Some(properties) = object
        .active_material
        .and_then(|material| ctx.scene.material(material))
        .and_then(|material| material.collision_properties())
    {
        common.material_index = properties.collision_index;
    }

    Ok(common)
}

/// Build the bound record of one object
///
/// Objects whose kind is not a bound kind yield `Ok(None)`.
pub fn build_bound(ctx: &BuildContext<'_>, id: ObjectId) -> Result<Option<BoundItem>> {
    let object = ctx.object(id)?;

    let item = match object.kind {
        ObjectKind::BoundBox => {
            let mut common = init_bound_item(ctx, id)?;
            common.box_max = object.bound_dimensions;
            common.box_min = -object.bound_dimensions;
            BoundItem {
                common,
                kind: BoundKind::Box,
            }
        }
        ObjectKind::BoundSphere | ObjectKind::BoundCylinder | ObjectKind::BoundCapsule => {
            let mut common = init_bound_item(ctx, id)?;
            common.sphere_radius = object.bound_radius;
            let kind = match object.kind {
                ObjectKind::BoundSphere => BoundKind::Sphere,
                ObjectKind::BoundCylinder => BoundKind::Cylinder,
                _ => BoundKind::Capsule,
            };
            BoundItem { common, kind }
        }
        ObjectKind::BoundDisc => {
            let mut common = init_bound_item(ctx, id)?;
            common.sphere_radius = object.bound_radius;
            common.margin = object.margin;
            BoundItem {
                common,
                kind: BoundKind::Disc,
            }
        }
        ObjectKind::BoundCloth => BoundItem {
            common: init_bound_item(ctx, id)?,
            kind: BoundKind::Cloth,
        },
        ObjectKind::BoundGeometry => build_geometry(ctx, id, GeometryKind::Geometry)?,
        ObjectKind::BoundGeometryBvh => build_geometry(ctx, id, GeometryKind::GeometryBvh)?,
        _ => return Ok(None),
    };

    debug!("Built {} bound from '{}'", item.kind.type_name(), object.name);
    Ok(Some(item))
}

/// Build a composite from an object and every bound below it
///
/// Children are collected in pre-order; objects that are not bounds are
/// skipped but their subtrees are still searched.
pub fn build_composite(ctx: &BuildContext<'_>, id: ObjectId) -> Result<BoundsComposite> {
    let common = init_bound(ctx, id)?;

    let mut children = Vec::new();
    for child in ctx.descendants(id)? {
        if let Some(item) = build_bound(ctx, child)? {
            children.push(item);
        }
    }

    Ok(BoundsComposite { common, children })
}
