//! Scene materials
//!
//! Only collision materials contribute to bound export; shader materials are
//! carried so meshes can reference them, and are ignored by the bound path.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Per-material collision flags
    ///
    /// Declaration order is the order flags are emitted in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct CollisionMatFlags: u16 {
        /// Surface is a staircase
        const STAIRS = 1 << 0;
        /// Peds cannot climb this surface
        const NOT_CLIMBABLE = 1 << 1;
        /// AI line of sight passes through
        const SEE_THROUGH = 1 << 2;
        /// Bullets pass through
        const SHOOT_THROUGH = 1 << 3;
        /// Not usable as cover
        const NOT_COVER = 1 << 4;
        /// Part of a walkable path
        const WALKABLE_PATH = 1 << 5;
        /// Camera ignores this surface
        const NO_CAM_COLLISION = 1 << 6;
        /// Bullets pass through but spawn effects
        const SHOOT_THROUGH_FX = 1 << 7;
        /// No decals
        const NO_DECAL = 1 << 8;
        /// Excluded from navmesh generation
        const NO_NAVMESH = 1 << 9;
        /// Ragdolls ignore this surface
        const NO_RAGDOLL = 1 << 10;
        /// Collides with vehicle wheels only
        const VEHICLE_WHEEL = 1 << 11;
        /// No particle effects
        const NO_PTFX = 1 << 12;
        /// Too steep for the player to stand on
        const TOO_STEEP_FOR_PLAYER = 1 << 13;
        /// No network spawns on this surface
        const NO_NETWORK_SPAWN = 1 << 14;
        /// Camera ignores this surface but may clip
        const NO_CAM_COLLISION_ALLOW_CLIPPING = 1 << 15;
    }
}

impl CollisionMatFlags {
    /// Encode the set flags as `FLAG_<NAME>` strings, in declaration order
    pub fn to_flag_names(self) -> Vec<String> {
        self.iter_names().map(|(name, _)| format!("FLAG_{name}")).collect()
    }
}

/// Collision properties of a collision material
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionProperties {
    /// Index into the engine's collision material table
    pub collision_index: u32,
    /// Procedural object id
    pub procedural_id: u8,
    /// Interior room id
    pub room_id: u8,
    /// Ambient ped density
    pub ped_density: u8,
    /// Material colour palette index
    pub material_color_index: u8,
    /// Collision flags
    pub flags: CollisionMatFlags,
}

/// What a material is used for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Rendering material, ignored by bound export
    Shader,
    /// Collision material
    Collision(CollisionProperties),
}

/// A material owned by the scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    /// Material name
    pub name: String,
    /// Material payload
    pub kind: MaterialKind,
}

impl Material {
    /// Create a collision material
    pub fn collision(name: impl Into<String>, properties: CollisionProperties) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::Collision(properties),
        }
    }

    /// Create a shader material
    pub fn shader(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::Shader,
        }
    }

    /// Collision properties if this is a collision material
    pub fn collision_properties(&self) -> Option<&CollisionProperties> {
        match &self.kind {
            MaterialKind::Collision(properties) => Some(properties),
            MaterialKind::Shader => None,
        }
    }
}
