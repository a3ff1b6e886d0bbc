//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the transform decomposition the bound
//! records need.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Rotation3, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Iteration cap when extracting a rotation from a normalized basis
const ROTATION_MAX_ITER: usize = 64;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform from position, XYZ euler angles (radians) and scale
    ///
    /// The euler convention applies X first, then Y, then Z.
    pub fn from_position_euler_scale(position: Vec3, euler: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::from_euler_angles(euler.x, euler.y, euler.z),
            scale,
        }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Decompose a transformation matrix
    ///
    /// Rotation comes from the column-normalized upper 3x3 block. A mirrored
    /// block (negative determinant) is negated first so it becomes a proper
    /// rotation. Scale is the raw matrix diagonal, sign included.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let position = Vec3::new(matrix.m14, matrix.m24, matrix.m34);

        let columns = [
            Vec3::new(matrix.m11, matrix.m21, matrix.m31),
            Vec3::new(matrix.m12, matrix.m22, matrix.m32),
            Vec3::new(matrix.m13, matrix.m23, matrix.m33),
        ];

        let rotation = if columns.iter().any(|c| c.magnitude() <= f32::EPSILON) {
            Quat::identity()
        } else {
            let mut basis = Mat3::from_columns(&[
                columns[0].normalize(),
                columns[1].normalize(),
                columns[2].normalize(),
            ]);
            if basis.determinant() < 0.0 {
                basis = -basis;
            }
            let rotation = Rotation3::from_matrix_eps(
                &basis,
                f32::EPSILON,
                ROTATION_MAX_ITER,
                Rotation3::identity(),
            );
            Quat::from_rotation_matrix(&rotation)
        };

        Self {
            position,
            rotation: Quat::new_normalize(rotation.into_inner()),
            scale: Vec3::new(matrix.m11, matrix.m22, matrix.m33),
        }
    }
}

/// Apply a full affine matrix to a point given as a vector
pub fn transform_point(matrix: &Mat4, point: &Vec3) -> Vec3 {
    matrix.transform_point(&Point3::from(*point)).coords
}

/// Euclidean distance between two points
pub fn distance(a: &Vec3, b: &Vec3) -> f32 {
    (b - a).magnitude()
}
