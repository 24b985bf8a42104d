//! Small fixed-size linear algebra for real-time 3D: `Vec3`/`Vec4`,
//! column-major `Mat4` with left-handed camera matrices, and an `Angle`
//! newtype so degrees and radians cannot be mixed up silently.

pub mod angle;
pub mod matrix;
pub mod vector;

pub use angle::{Angle, ToAngle};
pub use matrix::Mat4;
pub use vector::{Vec3, Vec4};

pub mod prelude {
    pub use crate::angle::{Angle, ToAngle};
    pub use crate::matrix::Mat4;
    pub use crate::vector::{Vec3, Vec4};
}
