pub mod normal;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f32>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f32>;

/// Vectors shorter than this are treated as zero when normalising.
pub const TOLERANCE: f32 = 1e-12;
