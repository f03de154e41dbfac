pub mod mat3;
pub mod mat4;
pub mod ray;
pub mod solvers;
pub mod vec3;

pub use mat3::*;
pub use mat4::*;
pub use ray::*;
pub use vec3::*;

/// Tolerance on the ray parameter below which a hit is considered to be the
/// surface the ray started from.
pub const EPSILON: f64 = 1e-5;
