pub mod camera;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod light;
pub mod material;
pub mod math;
pub mod parser;
pub mod texture;
pub mod tracer;
pub mod world;

pub use geometry::{load_model, Disc, Geometry, Plane, Sphere, Torus, Triangle};
pub use hit::Hit;
pub use light::{DirectionalLight, Light, PointLight};
pub use material::Material;
pub use math::*;
pub use texture::{TexCoord2, Texture};
pub use tracer::Tracer;
pub use world::World;
