use thiserror::Error;

/// Invalid shape or light parameters, reported when the object is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("magnitude of the normal must not be zero")]
    ZeroNormal,

    #[error("magnitude of the light direction must not be zero")]
    ZeroDirection,

    #[error("the triangle needs three unique points")]
    DegenerateTriangle,

    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("texture scale must be at least 1, got {0}")]
    InvalidTextureScale(i64),
}

pub type Result<T> = std::result::Result<T, GeometryError>;
