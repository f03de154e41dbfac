use super::{Material, Normal3, Point3, Ray, TexCoord2};

/// An intersection of `ray` with a surface at `ray.at(t)`.
///
/// `t` is the smallest accepted parameter of the surface, always above
/// `EPSILON`, and `normal` has unit length.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    pub t: f64,
    pub ray: Ray,
    pub normal: Normal3,
    pub tex_coord: TexCoord2,
    pub material: &'a Material,
}

impl<'a> Hit<'a> {
    pub fn new(
        t: f64,
        ray: Ray,
        normal: Normal3,
        tex_coord: TexCoord2,
        material: &'a Material,
    ) -> Hit<'a> {
        Hit {
            t,
            ray,
            normal,
            tex_coord,
            material,
        }
    }

    pub fn point(&self) -> Point3 {
        self.ray.at(self.t)
    }
}
