use super::{Color, Hit, Material, Ray, Vec3, World};

/// Whitted style tracer: direct light with shadows plus mirror reflections
/// followed up to `depth` bounces.
#[derive(Debug, Clone, Copy)]
pub struct Tracer {
    pub depth: u32,
}

impl Tracer {
    pub fn new(depth: u32) -> Tracer {
        Tracer { depth }
    }

    pub fn trace(&self, world: &World, ray: &Ray) -> Color {
        self.trace_limited(world, ray, self.depth)
    }

    fn trace_limited(&self, world: &World, ray: &Ray, depth: u32) -> Color {
        match world.hit(ray) {
            Some(hit) => self.shade(world, &hit, depth),
            None => world.background(),
        }
    }

    fn shade(&self, world: &World, hit: &Hit, depth: u32) -> Color {
        let texture = hit.material.texture().color_at(hit.tex_coord);
        let (specular, exponent) = match *hit.material {
            Material::SingleColor { .. } => return texture,
            Material::Lambert { .. } => (None, 0.0),
            Material::Phong {
                specular, exponent, ..
            }
            | Material::Reflective {
                specular, exponent, ..
            } => (Some(specular), exponent),
        };

        let point = hit.point();
        // shade the side the ray comes from
        let normal = if hit.ray.direction.dot(hit.normal) > 0.0 {
            -hit.normal
        } else {
            hit.normal
        };
        let eye = (-hit.ray.direction).normalize();

        let mut color = texture * world.ambient();
        for light in world.lights() {
            let direction = light.direction_from(point);
            if direction.is_zero() || !light.illuminates(point, world) {
                continue;
            }
            let l = direction.normalize();
            color += texture * light.color() * normal.dot(l).max(0.0);
            if let Some(specular) = specular {
                let r = (-l).reflect(normal);
                color += specular * light.color() * r.dot(eye).max(0.0).powf(exponent);
            }
        }

        if let Material::Reflective { reflection, .. } = *hit.material {
            if depth > 0 {
                let reflected = Ray::new(point, hit.ray.direction.reflect(normal));
                color += reflection * self.trace_limited(world, &reflected, depth - 1);
            }
        }
        color
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Tracer::new(4)
    }
}

/// Component-wise clamp into the displayable `[0, 1]` range.
pub fn clamp_color(color: Color) -> Color {
    Vec3::new(
        color.x.clamp(0.0, 1.0),
        color.y.clamp(0.0, 1.0),
        color.z.clamp(0.0, 1.0),
    )
}
