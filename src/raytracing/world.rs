use super::{Color, Geometry, Hit, Light, Ray};

/// Everything a ray can meet, plus the lights and the colors used when it
/// meets nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    geometries: Vec<Geometry>,
    lights: Vec<Light>,
    background: Color,
    ambient: Color,
}

impl World {
    pub fn new(background: Color, ambient: Color) -> World {
        World {
            geometries: Vec::new(),
            lights: Vec::new(),
            background,
            ambient,
        }
    }

    pub fn add_geometry(&mut self, geometry: impl Into<Geometry>) {
        self.geometries.push(geometry.into());
    }

    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    /// The nearest hit among all geometries. On equal `t` the geometry added
    /// first wins.
    pub fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut closest: Option<Hit> = None;
        for geometry in &self.geometries {
            if let Some(result) = geometry.hit(ray) {
                if closest.map_or(true, |hit| result.t < hit.t) {
                    closest = Some(result);
                }
            }
        }
        closest
    }
}
