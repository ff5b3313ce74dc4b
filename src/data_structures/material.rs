/// Specular response of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub specular_intensity: f32,
    pub shininess: f32,
}

impl Material {
    pub const fn new(specular_intensity: f32, shininess: f32) -> Self {
        Self {
            specular_intensity,
            shininess,
        }
    }

    pub const fn shiny() -> Self {
        Self::new(1.0, 32.0)
    }

    pub const fn dull() -> Self {
        Self::new(0.3, 4.0)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::dull()
    }
}
