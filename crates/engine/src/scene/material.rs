use quartz::{Vec3, Vec4};

use crate::utils::color::Color;

/// Per-node shading inputs, handed to the node's renderer with every draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub directional_light_color: Color,
    pub directional_light_vector: Vec4,
    pub point_light_color: Color,
    pub point_light_position: Vec3,
    pub point_light_range: f32,
    pub specular_color: Color,
    pub specular_power: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::GRAY,
            directional_light_color: Color::GRAY,
            directional_light_vector: Vec4::new(-2.0, 0.0, 1.0, 0.0),
            point_light_color: Color::CYAN,
            point_light_position: Vec3::new(0.0, 0.0, -3.0),
            point_light_range: 16.0,
            specular_color: Color::WHITE,
            specular_power: 32.0,
        }
    }
}
