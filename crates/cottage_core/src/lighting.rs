//! Scene lighting: one ambient term plus one directional "sun"

use cottage_math::Vec3;
use serde::{Serialize, Deserialize};

use crate::entity::hex_to_rgb;

/// Ambient + directional light description
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    /// Ambient light color (RGB, 0.0-1.0)
    pub ambient_color: [f32; 3],
    /// Ambient light intensity
    pub ambient_intensity: f32,
    /// Sun color (RGB, 0.0-1.0)
    pub sun_color: [f32; 3],
    /// Sun intensity
    pub sun_intensity: f32,
    /// Sun position; light travels from here toward the origin
    pub sun_position: [f32; 3],
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.6,
            sun_color: hex_to_rgb(0xffd591),
            sun_intensity: 0.8,
            sun_position: [10.0, 20.0, 10.0],
        }
    }
}

impl Lighting {
    /// Unit vector pointing from the scene toward the sun
    pub fn sun_direction(&self) -> Vec3 {
        let dir = Vec3::from_array(self.sun_position).normalized();
        if dir == Vec3::ZERO {
            Vec3::Y
        } else {
            dir
        }
    }

    /// Ambient color premultiplied by intensity
    pub fn ambient(&self) -> [f32; 3] {
        scale(self.ambient_color, self.ambient_intensity)
    }

    /// Sun color premultiplied by intensity
    pub fn sun(&self) -> [f32; 3] {
        scale(self.sun_color, self.sun_intensity)
    }
}

fn scale(c: [f32; 3], k: f32) -> [f32; 3] {
    [c[0] * k, c[1] * k, c[2] * k]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sun_direction() {
        let dir = Lighting::default().sun_direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.y > dir.x && dir.y > dir.z);
    }

    #[test]
    fn test_degenerate_sun_points_up() {
        let lighting = Lighting {
            sun_position: [0.0, 0.0, 0.0],
            ..Lighting::default()
        };
        assert_eq!(lighting.sun_direction(), Vec3::Y);
    }

    #[test]
    fn test_premultiplied_ambient() {
        assert_eq!(Lighting::default().ambient(), [0.6, 0.6, 0.6]);
    }
}
