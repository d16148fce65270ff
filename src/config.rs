//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`COTTAGE_SECTION__KEY`)

use cottage_core::{Ease, Lighting, ModelTemplate, TweenError, Vec3};
use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Opening camera flight
    #[serde(default)]
    pub flythrough: FlythroughConfig,
    /// Orbit controls configuration
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Scene source configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`COTTAGE_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // COTTAGE_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("COTTAGE_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cottage".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Point the camera orbits around
    pub look_at: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [20.0, 15.0, 30.0],
            look_at: [0.0, 0.0, 0.0],
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Opening camera flight into the house
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlythroughConfig {
    /// Start the flight on launch
    pub enabled: bool,
    /// Where the camera ends up [x, y, z]
    pub destination: [f32; 3],
    /// Flight duration in seconds
    pub duration: f32,
    /// Ease name, e.g. "power2.inOut"
    pub ease: String,
}

impl Default for FlythroughConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            destination: [0.0, 2.0, 3.0],
            duration: 10.0,
            ease: "power2.inOut".to_string(),
        }
    }
}

impl FlythroughConfig {
    /// Parse the configured ease name
    pub fn ease(&self) -> Result<Ease, TweenError> {
        self.ease.parse()
    }

    pub fn destination(&self) -> Vec3 {
        Vec3::from_array(self.destination)
    }
}

/// Orbit controls configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Keep easing out motion after the mouse is released
    pub damping: bool,
    /// Fraction of pending motion applied per frame when damping
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Closest the camera may get to the target
    pub min_distance: f32,
    /// Farthest the camera may get from the target
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: 500.0,
        }
    }
}

/// Where the scene comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// RON scene file; the built-in cottage is used when unset or unreadable
    pub path: Option<String>,
    /// OBJ model imported in the background, unless the scene names its own
    pub model_path: Option<String>,
    /// Where the imported model is placed
    pub model_position: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: None,
            model_path: Some("textures/houses.obj".to_string()),
            model_position: [0.0, -4.0, 0.0],
        }
    }
}

impl SceneConfig {
    /// The configured external model, if any
    pub fn model(&self) -> Option<ModelTemplate> {
        self.model_path.as_ref().map(|path| ModelTemplate {
            path: path.into(),
            position: self.model_position,
        })
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Ambient light color [r, g, b]
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    /// Sun color [r, g, b]
    pub sun_color: [f32; 3],
    pub sun_intensity: f32,
    /// Sun position; light travels from here toward the origin
    pub sun_position: [f32; 3],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        let lighting = Lighting::default();
        Self {
            background_color: [0.0, 0.0, 0.0, 1.0],
            ambient_color: lighting.ambient_color,
            ambient_intensity: lighting.ambient_intensity,
            sun_color: lighting.sun_color,
            sun_intensity: lighting.sun_intensity,
            sun_position: lighting.sun_position,
        }
    }
}

impl RenderingConfig {
    /// Lighting rig for scenes that don't bring their own
    pub fn lighting(&self) -> Lighting {
        Lighting {
            ambient_color: self.ambient_color,
            ambient_intensity: self.ambient_intensity,
            sun_color: self.sun_color,
            sun_intensity: self.sun_intensity,
            sun_position: self.sun_position,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.camera.start_position, [20.0, 15.0, 30.0]);
        assert_eq!(config.flythrough.destination, [0.0, 2.0, 3.0]);
        assert_eq!(config.flythrough.duration, 10.0);
    }

    #[test]
    fn test_default_ease_parses() {
        let config = FlythroughConfig::default();
        assert_eq!(config.ease(), Ok(Ease::POWER2_IN_OUT));
    }

    #[test]
    fn test_unknown_ease_is_reported() {
        let config = FlythroughConfig {
            ease: "wobble.inOut".to_string(),
            ..FlythroughConfig::default()
        };
        assert!(matches!(config.ease(), Err(TweenError::UnknownEase(_))));
    }

    #[test]
    fn test_lighting_matches_defaults() {
        assert_eq!(RenderingConfig::default().lighting(), Lighting::default());
    }

    #[test]
    fn test_model_template() {
        let model = SceneConfig::default().model().unwrap();
        assert_eq!(model.path, std::path::PathBuf::from("textures/houses.obj"));
        assert_eq!(model.position, [0.0, -4.0, 0.0]);

        let none = SceneConfig {
            model_path: None,
            ..SceneConfig::default()
        };
        assert!(none.model().is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("destination"));
        assert!(toml.contains("damping_factor"));
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: AppConfig = toml::from_str("[flythrough]\nduration = 4.0\n").unwrap();
        assert_eq!(config.flythrough.duration, 4.0);
        assert_eq!(config.flythrough.ease, "power2.inOut");
        assert!(config.flythrough.enabled);
    }
}
