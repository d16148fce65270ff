//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod render;
mod simulation;
mod window;

pub use render::{scene_uniforms, RenderError, RenderSystem};
pub use simulation::{SimulationResult, SimulationSystem, MAX_FRAME_DT};
pub use window::{WindowError, WindowSystem};
