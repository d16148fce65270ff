//! Window management system
//!
//! Handles window creation, fullscreen toggle, and title updates.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Update window title with the camera position and flight progress
    pub fn update_title(&self, pos: [f32; 3], flight_progress: Option<f32>) {
        self.window
            .set_title(&format_title(&self.base_title, pos, flight_progress));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

fn format_title(base: &str, pos: [f32; 3], flight_progress: Option<f32>) -> String {
    match flight_progress {
        Some(p) => format!(
            "{} - ({:.1}, {:.1}, {:.1}) flying {:.0}% [Space to skip]",
            base,
            pos[0],
            pos[1],
            pos[2],
            p * 100.0
        ),
        None => format!(
            "{} - ({:.1}, {:.1}, {:.1}) [R to replay]",
            base, pos[0], pos[1], pos[2]
        ),
    }
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_while_flying() {
        let title = format_title("Test", [1.0, 2.0, 3.0], Some(0.25));
        assert_eq!(title, "Test - (1.0, 2.0, 3.0) flying 25% [Space to skip]");
    }

    #[test]
    fn test_title_at_rest() {
        let title = format_title("Test", [0.0, 2.0, 3.0], None);
        assert!(title.contains("R to replay"));
        assert!(!title.contains("flying"));
    }

    #[test]
    fn test_window_error_display() {
        let e = WindowError::CreationFailed("no display".to_string());
        assert_eq!(e.to_string(), "Window creation failed: no display");
    }
}
