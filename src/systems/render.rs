//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - The mesh pipeline and its scene buffers
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use cottage_core::{Lighting, World};
use cottage_render::{
    camera::Camera3D,
    context::{ContextError, RenderContext},
    pipeline::{MeshPipeline, SceneUniforms},
    RenderableGeometry,
};
use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Build the per-frame uniforms for a camera and lighting rig
pub fn scene_uniforms(camera: &Camera3D, lighting: &Lighting, aspect: f32) -> SceneUniforms {
    SceneUniforms {
        view_projection: camera.view_projection(aspect),
        sun_direction: lighting.sun_direction().to_array(),
        sun_color: lighting.sun(),
        ambient_color: lighting.ambient(),
        ..SceneUniforms::default()
    }
}

fn clear_color(c: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: c[0] as f64,
        g: c[1] as f64,
        b: c[2] as f64,
        a: c[3] as f64,
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    mesh_pipeline: MeshPipeline,
    render_config: RenderingConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        vsync: bool,
    ) -> Result<Self, ContextError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let mut mesh_pipeline = MeshPipeline::new(&context.device, context.config.format);
        mesh_pipeline.ensure_depth_texture(
            &context.device,
            context.size.width,
            context.size.height,
        );

        Ok(Self {
            context,
            mesh_pipeline,
            render_config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.mesh_pipeline.ensure_depth_texture(
            &self.context.device,
            self.context.size.width,
            self.context.size.height,
        );
    }

    /// Reconfigure the surface after it was lost
    pub fn recover_surface(&mut self) {
        log::warn!("Surface lost; reconfiguring");
        self.context.reconfigure();
    }

    /// Collect the world's geometry and upload it to the GPU
    pub fn upload_world(&mut self, world: &World) {
        let geometry = RenderableGeometry::from_world(world);
        self.mesh_pipeline.upload_geometry(&self.context.device, &geometry);
        log::info!(
            "Uploaded {} vertices and {} triangles",
            geometry.vertex_count(),
            geometry.triangle_count()
        );
    }

    /// Render a single frame
    pub fn render_frame(&mut self, camera: &Camera3D, lighting: &Lighting) -> Result<(), RenderError> {
        let uniforms = scene_uniforms(camera, lighting, self.context.aspect_ratio());
        self.mesh_pipeline.update_uniforms(&self.context.queue, &uniforms);

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.mesh_pipeline.render(
            &mut encoder,
            &view,
            clear_color(self.render_config.background_color),
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cottage_core::Vec3;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_scene_uniforms_from_lighting() {
        let lighting = Lighting::default();
        let camera = Camera3D::new();
        let uniforms = scene_uniforms(&camera, &lighting, 16.0 / 9.0);

        assert_eq!(uniforms.view_projection, camera.view_projection(16.0 / 9.0));
        assert_eq!(uniforms.ambient_color, [0.6, 0.6, 0.6]);
        assert_eq!(Vec3::from_array(uniforms.sun_direction), lighting.sun_direction());
    }

    #[test]
    fn test_clear_color() {
        let c = clear_color([0.5, 0.25, 0.0, 1.0]);
        assert_eq!((c.r, c.g, c.b, c.a), (0.5, 0.25, 0.0, 1.0));
    }
}
