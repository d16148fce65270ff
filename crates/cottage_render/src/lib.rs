//! Cottage Rendering Library
//!
//! This crate provides the wgpu-based renderer for the cottage scene.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera3D`] - Perspective camera with a look-at target
//! - [`pipeline::MeshPipeline`] - Opaque + transparent mesh drawing with flat lighting
//! - [`renderable::RenderableGeometry`] - Converts World/Entity to GPU buffers

pub mod context;
pub mod camera;
pub mod pipeline;
pub mod renderable;

// Re-export core types for convenience
pub use cottage_core::{World, Entity, Transform, Material, Mesh, EntityKey, Lighting};
pub use cottage_math::Vec3;

pub use camera::Camera3D;
pub use renderable::{RenderableGeometry, GeometryBatch};
