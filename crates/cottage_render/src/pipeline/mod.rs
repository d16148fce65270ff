//! Rendering pipeline components
//!
//! This module contains the mesh pipeline and the GPU data types it consumes.

pub mod types;
pub mod mesh_pipeline;

pub use types::{MeshVertex, SceneUniforms};
pub use mesh_pipeline::MeshPipeline;
