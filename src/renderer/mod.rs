//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into colored triangles and drawn by
//! a single alpha-blended pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, playfield_to_ndc};
pub use scene::build_scene;
pub use vertex::Vertex;
