//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into a flat triangle list each frame
//! and drawn with a single pass-through pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::Renderer;
pub use shapes::scene;
pub use vertex::Vertex;
