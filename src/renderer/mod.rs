//! WebGPU rendering module
//!
//! `scene` builds a frame's vertex lists on the CPU; `pipeline` owns the
//! surface and uploads them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Frame, SpriteStatus, build_frame};
