//! WebGPU rendering
//!
//! The whole scene is drawn by a fullscreen-triangle fragment shader using
//! signed distance fields; the CPU side only uploads one uniform per frame.

pub mod sdf_pipeline;

pub use sdf_pipeline::SdfRenderState;
