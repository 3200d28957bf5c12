//! Rendering module
//!
//! Scene bodies draw through the `Surface` trait; the browser build backs it
//! with a Canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use surface::{Color, DrawCall, Glow, Paint, RecordingSurface, Surface};
