//! Backend-neutral 2D drawing surface
//!
//! Every scene body is a filled circle, optionally with a glow halo, so the
//! surface only needs `clear` and `fill_circle`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color (alpha 0-1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string for canvas fill/shadow styles
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Fill color plus optional glow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub fill: Color,
    pub glow: Option<Glow>,
}

/// Shadow halo drawn around a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub blur: f32,
}

impl Paint {
    pub fn solid(fill: Color) -> Self {
        Self { fill, glow: None }
    }

    pub fn glowing(fill: Color, glow_color: Color, blur: f32) -> Self {
        Self {
            fill,
            glow: Some(Glow {
                color: glow_color,
                blur,
            }),
        }
    }
}

/// Target of all scene draw calls
pub trait Surface {
    /// Erase the whole surface
    fn clear(&mut self);

    /// Fill a circle; glow, if any, applies to this shape only
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        paint: Paint,
    },
}

/// Surface that records calls instead of rasterizing (headless runs, tests)
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded so far
    pub fn reset(&mut self) {
        self.calls.clear();
    }

    /// Number of circles drawn since the last reset
    pub fn circle_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            paint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_css() {
        assert_eq!(Color::WHITE.with_alpha(0.5).to_css(), "rgba(255, 255, 255, 0.5)");
        assert_eq!(Color::YELLOW.to_css(), "rgba(255, 255, 0, 1)");
    }

    #[test]
    fn test_color_deserialize_defaults_alpha() {
        let c: Color = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
        assert_eq!(c, Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_recording_surface() {
        let mut s = RecordingSurface::new();
        s.clear();
        s.fill_circle(Vec2::ZERO, 2.0, Paint::solid(Color::RED));
        assert_eq!(s.calls.len(), 2);
        assert_eq!(s.circle_count(), 1);
        s.reset();
        assert!(s.calls.is_empty());
    }
}
