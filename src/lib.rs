//! Starfield Gate - animated solar-system backdrop and a two-link access gate
//!
//! Core modules:
//! - `scene`: Starfield/solar-system entities and the capped-rate frame loop
//! - `gate`: Access gate state machine and its persisted completion flag
//! - `renderer`: Drawing surface abstraction (Canvas 2D on web)
//! - `platform`: Browser/native platform abstraction (storage, timers, DOM)
//! - `settings`: Data-driven scene and gate configuration

pub mod error;
pub mod gate;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;

pub use error::{Error, Result};
pub use settings::{AppConfig, GateConfig, SceneConfig};

use glam::Vec2;

/// Shared constants
pub mod consts {
    /// Target frame rate of the scene loop
    pub const TARGET_FPS: f64 = 30.0;
    /// Minimum milliseconds between executed frames
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / TARGET_FPS;

    /// Maximum shooting-star trail points
    pub const TRAIL_LENGTH: usize = 10;
    /// Per-frame chance of spawning a shooting star
    pub const SHOOTING_STAR_CHANCE: f64 = 0.05;

    /// Countdown start value (minutes)
    pub const COUNTDOWN_START: u32 = 3;
    /// Real-time length of one countdown step
    pub const COUNTDOWN_TICK_MS: u32 = 60_000;

    /// LocalStorage key for the completion flag
    pub const ACCESSED_KEY: &str = "accessed";
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_to_cartesian_axes() {
        let p = polar_to_cartesian(10.0, 0.0);
        assert!((p.x - 10.0).abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);

        let p = polar_to_cartesian(10.0, std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-4);
        assert!((p.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_bounds_center() {
        let b = Bounds::new(800.0, 600.0);
        assert_eq!(b.center(), Vec2::new(400.0, 300.0));
    }
}
