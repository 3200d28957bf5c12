//! Starfield / solar-system scene
//!
//! Pure simulation plus draw calls against the `Surface` trait, so it runs
//! and tests without a browser:
//! - Fixed frame-rate cap
//! - Seeded RNG only
//! - Fixed layer order (stars, sun, planets + moons, shooting stars, asteroids)

pub mod bodies;
pub mod frame;
pub mod state;

pub use bodies::{
    Asteroid, BackgroundStar, Body, Moon, Planet, ShootingStar, Sun, UpdateContext,
};
pub use frame::FrameLimiter;
pub use state::{Scene, SceneState};
