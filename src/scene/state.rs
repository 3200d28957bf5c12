//! Scene state and the per-frame update/draw pass
//!
//! All entity lists live in one context object owned by the driver; nothing
//! reads ambient globals.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bodies::{Asteroid, BackgroundStar, Body, Planet, ShootingStar, Sun, UpdateContext};
use super::frame::FrameLimiter;
use crate::Bounds;
use crate::renderer::Surface;
use crate::settings::SceneConfig;

/// Every entity in the scene plus the RNG that spawns shooting stars
#[derive(Debug, Clone)]
pub struct SceneState {
    pub bounds: Bounds,
    pub stars: Vec<BackgroundStar>,
    pub sun: Sun,
    pub planets: Vec<Planet>,
    pub shooting_stars: Vec<ShootingStar>,
    pub asteroids: Vec<Asteroid>,
    /// Executed frames so far
    pub frame_count: u64,
    /// Shooting stars spawned so far
    pub spawned: u64,
    shooting_star_chance: f64,
    trail_length: usize,
    rng: Pcg32,
}

impl SceneState {
    /// Populate the scene for a canvas of the given size
    pub fn new(config: &SceneConfig, bounds: Bounds, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let sun = Sun::new(bounds.center(), config.sun_radius);

        let planets = config
            .planets
            .iter()
            .map(|spec| Planet::from_spec(spec, sun.pos, &mut rng))
            .collect();
        let stars = (0..config.star_count)
            .map(|_| BackgroundStar::random(&mut rng, bounds))
            .collect();
        let asteroids = (0..config.asteroid_count)
            .map(|_| Asteroid::random(&mut rng, bounds))
            .collect();

        Self {
            bounds,
            stars,
            sun,
            planets,
            shooting_stars: Vec::new(),
            asteroids,
            frame_count: 0,
            spawned: 0,
            shooting_star_chance: config.shooting_star_chance.clamp(0.0, 1.0),
            trail_length: config.trail_length,
            rng,
        }
    }

    /// Run one frame: clear, then update and draw each layer back to front
    pub fn step(&mut self, surface: &mut dyn Surface) {
        surface.clear();

        let ctx = UpdateContext {
            bounds: self.bounds,
            anchor: self.sun.pos,
        };

        step_layer(&mut self.stars, &ctx, surface);

        self.sun.draw(surface);

        step_layer(&mut self.planets, &ctx, surface);

        if self.rng.random_bool(self.shooting_star_chance) {
            let star = ShootingStar::random(&mut self.rng, self.bounds, self.trail_length);
            self.shooting_stars.push(star);
            self.spawned += 1;
        }
        let bounds = self.bounds;
        self.shooting_stars.retain(|s| !s.is_dead(bounds));
        step_layer(&mut self.shooting_stars, &ctx, surface);

        step_layer(&mut self.asteroids, &ctx, surface);

        self.frame_count += 1;
    }
}

/// Update then draw each body of one layer, in list order
fn step_layer<B: Body>(bodies: &mut [B], ctx: &UpdateContext, surface: &mut dyn Surface) {
    for body in bodies {
        body.update(ctx);
        body.draw(surface);
    }
}

/// Scene plus its frame-rate cap; what the animation-frame callback drives
#[derive(Debug, Clone)]
pub struct Scene {
    pub state: SceneState,
    limiter: FrameLimiter,
}

impl Scene {
    pub fn new(config: &SceneConfig, bounds: Bounds, seed: u64) -> Self {
        Self {
            state: SceneState::new(config, bounds, seed),
            limiter: FrameLimiter::new(config.frame_interval_ms),
        }
    }

    /// Handle one animation-frame callback. Returns whether a frame ran.
    pub fn frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> bool {
        if !self.limiter.should_run(now_ms) {
            return false;
        }
        self.state.step(surface);
        true
    }
}
