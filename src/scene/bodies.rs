//! Scene entities
//!
//! Each body type owns its motion rule and its look. Positions are canvas
//! pixels with the origin at the top-left corner.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::renderer::{Color, Paint, Surface};
use crate::settings::{MoonSpec, PlanetSpec};
use crate::{Bounds, polar_to_cartesian};

/// Per-update inputs shared by every body
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext {
    pub bounds: Bounds,
    /// Point orbiting bodies circle around (sun for planets, planet for moons)
    pub anchor: Vec2,
}

/// Shared update/draw capability of all scene entities
pub trait Body {
    /// Advance motion by one executed frame
    fn update(&mut self, ctx: &UpdateContext);
    fn draw(&self, surface: &mut dyn Surface);
}

/// Faint star drifting right-to-left behind everything else
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundStar {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

impl BackgroundStar {
    pub fn new(pos: Vec2, size: f32, speed: f32) -> Self {
        Self { pos, size, speed }
    }

    pub fn random(rng: &mut impl Rng, bounds: Bounds) -> Self {
        Self::new(
            Vec2::new(
                rng.random_range(0.0..bounds.width.max(f32::EPSILON)),
                rng.random_range(0.0..bounds.height.max(f32::EPSILON)),
            ),
            rng.random_range(1.0..3.0),
            rng.random_range(0.05..0.15),
        )
    }
}

impl Body for BackgroundStar {
    fn update(&mut self, ctx: &UpdateContext) {
        self.pos.x -= self.speed;
        if self.pos.x < 0.0 {
            self.pos.x = ctx.bounds.width;
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(
            self.pos,
            self.size,
            Paint::glowing(Color::WHITE.with_alpha(0.5), Color::WHITE.with_alpha(0.7), 10.0),
        );
    }
}

/// Short-lived streak with a fading trail
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Frames left to live
    pub lifespan: f32,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
    trail_limit: usize,
}

impl ShootingStar {
    pub fn new(pos: Vec2, vel: Vec2, size: f32, lifespan: f32, trail_limit: usize) -> Self {
        Self {
            pos,
            vel,
            size,
            lifespan,
            trail: VecDeque::with_capacity(trail_limit + 1),
            trail_limit,
        }
    }

    /// Spawn somewhere in the top half of the canvas, heading down-right
    pub fn random(rng: &mut impl Rng, bounds: Bounds, trail_limit: usize) -> Self {
        Self::new(
            Vec2::new(
                rng.random_range(0.0..bounds.width.max(f32::EPSILON)),
                rng.random_range(0.0..(bounds.height / 2.0).max(f32::EPSILON)),
            ),
            Vec2::new(rng.random_range(1.0..4.0), rng.random_range(1.0..3.0)),
            rng.random_range(2.0..5.0),
            rng.random_range(50.0..100.0),
            trail_limit,
        )
    }

    /// Expired or past the right edge
    pub fn is_dead(&self, bounds: Bounds) -> bool {
        self.lifespan <= 0.0 || self.pos.x > bounds.width
    }
}

impl Body for ShootingStar {
    fn update(&mut self, _ctx: &UpdateContext) {
        self.pos += self.vel;

        self.trail.push_back(self.pos);
        while self.trail.len() > self.trail_limit {
            self.trail.pop_front();
        }

        self.lifespan -= 1.0;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let len = self.trail.len() as f32;
        for (i, point) in self.trail.iter().enumerate() {
            let alpha = (i as f32 + 1.0) / len;
            surface.fill_circle(*point, self.size, Paint::solid(Color::WHITE.with_alpha(alpha)));
        }

        surface.fill_circle(
            self.pos,
            self.size,
            Paint::glowing(Color::WHITE, Color::WHITE.with_alpha(0.7), 15.0),
        );
    }
}

/// Fixed glowing center of the solar system
#[derive(Debug, Clone, PartialEq)]
pub struct Sun {
    pub pos: Vec2,
    pub radius: f32,
}

impl Sun {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }
}

impl Body for Sun {
    fn update(&mut self, _ctx: &UpdateContext) {}

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(
            self.pos,
            self.radius,
            Paint::glowing(Color::YELLOW, Color::YELLOW, 30.0),
        );
    }
}

/// Moon circling its parent planet
#[derive(Debug, Clone, PartialEq)]
pub struct Moon {
    pub distance: f32,
    pub radius: f32,
    pub color: Color,
    pub speed: f32,
    pub angle: f32,
    pub pos: Vec2,
}

impl Moon {
    pub fn new(spec: &MoonSpec, angle: f32, anchor: Vec2) -> Self {
        Self {
            distance: spec.distance,
            radius: spec.radius,
            color: spec.color,
            speed: spec.speed,
            angle,
            pos: anchor + polar_to_cartesian(spec.distance, angle),
        }
    }

    /// Offset from the parent planet at the current angle
    pub fn offset(&self) -> Vec2 {
        polar_to_cartesian(self.distance, self.angle)
    }
}

impl Body for Moon {
    fn update(&mut self, ctx: &UpdateContext) {
        self.angle += self.speed;
        self.pos = ctx.anchor + self.offset();
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(
            self.pos,
            self.radius,
            Paint::glowing(self.color, self.color, 10.0),
        );
    }
}

/// Planet circling the sun, carrying its moons
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub name: String,
    pub distance: f32,
    pub radius: f32,
    pub color: Color,
    pub speed: f32,
    pub angle: f32,
    pub pos: Vec2,
    pub moons: Vec<Moon>,
}

impl Planet {
    /// Build from a spec with random starting phases for the planet and its moons
    pub fn from_spec(spec: &PlanetSpec, sun: Vec2, rng: &mut impl Rng) -> Self {
        let angle = rng.random_range(0.0..TAU);
        let pos = sun + polar_to_cartesian(spec.distance, angle);
        let moons = spec
            .moons
            .iter()
            .map(|m| Moon::new(m, rng.random_range(0.0..TAU), pos))
            .collect();

        Self {
            name: spec.name.clone(),
            distance: spec.distance,
            radius: spec.radius,
            color: spec.color,
            speed: spec.speed,
            angle,
            pos,
            moons,
        }
    }
}

impl Body for Planet {
    fn update(&mut self, ctx: &UpdateContext) {
        self.angle += self.speed;
        self.pos = ctx.anchor + polar_to_cartesian(self.distance, self.angle);

        let moon_ctx = UpdateContext {
            anchor: self.pos,
            ..*ctx
        };
        for moon in &mut self.moons {
            moon.update(&moon_ctx);
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(
            self.pos,
            self.radius,
            Paint::glowing(self.color, self.color, 15.0),
        );
        for moon in &self.moons {
            moon.draw(surface);
        }
    }
}

/// Gray rock drifting up-left, wrapping on both axes
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub pos: Vec2,
    pub size: f32,
    pub vel: Vec2,
}

impl Asteroid {
    pub fn new(pos: Vec2, size: f32, vel: Vec2) -> Self {
        Self { pos, size, vel }
    }

    pub fn random(rng: &mut impl Rng, bounds: Bounds) -> Self {
        Self::new(
            Vec2::new(
                rng.random_range(0.0..bounds.width.max(f32::EPSILON)),
                rng.random_range(0.0..bounds.height.max(f32::EPSILON)),
            ),
            rng.random_range(2.0..7.0),
            Vec2::new(rng.random_range(0.5..1.5), rng.random_range(0.5..1.5)),
        )
    }
}

impl Body for Asteroid {
    fn update(&mut self, ctx: &UpdateContext) {
        self.pos -= self.vel;

        if self.pos.x < 0.0 {
            self.pos.x = ctx.bounds.width;
        }
        if self.pos.y < 0.0 {
            self.pos.y = ctx.bounds.height;
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(
            self.pos,
            self.size,
            Paint::glowing(Color::GRAY, Color::GRAY, 5.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCall, RecordingSurface};
    use proptest::prelude::*;

    fn ctx() -> UpdateContext {
        UpdateContext {
            bounds: Bounds::new(800.0, 600.0),
            anchor: Vec2::new(400.0, 300.0),
        }
    }

    fn moon_spec() -> MoonSpec {
        MoonSpec {
            distance: 40.0,
            radius: 5.0,
            color: Color::GRAY,
            speed: 0.02,
        }
    }

    fn planet_spec() -> PlanetSpec {
        PlanetSpec {
            name: "Earth".into(),
            distance: 200.0,
            radius: 20.0,
            color: Color::BLUE,
            speed: 0.005,
            moons: vec![moon_spec()],
        }
    }

    #[test]
    fn test_background_star_drifts_and_wraps() {
        let mut star = BackgroundStar::new(Vec2::new(0.1, 50.0), 2.0, 0.06);
        star.update(&ctx());
        assert!((star.pos.x - 0.04).abs() < 1e-6);

        star.update(&ctx());
        assert_eq!(star.pos.x, 800.0);
        assert_eq!(star.pos.y, 50.0);
    }

    #[test]
    fn test_shooting_star_moves_and_ages() {
        let mut s = ShootingStar::new(Vec2::new(10.0, 10.0), Vec2::new(2.0, 1.0), 3.0, 60.0, 10);
        s.update(&ctx());
        assert_eq!(s.pos, Vec2::new(12.0, 11.0));
        assert_eq!(s.lifespan, 59.0);
        assert_eq!(s.trail.back(), Some(&Vec2::new(12.0, 11.0)));
    }

    #[test]
    fn test_shooting_star_trail_evicts_oldest() {
        let mut s = ShootingStar::new(Vec2::ZERO, Vec2::new(1.0, 0.0), 3.0, 100.0, 10);
        for _ in 0..15 {
            s.update(&ctx());
        }
        assert_eq!(s.trail.len(), 10);
        assert_eq!(s.trail.front(), Some(&Vec2::new(6.0, 0.0)));
        assert_eq!(s.trail.back(), Some(&Vec2::new(15.0, 0.0)));
    }

    #[test]
    fn test_shooting_star_death() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut s = ShootingStar::new(Vec2::new(10.0, 10.0), Vec2::new(1.0, 1.0), 3.0, 2.0, 10);
        assert!(!s.is_dead(bounds));
        s.update(&ctx());
        assert!(!s.is_dead(bounds));
        s.update(&ctx());
        assert!(s.is_dead(bounds));

        let off_edge = ShootingStar::new(Vec2::new(801.0, 10.0), Vec2::ONE, 3.0, 50.0, 10);
        assert!(off_edge.is_dead(bounds));
    }

    #[test]
    fn test_shooting_star_draws_trail_then_head() {
        let mut s = ShootingStar::new(Vec2::ZERO, Vec2::new(1.0, 0.0), 3.0, 100.0, 10);
        s.update(&ctx());
        s.update(&ctx());

        let mut surface = RecordingSurface::new();
        s.draw(&mut surface);
        assert_eq!(surface.circle_count(), 3);

        let alphas: Vec<f32> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Circle { paint, .. } => Some(paint.fill.a),
                DrawCall::Clear => None,
            })
            .collect();
        assert_eq!(alphas, vec![0.5, 1.0, 1.0]);
        match &surface.calls[2] {
            DrawCall::Circle { paint, .. } => assert!(paint.glow.is_some()),
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_asteroid_wraps_each_axis() {
        let mut a = Asteroid::new(Vec2::new(0.4, 100.0), 3.0, Vec2::new(0.5, 0.5));
        a.update(&ctx());
        assert_eq!(a.pos.x, 800.0);
        assert!((a.pos.y - 99.5).abs() < 1e-6);

        let mut a = Asteroid::new(Vec2::new(100.0, 0.2), 3.0, Vec2::new(0.5, 0.5));
        a.update(&ctx());
        assert!((a.pos.x - 99.5).abs() < 1e-6);
        assert_eq!(a.pos.y, 600.0);
    }

    #[test]
    fn test_planet_orbits_anchor() {
        let mut rng = rand_pcg::Pcg32::new(7, 0);
        let mut planet = Planet::from_spec(&planet_spec(), Vec2::new(400.0, 300.0), &mut rng);
        let start = planet.angle;
        planet.update(&ctx());
        assert!((planet.angle - (start + 0.005)).abs() < 1e-6);
        let dist = planet.pos.distance(Vec2::new(400.0, 300.0));
        assert!((dist - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_planet_draws_itself_then_moons() {
        let mut rng = rand_pcg::Pcg32::new(7, 0);
        let planet = Planet::from_spec(&planet_spec(), Vec2::new(400.0, 300.0), &mut rng);
        let mut surface = RecordingSurface::new();
        planet.draw(&mut surface);
        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Circle {
                    center: planet.pos,
                    radius: 20.0,
                    paint: Paint::glowing(Color::BLUE, Color::BLUE, 15.0),
                },
                DrawCall::Circle {
                    center: planet.moons[0].pos,
                    radius: 5.0,
                    paint: Paint::glowing(Color::GRAY, Color::GRAY, 10.0),
                },
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_trail_never_exceeds_limit(ticks in 0usize..200, limit in 1usize..20) {
            let mut s = ShootingStar::new(Vec2::ZERO, Vec2::new(1.5, 0.5), 3.0, 500.0, limit);
            for _ in 0..ticks {
                s.update(&ctx());
                prop_assert!(s.trail.len() <= limit);
            }
            prop_assert_eq!(s.trail.len(), ticks.min(limit));
        }

        #[test]
        fn prop_moon_tracks_parent(seed in any::<u64>(), ticks in 0usize..500) {
            let mut rng = rand_pcg::Pcg32::new(seed, 0);
            let mut planet = Planet::from_spec(&planet_spec(), Vec2::new(400.0, 300.0), &mut rng);
            for _ in 0..ticks {
                planet.update(&ctx());
            }
            let moon = &planet.moons[0];
            let expected = planet.pos + moon.offset();
            prop_assert!(moon.pos.distance(expected) < 1e-3);
        }
    }
}
