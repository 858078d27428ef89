//! Confetti burst shown when the player wins the festive variant.

use super::types::{WORLD_HEIGHT, WORLD_WIDTH};
use rand::Rng;
use std::f64::consts::TAU;

/// Particles in one burst.
pub const CONFETTI_COUNT: usize = 120;

/// Downward acceleration per frame.
pub const CONFETTI_GRAVITY: f64 = 0.15;

/// Number of colors in the confetti palette (mapped to terminal colors by the UI).
pub const CONFETTI_PALETTE_SIZE: u8 = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiParticle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Palette index in `0..CONFETTI_PALETTE_SIZE`.
    pub color: u8,
    /// Radians.
    pub rotation: f64,
    /// Rotation change per frame.
    pub spin: f64,
}

/// Create a burst of particles fanning out from above the centerline.
pub fn spawn_confetti<R: Rng>(rng: &mut R, count: usize) -> Vec<ConfettiParticle> {
    let origin_x = WORLD_WIDTH / 2.0;
    let origin_y = WORLD_HEIGHT / 3.0;

    (0..count)
        .map(|_| ConfettiParticle {
            x: origin_x + rng.gen_range(-40.0..40.0),
            y: origin_y + rng.gen_range(-20.0..20.0),
            vx: rng.gen_range(-6.0..6.0),
            vy: rng.gen_range(-9.0..-2.0),
            color: rng.gen_range(0..CONFETTI_PALETTE_SIZE),
            rotation: rng.gen_range(0.0..TAU),
            spin: rng.gen_range(-0.3..0.3),
        })
        .collect()
}

/// Advance every particle by one frame.
pub fn advance_confetti(particles: &mut [ConfettiParticle]) {
    for p in particles.iter_mut() {
        p.x += p.vx;
        p.y += p.vy;
        p.vy += CONFETTI_GRAVITY;
        p.rotation = (p.rotation + p.spin).rem_euclid(TAU);
    }
}
