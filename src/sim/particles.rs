//! Particle effects: ambient dust, the book's trail and score sparkles
//!
//! Purely visual. Nothing here feeds back into gameplay, but spawning draws
//! from the run RNG so replays stay identical.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Viewport;
use crate::tuning::Tuning;
use crate::{Rgba, palette};

/// Particle families, each with its own spawn rule and death condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Score burst
    Sparkle,
    /// Ambient background motes drifting up
    Dust,
    /// Glow behind the book and jump puffs
    Trail,
}

impl ParticleKind {
    /// Kind-specific death, checked after the shared life decay
    pub fn outlived(&self, particle: &Particle) -> bool {
        match self {
            ParticleKind::Dust => particle.pos.y < -10.0,
            ParticleKind::Sparkle | ParticleKind::Trail => false,
        }
    }

    /// Sparkles and trail glow; dust does not
    pub fn glows(&self) -> bool {
        !matches!(self, ParticleKind::Dust)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life, starts at `max_life` and decays every tick
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: Rgba,
    pub kind: ParticleKind,
}

impl Particle {
    /// Render opacity
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.life.max(0.0)
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0 || self.kind.outlived(self)
    }
}

/// Push unless the budget is exhausted
fn push_capped(particles: &mut Vec<Particle>, particle: Particle, budget: usize) {
    if particles.len() < budget {
        particles.push(particle);
    }
}

/// Radial burst of `count` particles around `origin`
pub fn burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    origin: Vec2,
    kind: ParticleKind,
    count: usize,
    budget: usize,
) {
    let color = match kind {
        ParticleKind::Sparkle => palette::SPARKLE,
        _ => palette::PARTICLE_BLUE,
    };
    for _ in 0..count {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = rng.random::<f32>() * 2.0 + 0.5;
        let size = rng.random::<f32>() * 3.0 + 1.0;
        push_capped(
            particles,
            Particle {
                pos: origin,
                vel: Vec2::from_angle(angle) * speed,
                life: 1.0,
                max_life: 1.0,
                size,
                color,
                kind,
            },
            budget,
        );
    }
}

/// Maybe add one dust mote below the bottom edge while under the dust cap
pub fn spawn_dust(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    viewport: &Viewport,
    tuning: &Tuning,
    budget: usize,
) {
    let dust = particles
        .iter()
        .filter(|p| p.kind == ParticleKind::Dust)
        .count();
    if dust >= tuning.dust_cap || rng.random::<f32>() >= tuning.dust_spawn_chance {
        return;
    }
    let x = rng.random::<f32>() * viewport.width;
    let vx = (rng.random::<f32>() - 0.5) * 0.5;
    let vy = -rng.random::<f32>() - 0.2;
    let size = rng.random::<f32>() * 2.0;
    push_capped(
        particles,
        Particle {
            pos: Vec2::new(x, viewport.height + 10.0),
            vel: Vec2::new(vx, vy),
            life: 1.0,
            max_life: 1.0,
            size,
            color: palette::DUST,
            kind: ParticleKind::Dust,
        },
        budget,
    );
}

/// One glow particle streaming left from just behind the book
pub fn emit_trail(particles: &mut Vec<Particle>, rng: &mut Pcg32, book: Vec2, budget: usize) {
    let vy = rng.random::<f32>() - 0.5;
    let size = rng.random::<f32>() * 4.0 + 2.0;
    push_capped(
        particles,
        Particle {
            pos: Vec2::new(book.x - 10.0, book.y),
            vel: Vec2::new(-2.0, vy),
            life: 0.8,
            max_life: 0.8,
            size,
            color: palette::BOOK_GLOW,
            kind: ParticleKind::Trail,
        },
        budget,
    );
}

/// Move every particle, decay its life, and drop the dead ones
pub fn step(particles: &mut Vec<Particle>, decay: f32) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.life -= decay;
    }
    particles.retain(|p| !p.is_dead());
}
