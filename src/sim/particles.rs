//! Death-burst particle system
//!
//! Particles are purely visual and never gate gameplay, but they outlive the
//! run that spawned them: aging continues through the game-over screen until
//! every particle has expired.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::Particle;
use crate::consts::*;

/// Number of shades in the renderer's particle palette
pub const PALETTE_SIZE: u32 = 4;

/// Emit one burst of `count` particles at `origin`, scattering in a full
/// circle with a slight upward bias. When the pool is full the oldest
/// particles are dropped to make room.
pub fn spawn_burst<R: Rng>(particles: &mut Vec<Particle>, rng: &mut R, origin: Vec2, count: u32) {
    for _ in 0..count {
        if particles.len() >= MAX_PARTICLES {
            particles.remove(0);
        }
        let angle = rng.random_range(0.0..TAU);
        let speed = PARTICLE_MIN_SPEED + rng.random_range(0.0..PARTICLE_SPEED_RANGE);
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(
                angle.cos() * speed,
                angle.sin() * speed - PARTICLE_LIFT,
            ),
            age: 0.0,
            life: PARTICLE_MIN_LIFE + rng.random_range(0.0..PARTICLE_LIFE_RANGE),
            size: (2 + rng.random_range(0..3)) as f32,
            color: rng.random_range(0..PALETTE_SIZE),
        });
    }
}

/// Advance every particle by one step of time-scale `dt` and drop the expired.
/// Velocity is damped multiplicatively, gravity pulls the vertical component,
/// and age accumulates in elapsed milliseconds.
pub fn update(particles: &mut Vec<Particle>, dt: f32) {
    for p in particles.iter_mut() {
        p.age += dt * NOMINAL_FRAME_MS as f32;
        p.vel.y += PARTICLE_GRAVITY * dt;
        p.pos += p.vel * dt * PARTICLE_STEP_SCALE;
        p.vel.x *= PARTICLE_DRAG_X;
        p.vel.y *= PARTICLE_DRAG_Y;
    }
    particles.retain(|p| p.age < p.life);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_count_and_ranges() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::new(80.0, 400.0), 26);
        assert_eq!(particles.len(), 26);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(80.0, 400.0));
            assert!(p.life >= PARTICLE_MIN_LIFE && p.life < PARTICLE_MIN_LIFE + PARTICLE_LIFE_RANGE);
            assert!(p.size >= 2.0 && p.size <= 4.0);
            assert!(p.color < PALETTE_SIZE);
            // Upward bias shifts the mean but speed still bounds the spread
            let unbiased_vy = p.vel.y + PARTICLE_LIFT;
            let speed = (p.vel.x * p.vel.x + unbiased_vy * unbiased_vy).sqrt();
            assert!(speed >= PARTICLE_MIN_SPEED - 1e-4);
            assert!(speed <= PARTICLE_MIN_SPEED + PARTICLE_SPEED_RANGE + 1e-4);
        }
    }

    #[test]
    fn test_pool_cap_drops_oldest() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut particles = Vec::new();
        for _ in 0..20 {
            spawn_burst(&mut particles, &mut rng, Vec2::ZERO, 28);
        }
        assert!(particles.len() <= MAX_PARTICLES);
    }

    #[test]
    fn test_aging_and_removal() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            age: 0.0,
            life: 100.0,
            size: 2.0,
            color: 0,
        }];
        // One tick at dt=1 ages by one nominal frame
        update(&mut particles, 1.0);
        assert_eq!(particles.len(), 1);
        assert!((particles[0].age - NOMINAL_FRAME_MS as f32).abs() < 1e-4);
        assert!(particles[0].pos.x > 0.0);

        // Seven nominal frames exceed a 100ms life
        for _ in 0..6 {
            update(&mut particles, 1.0);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_gravity_and_drag() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(2.0, 0.0),
            age: 0.0,
            life: 10_000.0,
            size: 3.0,
            color: 1,
        }];
        update(&mut particles, 1.0);
        let p = &particles[0];
        // Gravity pulled vy down from zero, then drag scaled it
        assert!((p.vel.y - PARTICLE_GRAVITY * PARTICLE_DRAG_Y).abs() < 1e-5);
        assert!((p.vel.x - 2.0 * PARTICLE_DRAG_X).abs() < 1e-5);
    }

    #[test]
    fn test_aging_scales_with_dt() {
        let mut fast = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            age: 0.0,
            life: 10_000.0,
            size: 2.0,
            color: 0,
        }];
        let mut slow = fast.clone();
        update(&mut fast, 4.0);
        for _ in 0..4 {
            update(&mut slow, 1.0);
        }
        assert!((fast[0].age - slow[0].age).abs() < 1e-3);
    }
}
