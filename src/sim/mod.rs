// sim/ - Particle field simulation
//
// Entity management using Structure-of-Arrays for cache efficiency.
// Each entity type in its own module.

mod particle;
mod star;

pub use particle::Particles;
pub use star::ShootingStars;

use crate::render::{DrawCmd, Encoder};

// Frame-locked clock step; simulation speed follows display refresh on
// purpose, matching the original backdrop
const TIME_STEP: f32 = 0.01;

const DEFAULT_SEED: u32 = 0xDEADBEEF;

/// Seeded xorshift32 generator, yields uniform f32 in [0, 1)
pub struct Rng(u32);

impl Rng {
    pub fn new(seed: u32) -> Self {
        // xorshift has a zero fixed point
        Self(if seed == 0 { DEFAULT_SEED } else { seed })
    }

    #[inline(always)]
    pub fn next(&mut self) -> f32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        (self.0 >> 8) as f32 * (1.0 / 16777216.0)
    }

    #[inline]
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next()
    }
}

/// Particle field world: particles, shooting stars, pointer, clock.
///
/// The host drives it one `tick` per animation frame and paints the
/// resulting command list; events mutate state between ticks.
pub struct ParticleWorld {
    // Viewport dimensions
    w: f32,
    h: f32,

    // Entities
    particles: Particles,
    stars: ShootingStars,

    // Pointer position, origin until the first move event
    pointer_x: f32,
    pointer_y: f32,

    // Monotonic simulation clock, phases the pulse effect
    time: f32,

    // Output
    encoder: Encoder,

    // RNG state
    rng: Rng,
}

impl ParticleWorld {
    pub fn new(w: f32, h: f32) -> Self {
        Self::with_seed(w, h, DEFAULT_SEED)
    }

    pub fn with_seed(w: f32, h: f32, seed: u32) -> Self {
        let mut rng = Rng::new(seed);
        let mut particles = Particles::new();
        particles.seed(w, h, &mut rng);

        Self {
            w,
            h,
            particles,
            stars: ShootingStars::new(),
            pointer_x: 0.0,
            pointer_y: 0.0,
            time: 0.0,
            encoder: Encoder::new(),
            rng,
        }
    }

    /// Full reseed at the new density
    pub fn resize(&mut self, w: f32, h: f32) {
        self.w = w;
        self.h = h;
        self.particles.seed(w, h, &mut self.rng);
        self.stars.clear();
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer_x = x;
        self.pointer_y = y;
    }

    /// One frame step: advance the clock, spawn and age stars, move
    /// particles, encode the frame.
    pub fn tick(&mut self) {
        self.time += TIME_STEP;

        self.stars.spawn(self.w, self.h, &mut self.rng);
        self.stars.update();
        self.particles
            .update(self.w, self.h, self.pointer_x, self.pointer_y);

        self.encoder.begin(DrawCmd::Clear);
        self.encoder.encode_stars(&self.stars);
        self.encoder.encode_particles(&self.particles, self.time);
    }

    pub fn commands(&self) -> &[DrawCmd] {
        self.encoder.commands()
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_matches_viewport_area() {
        let world = ParticleWorld::new(800.0, 600.0);
        assert_eq!(world.particles().len(), 60);
    }

    #[test]
    fn resize_reseeds_to_new_density() {
        let mut world = ParticleWorld::new(800.0, 600.0);
        world.resize(1600.0, 1200.0);
        assert_eq!(world.particles().len(), 240);
    }

    #[test]
    fn seeded_init_is_deterministic() {
        let a = ParticleWorld::with_seed(800.0, 600.0, 7);
        let b = ParticleWorld::with_seed(800.0, 600.0, 7);

        assert_eq!(a.particles().len(), b.particles().len());
        assert_eq!(a.particles().x, b.particles().x);
        assert_eq!(a.particles().y, b.particles().y);
        assert_eq!(a.particles().hue, b.particles().hue);
    }

    #[test]
    fn opacity_stays_in_bounds_over_many_frames() {
        let mut world = ParticleWorld::with_seed(640.0, 480.0, 42);
        world.set_pointer(320.0, 240.0);

        for _ in 0..500 {
            world.tick();
        }

        for &opacity in &world.particles().opacity {
            assert!(
                (0.2..=1.0).contains(&opacity),
                "opacity {opacity} out of bounds"
            );
        }
    }

    #[test]
    fn positions_stay_within_wrap_margins() {
        let mut world = ParticleWorld::with_seed(640.0, 480.0, 42);

        for _ in 0..500 {
            world.tick();
        }

        let particles = world.particles();
        for i in 0..particles.len() {
            assert!((-10.0..=650.0).contains(&particles.x[i]));
            assert!((-10.0..=490.0).contains(&particles.y[i]));
        }
    }

    #[test]
    fn clock_advances_by_fixed_step() {
        let mut world = ParticleWorld::with_seed(320.0, 240.0, 3);
        for _ in 0..100 {
            world.tick();
        }
        assert!((world.time() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn frame_starts_with_clear() {
        let mut world = ParticleWorld::with_seed(320.0, 240.0, 3);
        world.tick();
        assert_eq!(world.commands()[0], DrawCmd::Clear);
    }

    #[test]
    fn one_link_per_close_pair() {
        let mut world = ParticleWorld::with_seed(400.0, 300.0, 9);
        world.tick();

        let particles = world.particles();
        let mut expected = 0;
        for i in 0..particles.len() {
            for j in i + 1..particles.len() {
                let dx = particles.x[i] - particles.x[j];
                let dy = particles.y[i] - particles.y[j];
                if (dx * dx + dy * dy).sqrt() < 150.0 {
                    expected += 1;
                }
            }
        }

        let drawn = world
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCmd::Link { .. }))
            .count();
        assert_eq!(drawn, expected);
    }

    #[test]
    fn expired_stars_are_never_encoded() {
        let mut world = ParticleWorld::with_seed(800.0, 600.0, 11);

        for _ in 0..2000 {
            world.tick();
            for cmd in world.commands() {
                if let DrawCmd::Streak { life, .. } = cmd {
                    assert!(*life > 0.0);
                }
            }
        }
    }
}
