// star.rs - Shooting star streaks
//
// Fixed-capacity Structure-of-Arrays with read/write compaction.
// Stars spawn stochastically, fly right and down, and fade out.

use super::Rng;

pub const MAX_STARS: usize = 64;

const SPAWN_CHANCE: f32 = 0.01;
const VX_MIN: f32 = 3.0;
const VX_RANGE: f32 = 5.0;
const VY_MIN: f32 = 1.0;
const VY_RANGE: f32 = 3.0;
const SIZE_MIN: f32 = 1.0;
const SIZE_RANGE: f32 = 2.0;
const DECAY_MIN: f32 = 0.01;
const DECAY_RANGE: f32 = 0.02;

pub struct ShootingStars {
    // Position
    pub x: [f32; MAX_STARS],
    pub y: [f32; MAX_STARS],

    // Velocity
    pub vx: [f32; MAX_STARS],
    pub vy: [f32; MAX_STARS],

    // Appearance and lifetime
    pub size: [f32; MAX_STARS],
    pub life: [f32; MAX_STARS],
    pub decay: [f32; MAX_STARS],

    // Count
    pub n: usize,
}

impl ShootingStars {
    pub fn new() -> Self {
        Self {
            x: [0.0; MAX_STARS],
            y: [0.0; MAX_STARS],
            vx: [0.0; MAX_STARS],
            vy: [0.0; MAX_STARS],
            size: [0.0; MAX_STARS],
            life: [0.0; MAX_STARS],
            decay: [0.0; MAX_STARS],
            n: 0,
        }
    }

    pub fn clear(&mut self) {
        self.n = 0;
    }

    pub fn push(&mut self, x: f32, y: f32, vx: f32, vy: f32, size: f32, life: f32, decay: f32) {
        if self.n >= MAX_STARS {
            return;
        }

        let i = self.n;
        self.x[i] = x;
        self.y[i] = y;
        self.vx[i] = vx;
        self.vy[i] = vy;
        self.size[i] = size;
        self.life[i] = life;
        self.decay[i] = decay;
        self.n += 1;
    }

    /// Roll the per-frame spawn chance; at most one star appears, somewhere
    /// in the upper half of the viewport, heading right and down.
    pub fn spawn(&mut self, w: f32, h: f32, rng: &mut Rng) {
        if rng.next() >= SPAWN_CHANCE {
            return;
        }

        self.push(
            rng.next() * w,
            rng.next() * h / 2.0,
            VX_MIN + rng.next() * VX_RANGE,
            VY_MIN + rng.next() * VY_RANGE,
            SIZE_MIN + rng.next() * SIZE_RANGE,
            1.0,
            DECAY_MIN + rng.next() * DECAY_RANGE,
        );
    }

    /// Integrate positions, burn lifetime, compact out expired stars
    pub fn update(&mut self) {
        let mut write = 0;

        for read in 0..self.n {
            let life = self.life[read] - self.decay[read];
            if life <= 0.0 {
                continue;
            }

            self.x[write] = self.x[read] + self.vx[read];
            self.y[write] = self.y[read] + self.vy[read];
            self.vx[write] = self.vx[read];
            self.vy[write] = self.vy[read];
            self.size[write] = self.size[read];
            self.life[write] = life;
            self.decay[write] = self.decay[read];
            write += 1;
        }

        self.n = write;
    }
}
