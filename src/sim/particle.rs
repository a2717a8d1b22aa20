// particle.rs - Drifting background particles
//
// Structure-of-Arrays layout for cache-friendly iteration.
// Count scales with viewport area so visual density stays constant.

use super::Rng;

// One particle per this many square pixels of viewport
const DENSITY_AREA: f32 = 8000.0;

// Seeding ranges
const VEL_MAX: f32 = 0.75;
const SIZE_MIN: f32 = 0.5;
const SIZE_RANGE: f32 = 2.5;
const HUE_BASE: f32 = 180.0; // blue-cyan band
const HUE_RANGE: f32 = 60.0;

// Per-frame motion
const WOBBLE_STEP: f32 = 0.02;
const JITTER: f32 = 0.3;

// Pointer interaction
const POINTER_RADIUS: f32 = 200.0;
const POINTER_PUSH: f32 = 3.0;
const OPACITY_FLOOR: f32 = 0.2;
const OPACITY_GAIN: f32 = 0.3;
const OPACITY_DECAY: f32 = 0.01;

// Toroidal wrap margin
const WRAP_MARGIN: f32 = 10.0;

pub struct Particles {
    // Position
    pub x: Vec<f32>,
    pub y: Vec<f32>,

    // Velocity
    pub vx: Vec<f32>,
    pub vy: Vec<f32>,

    // Appearance
    pub size: Vec<f32>,
    pub opacity: Vec<f32>,
    pub hue: Vec<f32>,

    // Organic drift phase
    pub wobble: Vec<f32>,
}

impl Particles {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            vx: Vec::new(),
            vy: Vec::new(),
            size: Vec::new(),
            opacity: Vec::new(),
            hue: Vec::new(),
            wobble: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
        self.vx.clear();
        self.vy.clear();
        self.size.clear();
        self.opacity.clear();
        self.hue.clear();
        self.wobble.clear();
    }

    pub fn push(
        &mut self,
        x: f32,
        y: f32,
        vx: f32,
        vy: f32,
        size: f32,
        opacity: f32,
        hue: f32,
        wobble: f32,
    ) {
        self.x.push(x);
        self.y.push(y);
        self.vx.push(vx);
        self.vy.push(vy);
        self.size.push(size);
        self.opacity.push(opacity);
        self.hue.push(hue);
        self.wobble.push(wobble);
    }

    /// Particle count for a viewport
    pub fn count_for(w: f32, h: f32) -> usize {
        (w * h / DENSITY_AREA) as usize
    }

    /// Seed a full particle set for the viewport, discarding any existing one
    pub fn seed(&mut self, w: f32, h: f32, rng: &mut Rng) {
        self.clear();

        for _ in 0..Self::count_for(w, h) {
            self.push(
                rng.next() * w,
                rng.next() * h,
                rng.range(-VEL_MAX, VEL_MAX),
                rng.range(-VEL_MAX, VEL_MAX),
                SIZE_MIN + rng.next() * SIZE_RANGE,
                OPACITY_FLOOR + rng.next() * (1.0 - OPACITY_FLOOR),
                HUE_BASE + rng.next() * HUE_RANGE,
                rng.next() * std::f32::consts::TAU,
            );
        }
    }

    /// Advance all particles one frame: wobble drift, pointer repulsion,
    /// opacity relaxation, toroidal wrap.
    pub fn update(&mut self, w: f32, h: f32, pointer_x: f32, pointer_y: f32) {
        for i in 0..self.len() {
            self.wobble[i] += WOBBLE_STEP;
            let mut x = self.x[i] + self.vx[i] + self.wobble[i].sin() * JITTER;
            let mut y = self.y[i] + self.vy[i] + self.wobble[i].cos() * JITTER;

            let dx = pointer_x - x;
            let dy = pointer_y - y;
            let distance = (dx * dx + dy * dy).sqrt();

            if distance < POINTER_RADIUS {
                let force = (POINTER_RADIUS - distance) / POINTER_RADIUS;
                let angle = dy.atan2(dx);
                x -= angle.cos() * force * POINTER_PUSH;
                y -= angle.sin() * force * POINTER_PUSH;
                self.opacity[i] = (self.opacity[i] + force * OPACITY_GAIN).min(1.0);
            } else {
                self.opacity[i] = (self.opacity[i] - OPACITY_DECAY).max(OPACITY_FLOOR);
            }

            // Wrap at the viewport edges (toroidal, not a bounce)
            if x < -WRAP_MARGIN {
                x = w + WRAP_MARGIN;
            }
            if x > w + WRAP_MARGIN {
                x = -WRAP_MARGIN;
            }
            if y < -WRAP_MARGIN {
                y = h + WRAP_MARGIN;
            }
            if y > h + WRAP_MARGIN {
                y = -WRAP_MARGIN;
            }

            self.x[i] = x;
            self.y[i] = y;
        }
    }
}
