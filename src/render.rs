// render.rs - Encode simulation state to draw commands
//
// The simulation never touches a canvas. Each tick it encodes the frame
// into a flat command list; the wasm surface paints it, and headless
// tests inspect it directly.

use crate::sim::{Particles, ShootingStars};

const LINK_RADIUS: f32 = 150.0;
const LINK_ALPHA: f32 = 0.3;
const TRAIL_SCALE: f32 = 10.0;

// Asynchronous breathing: each particle pulses offset by its index
const PULSE_PHASE_STEP: f32 = 0.1;
const PULSE_DEPTH: f32 = 0.3;
const PULSE_BASE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCmd {
    /// Wipe the whole surface
    Clear,
    /// Fade the previous frame toward black (rain variant)
    Fade { alpha: f32 },
    /// Soft radial-gradient disc; `glow` is the gradient's outer radius
    Disc {
        x: f32,
        y: f32,
        radius: f32,
        glow: f32,
        hue: f32,
        alpha: f32,
    },
    /// Connection line between two nearby particles
    Link {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        hue: f32,
        alpha: f32,
    },
    /// Directional streak with a gradient tail
    Streak {
        x: f32,
        y: f32,
        tail_x: f32,
        tail_y: f32,
        width: f32,
        life: f32,
    },
    /// Single monospace character (rain variant)
    Glyph { x: f32, y: f32, ch: char, alpha: f32 },
}

pub struct Encoder {
    cmds: Vec<DrawCmd>,
}

impl Encoder {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    /// Start a frame: drop last frame's commands, emit the wipe
    pub fn begin(&mut self, wipe: DrawCmd) {
        self.cmds.clear();
        self.cmds.push(wipe);
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn glyph(&mut self, x: f32, y: f32, ch: char, alpha: f32) {
        self.cmds.push(DrawCmd::Glyph { x, y, ch, alpha });
    }

    /// Encode each live star as a streak trailing back along its velocity
    pub fn encode_stars(&mut self, stars: &ShootingStars) {
        for i in 0..stars.n {
            self.cmds.push(DrawCmd::Streak {
                x: stars.x[i],
                y: stars.y[i],
                tail_x: stars.x[i] - stars.vx[i] * TRAIL_SCALE,
                tail_y: stars.y[i] - stars.vy[i] * TRAIL_SCALE,
                width: stars.size[i],
                life: stars.life[i],
            });
        }
    }

    /// Encode particle discs and their connection lines.
    ///
    /// Links are drawn for index pairs (i, j) with i < j only, so each close
    /// pair produces exactly one line. Quadratic in particle count, which the
    /// density formula keeps small.
    pub fn encode_particles(&mut self, particles: &Particles, time: f32) {
        let n = particles.len();

        for i in 0..n {
            let pulse = (time + i as f32 * PULSE_PHASE_STEP).sin() * PULSE_DEPTH + PULSE_BASE;

            self.cmds.push(DrawCmd::Disc {
                x: particles.x[i],
                y: particles.y[i],
                radius: particles.size[i] * pulse,
                glow: particles.size[i] * 2.0,
                hue: particles.hue[i],
                alpha: particles.opacity[i] * pulse,
            });

            for j in i + 1..n {
                let dx = particles.x[i] - particles.x[j];
                let dy = particles.y[i] - particles.y[j];
                let distance = (dx * dx + dy * dy).sqrt();

                if distance < LINK_RADIUS {
                    self.cmds.push(DrawCmd::Link {
                        x1: particles.x[i],
                        y1: particles.y[i],
                        x2: particles.x[j],
                        y2: particles.y[j],
                        hue: (particles.hue[i] + particles.hue[j]) / 2.0,
                        alpha: LINK_ALPHA * (1.0 - distance / LINK_RADIUS),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_particles(d: f32) -> Particles {
        let mut particles = Particles::new();
        particles.push(100.0, 100.0, 0.0, 0.0, 2.0, 0.5, 200.0, 0.0);
        particles.push(100.0 + d, 100.0, 0.0, 0.0, 2.0, 0.5, 220.0, 0.0);
        particles
    }

    #[test]
    fn begin_drops_previous_frame() {
        let mut encoder = Encoder::new();
        encoder.begin(DrawCmd::Clear);
        encoder.glyph(0.0, 0.0, '0', 0.5);
        encoder.begin(DrawCmd::Fade { alpha: 0.05 });
        assert_eq!(encoder.commands(), [DrawCmd::Fade { alpha: 0.05 }]);
    }

    #[test]
    fn close_pair_gets_one_link_with_averaged_hue() {
        let mut encoder = Encoder::new();
        encoder.begin(DrawCmd::Clear);
        encoder.encode_particles(&two_particles(75.0), 0.0);

        let links: Vec<_> = encoder
            .commands()
            .iter()
            .filter_map(|c| match *c {
                DrawCmd::Link { hue, alpha, .. } => Some((hue, alpha)),
                _ => None,
            })
            .collect();

        assert_eq!(links.len(), 1);
        let (hue, alpha) = links[0];
        assert_eq!(hue, 210.0);
        // alpha = 0.3 * (1 - 75/150)
        assert!((alpha - 0.15).abs() < 1e-6);
    }

    #[test]
    fn distant_pair_gets_no_link() {
        let mut encoder = Encoder::new();
        encoder.begin(DrawCmd::Clear);
        encoder.encode_particles(&two_particles(150.0), 0.0);

        assert!(
            !encoder
                .commands()
                .iter()
                .any(|c| matches!(c, DrawCmd::Link { .. }))
        );
    }

    #[test]
    fn disc_radius_pulses_with_time_and_index() {
        let mut encoder = Encoder::new();
        encoder.begin(DrawCmd::Clear);
        encoder.encode_particles(&two_particles(300.0), 1.25);

        let discs: Vec<_> = encoder
            .commands()
            .iter()
            .filter_map(|c| match *c {
                DrawCmd::Disc { radius, glow, .. } => Some((radius, glow)),
                _ => None,
            })
            .collect();

        assert_eq!(discs.len(), 2);
        let pulse0 = (1.25f32).sin() * PULSE_DEPTH + PULSE_BASE;
        let pulse1 = (1.25f32 + PULSE_PHASE_STEP).sin() * PULSE_DEPTH + PULSE_BASE;
        assert!((discs[0].0 - 2.0 * pulse0).abs() < 1e-6);
        assert!((discs[1].0 - 2.0 * pulse1).abs() < 1e-6);
        assert_eq!(discs[0].1, 4.0);
    }

    #[test]
    fn streak_tail_points_back_along_velocity() {
        let mut stars = ShootingStars::new();
        stars.push(50.0, 40.0, 4.0, 2.0, 1.5, 0.8, 0.01);

        let mut encoder = Encoder::new();
        encoder.begin(DrawCmd::Clear);
        encoder.encode_stars(&stars);

        assert_eq!(
            encoder.commands()[1],
            DrawCmd::Streak {
                x: 50.0,
                y: 40.0,
                tail_x: 10.0,
                tail_y: 20.0,
                width: 1.5,
                life: 0.8,
            }
        );
    }
}
