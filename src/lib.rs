// particle-engine - Simulation core for the site's canvas backdrops
//
// Two decorative effects: a pointer-reactive particle field with
// connection lines and shooting stars, and a falling glyph rain.
// Simulation and encoding are plain Rust, testable headless; the
// wasm surface in `web` paints the encoded commands and the page's
// JS drives one tick per animation frame.

pub mod rain;
pub mod render;
pub mod sim;
mod web;

pub use rain::GlyphRain;
pub use render::DrawCmd;
pub use sim::ParticleWorld;
pub use web::{MatrixRain, ParticleField};
