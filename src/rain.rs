// rain.rs - Glyph rain backdrop
//
// The alternate canvas variant: one falling glyph column per 14 px of
// width, with a partial fade instead of a full clear so heads leave
// dimming trails.

use crate::render::{DrawCmd, Encoder};
use crate::sim::Rng;

pub const FONT_SIZE: f32 = 14.0;

const FADE_ALPHA: f32 = 0.05;
const GLYPH_ALPHA: f32 = 0.5;
const SPEED_MIN: f32 = 1.0;
const SPEED_RANGE: f32 = 2.0;
const RESET_CHANCE: f32 = 0.01;

const GLYPHS: &[char] = &[
    '0', '1', 'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ',
    'ソ', 'タ', 'チ', 'ツ', 'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ', 'ノ', 'ハ', 'ヒ', 'フ', 'ヘ',
    'ホ', 'マ', 'ミ', 'ム', 'メ', 'モ', 'ヤ', 'ユ', 'ヨ', 'ラ', 'リ', 'ル', 'レ', 'ロ', 'ワ',
    'ヲ', 'ン',
];

pub struct GlyphRain {
    // Viewport dimensions
    w: f32,
    h: f32,

    // Column head position and fall speed
    y: Vec<f32>,
    speed: Vec<f32>,

    // Output
    encoder: Encoder,

    // RNG state
    rng: Rng,
}

impl GlyphRain {
    pub fn new(w: f32, h: f32) -> Self {
        Self::with_seed(w, h, 0xCAFEF00D)
    }

    pub fn with_seed(w: f32, h: f32, seed: u32) -> Self {
        let mut rain = Self {
            w,
            h,
            y: Vec::new(),
            speed: Vec::new(),
            encoder: Encoder::new(),
            rng: Rng::new(seed),
        };
        rain.reseed();
        rain
    }

    pub fn resize(&mut self, w: f32, h: f32) {
        self.w = w;
        self.h = h;
        self.reseed();
    }

    pub fn columns(&self) -> usize {
        self.y.len()
    }

    fn reseed(&mut self) {
        let count = (self.w / FONT_SIZE) as usize;

        self.y.clear();
        self.speed.clear();
        for _ in 0..count {
            self.y.push(self.rng.next() * self.h);
            self.speed.push(SPEED_MIN + self.rng.next() * SPEED_RANGE);
        }
    }

    /// One frame: fade the previous frame, draw a random glyph at each
    /// column head, advance heads, occasionally reset heads past the
    /// bottom edge back to the top.
    pub fn tick(&mut self) {
        self.encoder.begin(DrawCmd::Fade { alpha: FADE_ALPHA });

        for i in 0..self.y.len() {
            let pick = (self.rng.next() * GLYPHS.len() as f32) as usize;
            let ch = GLYPHS[pick.min(GLYPHS.len() - 1)];
            self.encoder
                .glyph(i as f32 * FONT_SIZE, self.y[i], ch, GLYPH_ALPHA);

            if self.y[i] > self.h && self.rng.next() < RESET_CHANCE {
                self.y[i] = 0.0;
            }
            self.y[i] += self.speed[i];
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        self.encoder.commands()
    }
}
