// web.rs - wasm surface
//
// Canvas binding and painting. The page's JS owns the requestAnimationFrame
// loop and the event listeners; it forwards frames, pointer moves and
// resizes here. A missing canvas or a reduced-motion preference makes
// `mount` return nothing and the backdrop is skipped without an error.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use crate::rain::{self, GlyphRain};
use crate::render::DrawCmd;
use crate::sim::ParticleWorld;

const RESIZE_QUIET_MS: f64 = 250.0;

macro_rules! console_log {
    ($($t:tt)*) => {
        web_sys::console::log_1(&format_args!($($t)*).to_string().into())
    };
}

/// Latches resize events and releases the newest one after a quiet period,
/// so a drag-resize reseeds once instead of on every intermediate tick.
struct ResizeDebounce {
    pending: Option<(u32, u32)>,
    deadline: f64,
}

impl ResizeDebounce {
    fn new() -> Self {
        Self {
            pending: None,
            deadline: 0.0,
        }
    }

    fn push(&mut self, w: u32, h: u32, now_ms: f64) {
        self.pending = Some((w, h));
        self.deadline = now_ms + RESIZE_QUIET_MS;
    }

    fn take(&mut self, now_ms: f64) -> Option<(u32, u32)> {
        if now_ms < self.deadline {
            return None;
        }
        self.pending.take()
    }
}

fn prefers_reduced_motion(win: &web_sys::Window) -> bool {
    win.match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Find the canvas, size it to the viewport, grab its 2D context.
/// Any missing piece yields None; this is the silent no-op guard.
fn bind_canvas(canvas_id: &str) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
    let win = window()?;
    if prefers_reduced_motion(&win) {
        return None;
    }

    let canvas = win
        .document()?
        .get_element_by_id(canvas_id)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()?;

    let w = win.inner_width().ok()?.as_f64()? as u32;
    let h = win.inner_height().ok()?.as_f64()? as u32;
    canvas.set_width(w);
    canvas.set_height(h);

    let ctx = canvas
        .get_context("2d")
        .ok()??
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;

    Some((canvas, ctx))
}

fn paint(ctx: &CanvasRenderingContext2d, cmds: &[DrawCmd], w: f64, h: f64) -> Result<(), JsValue> {
    for cmd in cmds {
        match *cmd {
            DrawCmd::Clear => ctx.clear_rect(0.0, 0.0, w, h),
            DrawCmd::Fade { alpha } => {
                ctx.set_fill_style_str(&format!("rgba(0, 0, 0, {alpha})"));
                ctx.fill_rect(0.0, 0.0, w, h);
            }
            DrawCmd::Disc {
                x,
                y,
                radius,
                glow,
                hue,
                alpha,
            } => {
                let gradient = ctx.create_radial_gradient(
                    x as f64, y as f64, 0.0, x as f64, y as f64, glow as f64,
                )?;
                gradient.add_color_stop(0.0, &format!("hsla({hue}, 70%, 70%, {alpha})"))?;
                gradient.add_color_stop(0.5, &format!("hsla({hue}, 60%, 60%, {})", alpha * 0.5))?;
                gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)")?;

                ctx.begin_path();
                ctx.arc(x as f64, y as f64, radius as f64, 0.0, std::f64::consts::TAU)?;
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.fill();
            }
            DrawCmd::Link {
                x1,
                y1,
                x2,
                y2,
                hue,
                alpha,
            } => {
                ctx.begin_path();
                ctx.set_stroke_style_str(&format!("hsla({hue}, 60%, 60%, {alpha})"));
                ctx.set_line_width(1.0);
                ctx.move_to(x1 as f64, y1 as f64);
                ctx.line_to(x2 as f64, y2 as f64);
                ctx.stroke();
            }
            DrawCmd::Streak {
                x,
                y,
                tail_x,
                tail_y,
                width,
                life,
            } => {
                let gradient =
                    ctx.create_linear_gradient(x as f64, y as f64, tail_x as f64, tail_y as f64);
                gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", life * 0.8))?;
                gradient.add_color_stop(0.5, &format!("rgba(100, 200, 255, {})", life * 0.4))?;
                gradient.add_color_stop(1.0, "rgba(100, 200, 255, 0)")?;

                ctx.begin_path();
                ctx.set_stroke_style_canvas_gradient(&gradient);
                ctx.set_line_width(width as f64);
                ctx.move_to(x as f64, y as f64);
                ctx.line_to(tail_x as f64, tail_y as f64);
                ctx.stroke();
            }
            DrawCmd::Glyph { x, y, ch, alpha } => {
                ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {alpha})"));
                ctx.fill_text(&ch.to_string(), x as f64, y as f64)?;
            }
        }
    }

    Ok(())
}

/// Particle field bound to one canvas element
#[wasm_bindgen]
pub struct ParticleField {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    world: ParticleWorld,
    resize: ResizeDebounce,
}

#[wasm_bindgen]
impl ParticleField {
    pub fn mount(canvas_id: &str) -> Option<ParticleField> {
        let (canvas, ctx) = bind_canvas(canvas_id)?;
        let world = ParticleWorld::new(canvas.width() as f32, canvas.height() as f32);
        console_log!(
            "particle field mounted: {}x{}, {} particles",
            canvas.width(),
            canvas.height(),
            world.particles().len()
        );

        Some(Self {
            canvas,
            ctx,
            world,
            resize: ResizeDebounce::new(),
        })
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.world.set_pointer(x, y);
    }

    pub fn viewport_changed(&mut self, w: u32, h: u32) {
        self.resize.push(w, h, js_sys::Date::now());
    }

    pub fn frame(&mut self) -> Result<(), JsValue> {
        if let Some((w, h)) = self.resize.take(js_sys::Date::now()) {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.world.resize(w as f32, h as f32);
        }

        self.world.tick();
        paint(
            &self.ctx,
            self.world.commands(),
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        )
    }
}

/// Glyph rain bound to one canvas element
#[wasm_bindgen]
pub struct MatrixRain {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    rain: GlyphRain,
    resize: ResizeDebounce,
}

#[wasm_bindgen]
impl MatrixRain {
    pub fn mount(canvas_id: &str) -> Option<MatrixRain> {
        let (canvas, ctx) = bind_canvas(canvas_id)?;
        let rain = GlyphRain::new(canvas.width() as f32, canvas.height() as f32);
        console_log!(
            "glyph rain mounted: {}x{}, {} columns",
            canvas.width(),
            canvas.height(),
            rain.columns()
        );

        Some(Self {
            canvas,
            ctx,
            rain,
            resize: ResizeDebounce::new(),
        })
    }

    pub fn viewport_changed(&mut self, w: u32, h: u32) {
        self.resize.push(w, h, js_sys::Date::now());
    }

    pub fn frame(&mut self) -> Result<(), JsValue> {
        if let Some((w, h)) = self.resize.take(js_sys::Date::now()) {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.rain.resize(w as f32, h as f32);
        }

        self.rain.tick();
        // Resizing the canvas resets context state, so restate the font
        self.ctx.set_font(&format!("{}px monospace", rain::FONT_SIZE));
        paint(
            &self.ctx,
            self.rain.commands(),
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_waits_for_quiet_period() {
        let mut debounce = ResizeDebounce::new();
        debounce.push(800, 600, 1000.0);

        assert_eq!(debounce.take(1100.0), None);
        assert_eq!(debounce.take(1250.0), Some((800, 600)));
    }

    #[test]
    fn newest_resize_wins_and_pushes_the_deadline() {
        let mut debounce = ResizeDebounce::new();
        debounce.push(800, 600, 0.0);
        debounce.push(1024, 768, 100.0);

        assert_eq!(debounce.take(300.0), None);
        assert_eq!(debounce.take(350.0), Some((1024, 768)));
    }

    #[test]
    fn take_is_one_shot() {
        let mut debounce = ResizeDebounce::new();
        debounce.push(800, 600, 0.0);

        assert_eq!(debounce.take(250.0), Some((800, 600)));
        assert_eq!(debounce.take(251.0), None);
    }
}
