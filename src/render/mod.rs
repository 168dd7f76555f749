//! Canvas2D rendering (wasm only).
//!
//! Draw order per frame: background strips, pipes, bird, particles, HUD.
//! The parallax strips are pre-rendered to offscreen canvases at (re)size
//! time and blitted twice side by side to cover the wrap seam. The start
//! screen and the game-over overlay are drawn on demand, not per frame.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::highscores::BestScore;
use crate::sim::{BackgroundLayer, GameState};

/// Skyline fill colors, back to front
const LAYER_COLORS: [&str; 3] = ["#4a677a", "#2a576a", "#1a475a"];
const PIPE_BODY: &str = "#43a047";
const PIPE_CAP: &str = "#2e7d32";
const BIRD_BODY: &str = "#f4ce42";
const BIRD_WING: &str = "#e6b71e";
const BIRD_BEAK: &str = "#ff9933";

/// Axis-aligned button rectangle for overlay hit-testing
#[derive(Debug, Clone, Copy)]
pub struct ButtonRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl ButtonRect {
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

/// Clickable regions of the game-over overlay
#[derive(Debug, Clone, Copy)]
pub struct OverlayLayout {
    pub play_again: ButtonRect,
    pub project: ButtonRect,
    pub share: ButtonRect,
}

/// Owns the drawing context and the pre-rendered background strips
pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    strips: Vec<HtmlCanvasElement>,
}

impl Renderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            strips: Vec::new(),
        }
    }

    /// Re-render the background strips; call at startup and after resize
    pub fn rebuild_strips(&mut self, state: &GameState) {
        match self.render_strips(state) {
            Ok(strips) => self.strips = strips,
            Err(e) => {
                log::warn!("background strip render failed: {e:?}");
                self.strips.clear();
            }
        }
    }

    fn render_strips(&self, state: &GameState) -> Result<Vec<HtmlCanvasElement>, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let mut strips = Vec::with_capacity(state.background.len());
        for (layer, color) in state.background.iter().zip(LAYER_COLORS) {
            let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
            canvas.set_width(layer.strip_width() as u32);
            canvas.set_height(state.height as u32);
            let ctx: CanvasRenderingContext2d = canvas
                .get_context("2d")?
                .ok_or_else(|| JsValue::from_str("no 2d context"))?
                .dyn_into()?;

            draw_skyline(&ctx, layer, color, state.height as f64);
            strips.push(canvas);
        }
        Ok(strips)
    }

    /// One full frame while the run is active
    pub fn draw_frame(&self, state: &GameState, best: &BestScore) {
        if let Err(e) = self.try_draw_frame(state, best) {
            log::warn!("frame draw failed: {e:?}");
        }
    }

    fn try_draw_frame(&self, state: &GameState, best: &BestScore) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (w, h) = (state.width as f64, state.height as f64);
        ctx.clear_rect(0.0, 0.0, w, h);

        self.draw_background(state);
        self.draw_pipes(state);
        self.draw_bird(state)?;
        self.draw_particles(state)?;
        self.draw_hud(state, best, w)?;
        Ok(())
    }

    fn draw_background(&self, state: &GameState) {
        for (layer, strip) in state.background.iter().zip(&self.strips) {
            let x = layer.offset as f64;
            let span = layer.strip_width() as f64;
            // Two copies bridge the wrap seam
            let _ = self
                .ctx
                .draw_image_with_html_canvas_element(strip, x, 0.0);
            let _ = self
                .ctx
                .draw_image_with_html_canvas_element(strip, x + span, 0.0);
        }
    }

    fn draw_pipes(&self, state: &GameState) {
        let ctx = &self.ctx;
        let h = state.height as f64;
        for pipe in &state.pipes {
            let x = pipe.x as f64;
            let gap_top = pipe.gap_top as f64;
            let gap_bottom = pipe.gap_bottom() as f64;
            let w = PIPE_WIDTH as f64;

            ctx.set_fill_style_str(PIPE_BODY);
            ctx.fill_rect(x, 0.0, w, gap_top);
            ctx.fill_rect(x, gap_bottom, w, h - gap_bottom);

            // Cap lips overhang the body slightly
            ctx.set_fill_style_str(PIPE_CAP);
            ctx.fill_rect(x - 3.0, gap_top - 20.0, w + 6.0, 20.0);
            ctx.fill_rect(x - 3.0, gap_bottom, w + 6.0, 20.0);
        }
    }

    fn draw_bird(&self, state: &GameState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let bird = &state.bird;
        ctx.save();
        ctx.translate(bird.pos.x as f64, bird.pos.y as f64)?;
        ctx.rotate(bird.rotation as f64)?;

        // Body
        ctx.set_fill_style_str(BIRD_BODY);
        ctx.begin_path();
        ctx.ellipse(0.0, 0.0, 20.0, 15.0, 0.0, 0.0, std::f64::consts::TAU)?;
        ctx.fill();

        // Wing, tilted by the animation phase
        let wing_tilt = -std::f64::consts::FRAC_PI_4 + bird.wing_frame as f64 * 0.5;
        ctx.set_fill_style_str(BIRD_WING);
        ctx.begin_path();
        ctx.ellipse(-5.0, 0.0, 12.0, 8.0, wing_tilt, 0.0, std::f64::consts::TAU)?;
        ctx.fill();

        // Eye
        ctx.set_fill_style_str("white");
        ctx.begin_path();
        ctx.arc(8.0, -5.0, 5.0, 0.0, std::f64::consts::TAU)?;
        ctx.fill();
        ctx.set_fill_style_str("black");
        ctx.begin_path();
        ctx.arc(10.0, -5.0, 2.0, 0.0, std::f64::consts::TAU)?;
        ctx.fill();

        // Beak
        ctx.set_fill_style_str(BIRD_BEAK);
        ctx.begin_path();
        ctx.move_to(15.0, 0.0);
        ctx.line_to(25.0, 0.0);
        ctx.line_to(15.0, 5.0);
        ctx.fill();

        ctx.restore();
        Ok(())
    }

    fn draw_particles(&self, state: &GameState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        for p in state.particles.iter() {
            ctx.set_global_alpha(p.life as f64);
            ctx.set_fill_style_str(&format!("hsl({:.0}, 100%, 70%)", p.hue));
            ctx.begin_path();
            ctx.arc(p.pos.x as f64, p.pos.y as f64, 3.0, 0.0, std::f64::consts::TAU)?;
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn draw_hud(&self, state: &GameState, best: &BestScore, w: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("white");
        ctx.set_text_align("center");
        ctx.set_font("30px Arial");
        ctx.fill_text(&format!("Score: {}", state.score), w / 2.0, 50.0)?;
        ctx.set_font("20px Arial");
        ctx.fill_text(&format!("High Score: {}", best.value), w / 2.0, 80.0)?;
        Ok(())
    }

    /// Dimmed pre-start screen with a prompt
    pub fn draw_start_screen(&self, state: &GameState) {
        if let Err(e) = self.try_draw_start_screen(state) {
            log::warn!("start screen draw failed: {e:?}");
        }
    }

    fn try_draw_start_screen(&self, state: &GameState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (w, h) = (state.width as f64, state.height as f64);
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_fill_style_str("white");
        ctx.set_text_align("center");
        ctx.set_font("bold 48px Arial");
        ctx.fill_text("Skyflap", w * 0.5, h * 0.4)?;
        ctx.set_font("24px Arial");
        ctx.fill_text("Click or press Space to start", w * 0.5, h * 0.5)?;
        Ok(())
    }

    /// Static terminal overlay. Returns the button layout for hit-testing;
    /// `time_secs` drives the Play Again pulse, so redraws animate it.
    pub fn draw_game_over(
        &self,
        state: &GameState,
        best: &BestScore,
        time_secs: f64,
    ) -> Option<OverlayLayout> {
        match self.try_draw_game_over(state, best, time_secs) {
            Ok(layout) => Some(layout),
            Err(e) => {
                log::warn!("game over draw failed: {e:?}");
                None
            }
        }
    }

    fn try_draw_game_over(
        &self,
        state: &GameState,
        best: &BestScore,
        time_secs: f64,
    ) -> Result<OverlayLayout, JsValue> {
        let ctx = &self.ctx;
        let (w, h) = (state.width as f64, state.height as f64);

        ctx.save();
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.9)");
        ctx.fill_rect(0.0, 0.0, w, h);

        let center_y = h * 0.4;
        let spacing = h * 0.1;
        ctx.set_text_align("center");

        ctx.set_shadow_color("#ff4444");
        ctx.set_shadow_blur(20.0);
        ctx.set_fill_style_str("#ff6666");
        ctx.set_font(&format!("bold {}px Arial", (h * 0.08).min(60.0)));
        ctx.fill_text("Game Over!", w * 0.5, center_y)?;

        ctx.set_shadow_blur(10.0);
        ctx.set_fill_style_str("#ffdd44");
        ctx.set_font(&format!("bold {}px Arial", (h * 0.06).min(40.0)));
        ctx.fill_text(&format!("Score: {}", state.score), w * 0.5, center_y + spacing)?;

        ctx.set_fill_style_str("#44ff44");
        ctx.set_font(&format!("{}px Arial", (h * 0.05).min(30.0)));
        ctx.fill_text(
            &format!("High Score: {}", best.value),
            w * 0.5,
            center_y + spacing * 2.0,
        )?;

        // Play Again pulses with time
        let pulse = (time_secs * 2.0).sin() * 0.1 + 1.0;
        let play_w = (w * 0.4).min(300.0) * pulse;
        let play_h = (h * 0.08).min(60.0);
        let play_again = ButtonRect {
            x: w * 0.5 - play_w * 0.5,
            y: center_y + spacing * 3.0,
            w: play_w,
            h: play_h,
        };
        self.draw_button(&play_again, "#4CAF50", "Play Again", (h * 0.04).min(24.0))?;

        let small_w = (w * 0.3).min(200.0);
        let small_h = (h * 0.06).min(40.0);
        let project = ButtonRect {
            x: w * 0.5 - small_w * 0.5,
            y: center_y + spacing * 4.2,
            w: small_w,
            h: small_h,
        };
        self.draw_button(&project, "#24292e", "View Project", (h * 0.03).min(18.0))?;

        let share = ButtonRect {
            x: project.x,
            y: project.y + small_h + 20.0,
            w: small_w,
            h: small_h,
        };
        self.draw_button(&share, "#1DA1F2", "Share Score", (h * 0.03).min(18.0))?;

        ctx.restore();
        Ok(OverlayLayout {
            play_again,
            project,
            share,
        })
    }

    /// Redraw the share button with copy feedback (or back to its label)
    pub fn draw_share_feedback(&self, layout: &OverlayLayout, copied: bool) {
        let (color, label) = if copied {
            ("#28a745", "Link Copied!")
        } else {
            ("#1DA1F2", "Share Score")
        };
        let rect = layout.share;
        self.ctx.clear_rect(rect.x, rect.y, rect.w, rect.h);
        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.9)");
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
        if let Err(e) = self.draw_button(&rect, color, label, rect.h * 0.45) {
            log::warn!("share feedback draw failed: {e:?}");
        }
    }

    fn draw_button(
        &self,
        rect: &ButtonRect,
        color: &str,
        label: &str,
        font_px: f64,
    ) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_shadow_blur(10.0);
        ctx.set_shadow_color(color);
        ctx.set_fill_style_str(color);
        rounded_rect_path(ctx, rect, rect.h * 0.5)?;
        ctx.fill();

        ctx.set_shadow_blur(0.0);
        ctx.set_fill_style_str("white");
        ctx.set_text_align("center");
        ctx.set_font(&format!("{font_px}px Arial"));
        ctx.fill_text(label, rect.x + rect.w * 0.5, rect.y + rect.h * 0.65)?;
        Ok(())
    }
}

/// Trace a rounded rectangle path
fn rounded_rect_path(
    ctx: &CanvasRenderingContext2d,
    rect: &ButtonRect,
    radius: f64,
) -> Result<(), JsValue> {
    let (x, y, w, h) = (rect.x, rect.y, rect.w, rect.h);
    let r = radius.min(w * 0.5).min(h * 0.5);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r)?;
    ctx.arc_to(x + w, y + h, x, y + h, r)?;
    ctx.arc_to(x, y + h, x, y, r)?;
    ctx.arc_to(x, y, x + w, y, r)?;
    ctx.close_path();
    Ok(())
}

/// Fill one layer's jagged skyline across its pre-rendered strip
fn draw_skyline(
    ctx: &CanvasRenderingContext2d,
    layer: &BackgroundLayer,
    color: &str,
    height: f64,
) {
    ctx.set_global_alpha(layer.alpha as f64);
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    ctx.move_to(0.0, height);
    for (i, &peak) in layer.heights.iter().enumerate() {
        let x = i as f64 * SKYLINE_STEP as f64;
        ctx.line_to(x, height - peak as f64);
    }
    ctx.line_to(layer.strip_width() as f64, height);
    ctx.close_path();
    ctx.fill();
    ctx.set_global_alpha(1.0);
}
