//! Drawing for the circuit background.
//!
//! The frame logic in [`super::state`] talks to a [`Surface`] rather than to the
//! canvas directly, so tests can record what a frame drew. [`CanvasSurface`]
//! is the browser implementation on top of `CanvasRenderingContext2d`.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::grid::GridLine;
use super::particles::Particle;
use super::theme::{GridStyle, ParticleStyle};

/// Minimal drawing surface needed by one frame.
pub trait Surface {
	/// Erase the whole `width x height` area.
	fn clear(&mut self, width: f64, height: f64);
	/// Stroke the full wire grid.
	fn draw_grid(&mut self, lines: &[GridLine], style: &GridStyle);
	/// Fill one particle as a blurred circle.
	fn draw_particle(&mut self, particle: &Particle, style: &ParticleStyle);
}

/// [`Surface`] backed by a 2D canvas context.
pub struct CanvasSurface<'a> {
	ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
	/// Draw onto `ctx`.
	pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
		Self { ctx }
	}
}

impl Surface for CanvasSurface<'_> {
	fn clear(&mut self, width: f64, height: f64) {
		self.ctx.clear_rect(0.0, 0.0, width, height);
	}

	fn draw_grid(&mut self, lines: &[GridLine], style: &GridStyle) {
		let ctx = self.ctx;
		// Glow from the previous frame's particles must not bleed into the wires.
		ctx.set_shadow_blur(0.0);
		ctx.set_stroke_style_str(&style.color.to_css());
		ctx.set_line_width(style.line_width);

		ctx.begin_path();
		for line in lines {
			ctx.move_to(line.start.x, line.start.y);
			ctx.line_to(line.end.x, line.end.y);
		}
		ctx.stroke();
	}

	fn draw_particle(&mut self, particle: &Particle, style: &ParticleStyle) {
		let ctx = self.ctx;
		let color = particle.color.to_css();

		ctx.begin_path();
		let _ = ctx.arc(particle.x, particle.y, particle.size, 0.0, PI * 2.0);
		ctx.set_fill_style_str(&color);
		ctx.set_shadow_blur(style.glow_blur);
		ctx.set_shadow_color(&color);
		ctx.fill();
	}
}
