//! Visual theming for the circuit background.
//!
//! Every fixed constant of the effect lives here: grid spacing and stroke,
//! spawn probability, particle lifetime and the random ranges particles are
//! drawn from.

use std::f64::consts::PI;
use std::ops::Range;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel
	pub r: u8,
	/// Green channel
	pub g: u8,
	/// Blue channel
	pub b: u8,
	/// Alpha, 0.0 to 1.0
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color, different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Always emits functional notation so the alpha channel is preserved.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Static wire grid style.
#[derive(Clone, Debug)]
pub struct GridStyle {
	/// Distance between neighbouring lines, in surface pixels
	pub spacing: f64,
	/// Stroke color, kept near-invisible
	pub color: Color,
	/// Stroke width
	pub line_width: f64,
}

/// Current-flow particle configuration.
#[derive(Clone, Debug)]
pub struct ParticleStyle {
	/// Probability of spawning one particle per frame (0.0..=1.0)
	pub spawn_chance: f64,
	/// Starting lifetime in frames
	pub lifetime: i32,
	/// Base color; alpha is replaced per particle
	pub color: Color,
	/// Radius range
	pub size: Range<f64>,
	/// Opacity range
	pub opacity: Range<f64>,
	/// Speed range, in pixels per frame
	pub speed: Range<f64>,
	/// Half-width of the deviation cone around the line direction, in radians
	pub deviation: f64,
	/// Shadow blur radius for the glow
	pub glow_blur: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct CircuitTheme {
	/// Preset name
	pub name: &'static str,
	/// Wire grid style
	pub grid: GridStyle,
	/// Particle behaviour and look
	pub particles: ParticleStyle,
}

impl CircuitTheme {
	/// Faint teal wires with cyan current (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			grid: GridStyle {
				spacing: 50.0,
				color: Color::rgba(0, 255, 255, 0.05),
				line_width: 0.3,
			},
			particles: ParticleStyle {
				spawn_chance: 0.5,
				lifetime: 100,
				color: Color::rgb(0, 255, 255),
				size: 1.0..3.0,
				opacity: 0.2..1.0,
				speed: 0.5..1.5,
				deviation: PI / 8.0,
				glow_blur: 10.0,
			},
		}
	}
}

impl Default for CircuitTheme {
	fn default() -> Self {
		Self::default_theme()
	}
}
