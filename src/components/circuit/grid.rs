//! Static wire grid that tiles the drawing surface.
//!
//! Lines sit at `0, S, 2S, ...` strictly below the surface dimension, so a
//! `W x H` surface yields `ceil(H / S)` horizontal and `ceil(W / S)` vertical
//! lines. A line never lands on the far edge.

/// A point in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
	/// Horizontal offset from the left edge
	pub x: f64,
	/// Vertical offset from the top edge
	pub y: f64,
}

/// An immutable wire segment. Doubles as a spawn path for particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
	/// First endpoint
	pub start: Point,
	/// Second endpoint
	pub end: Point,
}

impl GridLine {
	/// Segment from `(x1, y1)` to `(x2, y2)`.
	pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
		Self {
			start: Point { x: x1, y: y1 },
			end: Point { x: x2, y: y2 },
		}
	}

	/// Point at fraction `t` along the segment (`0.0` = start, `1.0` = end).
	pub fn lerp(&self, t: f64) -> Point {
		Point {
			x: self.start.x + t * (self.end.x - self.start.x),
			y: self.start.y + t * (self.end.y - self.start.y),
		}
	}

	/// Direction of travel from start to end, in radians.
	pub fn angle(&self) -> f64 {
		(self.end.y - self.start.y).atan2(self.end.x - self.start.x)
	}
}

/// Build the full line set for a `width x height` surface.
///
/// Horizontal lines come first, then vertical lines. A non-positive spacing
/// yields no lines rather than looping forever.
pub fn build_grid(width: f64, height: f64, spacing: f64) -> Vec<GridLine> {
	if spacing <= 0.0 || width <= 0.0 || height <= 0.0 {
		return Vec::new();
	}

	let horizontal = offsets(height, spacing).map(|y| GridLine::new(0.0, y, width, y));
	let vertical = offsets(width, spacing).map(|x| GridLine::new(x, 0.0, x, height));

	horizontal.chain(vertical).collect()
}

fn offsets(extent: f64, spacing: f64) -> impl Iterator<Item = f64> {
	// Multiply rather than accumulate so the offsets stay exact.
	(0..)
		.map(move |i| i as f64 * spacing)
		.take_while(move |&v| v < extent)
}
