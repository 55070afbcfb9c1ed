//! Current-flow particles that travel along the wire grid.

use rand::Rng;

use super::grid::GridLine;
use super::theme::{Color, ParticleStyle};

/// A single glowing dot.
#[derive(Clone, Debug)]
pub struct Particle {
	/// Horizontal position
	pub x: f64,
	/// Vertical position
	pub y: f64,
	/// Horizontal velocity, pixels per frame
	pub vx: f64,
	/// Vertical velocity, pixels per frame
	pub vy: f64,
	/// Radius
	pub size: f64,
	/// Frames left before removal.
	pub life: i32,
	/// Fixed at creation.
	pub color: Color,
}

impl Particle {
	/// Spawn a particle on `line`.
	///
	/// The spawn point is a uniform fraction along the segment; the heading is
	/// the line direction perturbed uniformly within `style.deviation`.
	pub fn spawn<R: Rng>(line: &GridLine, style: &ParticleStyle, rng: &mut R) -> Self {
		let t = rng.gen_range(0.0..=1.0);
		let origin = line.lerp(t);

		let offset = if style.deviation > 0.0 {
			rng.gen_range(-style.deviation..=style.deviation)
		} else {
			0.0
		};
		let angle = line.angle() + offset;
		let speed = sample(rng, &style.speed);

		Self {
			x: origin.x,
			y: origin.y,
			vx: angle.cos() * speed,
			vy: angle.sin() * speed,
			size: sample(rng, &style.size),
			life: style.lifetime,
			color: style.color.with_alpha(sample(rng, &style.opacity)),
		}
	}

	/// Advance one frame.
	pub fn update(&mut self) {
		self.x += self.vx;
		self.y += self.vy;
		self.life -= 1;
	}

	/// Still has frames left.
	pub fn is_alive(&self) -> bool {
		self.life > 0
	}
}

/// `gen_range` panics on an empty range; collapse it to its start instead.
fn sample<R: Rng>(rng: &mut R, range: &std::ops::Range<f64>) -> f64 {
	if range.start < range.end {
		rng.gen_range(range.clone())
	} else {
		range.start
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::theme::CircuitTheme;
	use super::*;

	#[test]
	fn spawn_lies_on_line_within_cone() {
		let style = CircuitTheme::default().particles;
		let mut rng = SmallRng::seed_from_u64(7);
		let lines = [
			GridLine::new(0.0, 150.0, 800.0, 150.0),
			GridLine::new(250.0, 0.0, 250.0, 600.0),
			GridLine::new(10.0, 20.0, 310.0, 420.0),
		];

		for _ in 0..500 {
			for line in &lines {
				let p = Particle::spawn(line, &style, &mut rng);

				// Cross product of (end - start) and (p - start) is zero for collinear points.
				let (dx, dy) = (line.end.x - line.start.x, line.end.y - line.start.y);
				let cross = dx * (p.y - line.start.y) - dy * (p.x - line.start.x);
				assert!(cross.abs() < 1e-6, "off line: {cross}");
				assert!(p.x >= line.start.x.min(line.end.x) - 1e-9);
				assert!(p.x <= line.start.x.max(line.end.x) + 1e-9);

				let speed = p.vx.hypot(p.vy);
				assert!(speed > style.speed.start - 1e-9 && speed < style.speed.end + 1e-9);

				let mut diff = p.vy.atan2(p.vx) - line.angle();
				diff = (diff + std::f64::consts::PI).rem_euclid(std::f64::consts::TAU)
					- std::f64::consts::PI;
				assert!(diff.abs() <= style.deviation + 1e-9);

				assert!(style.size.contains(&p.size));
				assert!(style.opacity.contains(&p.color.a));
				assert_eq!(p.life, style.lifetime);
			}
		}
	}

	#[test]
	fn update_moves_and_ages() {
		let mut p = Particle {
			x: 1.0,
			y: 2.0,
			vx: 0.5,
			vy: -1.0,
			size: 1.0,
			life: 2,
			color: Color::rgb(0, 255, 255),
		};
		p.update();
		assert_eq!((p.x, p.y, p.life), (1.5, 1.0, 1));
		assert!(p.is_alive());
		p.update();
		assert!(!p.is_alive());
	}

	#[test]
	fn empty_ranges_collapse() {
		let mut style = CircuitTheme::default().particles;
		style.size = 2.0..2.0;
		style.deviation = 0.0;
		let mut rng = SmallRng::seed_from_u64(1);
		let p = Particle::spawn(&GridLine::new(0.0, 0.0, 10.0, 0.0), &style, &mut rng);
		assert_eq!(p.size, 2.0);
		assert!(p.vy.abs() < 1e-12);
	}
}
