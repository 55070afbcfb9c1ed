//! Background renderer state.
//!
//! Owns the wire grid, the active particles and the random source. Created once
//! when the component mounts, then mutated by the frame callback and the resize
//! handler, both on the browser's single thread.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::Rng;
use rand::rngs::SmallRng;

use super::grid::{GridLine, build_grid};
use super::particles::Particle;
use super::render::Surface;
use super::theme::CircuitTheme;

/// Start/stop control shared between the owner and the frame loop.
///
/// Clones observe the same state. A stopped loop finishes the frame in
/// progress and does not request another. Resuming restarts the loop through
/// the hook registered by the loop owner, unless a frame is still pending.
#[derive(Clone)]
pub struct LoopHandle {
	running: Rc<Cell<bool>>,
	pending: Rc<Cell<bool>>,
	restart: Rc<RefCell<Option<Box<dyn Fn()>>>>,
}

impl LoopHandle {
	/// New handle in the running state, with no restart hook.
	pub fn new() -> Self {
		Self {
			running: Rc::new(Cell::new(true)),
			pending: Rc::new(Cell::new(false)),
			restart: Rc::new(RefCell::new(None)),
		}
	}

	/// Stop after the current frame.
	pub fn stop(&self) {
		self.running.set(false);
	}

	/// Mark running again and restart a dead loop.
	///
	/// No-op when already running. When a frame is still pending the loop
	/// picks the flag up there, so no second frame chain is started.
	pub fn resume(&self) {
		if self.running.replace(true) || self.pending.get() {
			return;
		}
		if let Some(restart) = self.restart.borrow().as_ref() {
			restart();
			self.pending.set(true);
		}
	}

	/// Whether frames should keep running.
	pub fn is_running(&self) -> bool {
		self.running.get()
	}

	/// Register how to request the first frame of a restarted loop.
	pub fn set_restart(&self, restart: impl Fn() + 'static) {
		*self.restart.borrow_mut() = Some(Box::new(restart));
	}

	/// Record that a frame has been requested from the scheduler.
	pub fn frame_requested(&self) {
		self.pending.set(true);
	}

	/// Record that the requested frame has fired.
	pub fn frame_started(&self) {
		self.pending.set(false);
	}
}

impl Default for LoopHandle {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for LoopHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LoopHandle")
			.field("running", &self.running.get())
			.field("pending", &self.pending.get())
			.finish_non_exhaustive()
	}
}

/// Core renderer: surface size, grid, particles and RNG.
pub struct CircuitState<R = SmallRng> {
	/// Surface width in pixels
	pub width: f64,
	/// Surface height in pixels
	pub height: f64,
	/// Constants for grid and particles
	pub theme: CircuitTheme,
	lines: Vec<GridLine>,
	particles: Vec<Particle>,
	rng: R,
	frame: u64,
}

impl<R: Rng> CircuitState<R> {
	/// Renderer for a `width x height` surface with its grid already built.
	pub fn new(width: f64, height: f64, theme: CircuitTheme, rng: R) -> Self {
		let lines = build_grid(width, height, theme.grid.spacing);
		Self {
			width,
			height,
			theme,
			lines,
			particles: Vec::new(),
			rng,
			frame: 0,
		}
	}

	/// Current grid.
	pub fn lines(&self) -> &[GridLine] {
		&self.lines
	}

	/// Active particles, oldest first.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Number of frames processed so far.
	pub fn frame_count(&self) -> u64 {
		self.frame
	}

	/// Adopt new surface dimensions and replace the whole grid.
	///
	/// Particles are left where they are, even if now out of bounds.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.lines = build_grid(width, height, self.theme.grid.spacing);
	}

	/// Run one full frame: clear, grid, maybe spawn, then update, draw and reap.
	pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
		surface.clear(self.width, self.height);
		surface.draw_grid(&self.lines, &self.theme.grid);

		self.maybe_spawn();

		let style = &self.theme.particles;
		self.particles.retain_mut(|p| {
			p.update();
			surface.draw_particle(p, style);
			p.is_alive()
		});

		self.frame += 1;
	}

	/// Run up to `frames` frames, stopping early once `handle` is stopped.
	/// Returns how many frames actually ran.
	pub fn run_frames<S: Surface + ?Sized>(
		&mut self,
		frames: usize,
		surface: &mut S,
		handle: &LoopHandle,
	) -> usize {
		let mut ran = 0;
		while ran < frames && handle.is_running() {
			self.frame(surface);
			ran += 1;
		}
		ran
	}

	fn maybe_spawn(&mut self) {
		if self.lines.is_empty() {
			return;
		}
		let chance = self.theme.particles.spawn_chance;
		let chance = if chance.is_finite() {
			chance.clamp(0.0, 1.0)
		} else {
			0.0
		};
		if !self.rng.gen_bool(chance) {
			return;
		}
		let idx = self.rng.gen_range(0..self.lines.len());
		let particle = Particle::spawn(&self.lines[idx], &self.theme.particles, &mut self.rng);
		self.particles.push(particle);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::super::render::testing::{Op, Recorder};
	use super::*;

	fn state(width: f64, height: f64, theme: CircuitTheme) -> CircuitState {
		CircuitState::new(width, height, theme, SmallRng::seed_from_u64(42))
	}

	fn always_spawn(lifetime: i32) -> CircuitTheme {
		let mut theme = CircuitTheme::default();
		theme.particles.spawn_chance = 1.0;
		theme.particles.lifetime = lifetime;
		theme
	}

	#[test]
	fn init_builds_grid() {
		let s = state(800.0, 600.0, CircuitTheme::default());
		assert_eq!(s.lines().len(), 28);
		assert!(s.particles().is_empty());
	}

	#[test]
	fn frame_draw_order() {
		let mut s = state(800.0, 600.0, always_spawn(100));
		let mut rec = Recorder::default();
		s.frame(&mut rec);
		assert_eq!(
			rec.ops[..2],
			[
				Op::Clear {
					width: 800.0,
					height: 600.0
				},
				Op::Grid { lines: 28 }
			]
		);
		assert_eq!(rec.particles_drawn(), 1);
		assert_eq!(s.frame_count(), 1);
	}

	#[test]
	fn lifetime_counts_down_and_reaps() {
		let mut theme = always_spawn(3);
		let mut s = state(800.0, 600.0, theme.clone());
		s.frame(&mut Recorder::default());
		theme.particles.spawn_chance = 0.0;
		s.theme = theme;

		let first = s.particles()[0].clone();
		assert_eq!(first.life, 2);

		let mut rec = Recorder::default();
		s.frame(&mut rec);
		assert_eq!(s.particles()[0].life, 1);

		// Drawn on the frame its lifetime hits zero, then gone.
		let mut rec_last = Recorder::default();
		s.frame(&mut rec_last);
		let last = rec_last.ops.iter().find_map(|op| match op {
			Op::Particle { x, y, life } => Some((*x, *y, *life)),
			_ => None,
		});
		let (x, y, life) = last.expect("particle drawn on its final frame");
		assert_eq!(life, 0);
		assert!((x - (first.x + first.vx * 2.0)).abs() < 1e-9);
		assert!((y - (first.y + first.vy * 2.0)).abs() < 1e-9);
		assert!(s.particles().is_empty());

		let mut rec_after = Recorder::default();
		s.frame(&mut rec_after);
		assert_eq!(rec_after.particles_drawn(), 0);
		assert_eq!(rec.particles_drawn(), 1);
	}

	#[test]
	fn reaping_keeps_every_survivor() {
		let mut s = state(800.0, 600.0, always_spawn(5));
		for _ in 0..3 {
			s.frame(&mut Recorder::default());
		}
		// Lives 2, 3, 4 from oldest to newest.
		let lives: Vec<_> = s.particles().iter().map(|p| p.life).collect();
		assert_eq!(lives, vec![2, 3, 4]);

		let mut rec = Recorder::default();
		s.frame(&mut rec);
		assert_eq!(rec.particles_drawn(), 4);
		let lives: Vec<_> = s.particles().iter().map(|p| p.life).collect();
		assert_eq!(lives, vec![1, 2, 3, 4]);
	}

	#[test]
	fn steady_state_population() {
		let mut s = state(800.0, 600.0, always_spawn(100));
		let handle = LoopHandle::new();
		assert_eq!(s.run_frames(999, &mut Recorder::default(), &handle), 999);

		let mut rec = Recorder::default();
		s.run_frames(1, &mut rec, &handle);
		assert_eq!(rec.particles_drawn(), 100);
		assert_eq!(s.particles().len(), 99);
	}

	#[test]
	fn no_spawn_without_lines() {
		let mut s = state(0.0, 0.0, always_spawn(100));
		s.frame(&mut Recorder::default());
		assert!(s.particles().is_empty());
	}

	#[test]
	fn spawn_chance_is_respected() {
		let mut theme = CircuitTheme::default();
		theme.particles.lifetime = i32::MAX;
		let mut s = state(800.0, 600.0, theme);
		s.run_frames(2000, &mut Recorder::default(), &LoopHandle::new());
		let spawned = s.particles().len();
		assert!((800..1200).contains(&spawned), "spawned {spawned}");
	}

	#[test]
	fn resize_rebuilds_and_is_idempotent() {
		let mut s = state(800.0, 600.0, always_spawn(100));
		s.frame(&mut Recorder::default());

		s.resize(400.0, 300.0);
		let once = s.lines().to_vec();
		s.resize(400.0, 300.0);
		assert_eq!(s.lines(), once.as_slice());
		assert_eq!(once.len(), 6 + 8);
		assert!(once.iter().all(|l| l.end.x <= 400.0 && l.end.y <= 300.0));
		assert_eq!(s.particles().len(), 1);
		assert_eq!((s.width, s.height), (400.0, 300.0));
	}

	#[test]
	fn stopped_handle_halts_loop() {
		let mut s = state(800.0, 600.0, CircuitTheme::default());
		let handle = LoopHandle::new();
		let remote = handle.clone();
		remote.stop();
		assert_eq!(s.run_frames(10, &mut Recorder::default(), &handle), 0);
		handle.resume();
		assert_eq!(s.run_frames(10, &mut Recorder::default(), &remote), 10);
	}

	#[test]
	fn non_finite_spawn_chance_never_spawns() {
		for chance in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
			let mut theme = CircuitTheme::default();
			theme.particles.spawn_chance = chance;
			let mut s = state(800.0, 600.0, theme);
			s.run_frames(50, &mut Recorder::default(), &LoopHandle::new());
			assert!(s.particles().is_empty());
		}
	}

	#[test]
	fn resume_restarts_a_dead_loop() {
		let restarts = Rc::new(Cell::new(0));
		let handle = LoopHandle::new();
		let counter = restarts.clone();
		handle.set_restart(move || counter.set(counter.get() + 1));

		// Running already: nothing to restart.
		handle.resume();
		assert_eq!(restarts.get(), 0);

		// Loop saw the stop and requested nothing further.
		handle.frame_requested();
		handle.stop();
		handle.frame_started();
		handle.resume();
		assert_eq!(restarts.get(), 1);
		assert!(handle.is_running());

		// Repeated resume does not start a second chain.
		handle.resume();
		assert_eq!(restarts.get(), 1);
	}

	#[test]
	fn resume_before_pending_frame_fires_reuses_it() {
		let restarts = Rc::new(Cell::new(0));
		let handle = LoopHandle::new();
		let counter = restarts.clone();
		handle.set_restart(move || counter.set(counter.get() + 1));

		handle.frame_requested();
		handle.stop();
		handle.resume();
		assert_eq!(restarts.get(), 0);
		assert!(handle.is_running());

		// Restart after the pending frame fired while stopped.
		handle.stop();
		handle.frame_started();
		handle.clone().resume();
		assert_eq!(restarts.get(), 1);
	}

	#[test]
	fn same_seed_same_frames() {
		let run = || {
			let mut s = state(800.0, 600.0, CircuitTheme::default());
			let mut rec = Recorder::default();
			s.run_frames(50, &mut rec, &LoopHandle::new());
			rec.ops
		};
		assert_eq!(run(), run());
	}
}
