//! Leptos component wrapping the circuit background canvas.
//!
//! The canvas fills the viewport and follows window resizes. An animation loop
//! runs via `requestAnimationFrame`, advancing [`CircuitState`] once per display
//! refresh while its [`LoopHandle`] is running. Resuming a stopped handle
//! requests a fresh frame through the restart hook registered here.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::render::CanvasSurface;
use super::state::{CircuitState, LoopHandle};
use super::theme::CircuitTheme;

/// Current viewport size in CSS pixels.
fn viewport(window: &Window) -> Option<(f64, f64)> {
	let w = window.inner_width().ok()?.as_f64()?;
	let h = window.inner_height().ok()?.as_f64()?;
	Some((w, h))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Seed from config when given, otherwise from the browser's `Math.random`.
fn make_rng(seed: Option<u64>) -> SmallRng {
	let seed = seed.unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
	SmallRng::seed_from_u64(seed)
}

/// Ask for `cb` before the next paint and record the pending frame.
fn request_frame(cb: &Closure<dyn FnMut()>, handle: &LoopHandle) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if window
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.is_ok()
	{
		handle.frame_requested();
	}
}

/// Renders the animated circuit board behind the page content.
///
/// The canvas is fixed to the viewport. Pass `seed` for a reproducible
/// particle sequence and `handle` to stop and resume the loop from outside.
#[component]
pub fn CircuitCanvas(
	/// Fixed RNG seed; random when `None`.
	#[prop(default = None)]
	seed: Option<u64>,
	/// Visual constants; [`CircuitTheme::default`] when omitted.
	#[prop(optional)]
	theme: Option<CircuitTheme>,
	/// External start/stop control for the frame loop.
	#[prop(optional)]
	handle: Option<LoopHandle>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CircuitState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let handle = handle.unwrap_or_default();
	let theme = theme.unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("circuit: 2d context unavailable, background disabled");
			return;
		};

		let (w, h) = viewport(&window).unwrap_or((800.0, 600.0));
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let circuit = CircuitState::new(w, h, theme.clone(), make_rng(seed));
		info!(
			"circuit: {}x{} surface, {} grid lines",
			w,
			h,
			circuit.lines().len()
		);
		*state.borrow_mut() = Some(circuit);

		let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport) else {
				return;
			};
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *state_resize.borrow_mut() {
				c.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, handle_anim) =
			(state.clone(), animate.clone(), handle.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			handle_anim.frame_started();
			if !handle_anim.is_running() {
				return;
			}
			if let Some(ref mut c) = *state_anim.borrow_mut() {
				c.frame(&mut CanvasSurface::new(&ctx));
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				request_frame(cb, &handle_anim);
			}
		}));

		let animate_restart = animate.clone();
		handle.set_restart(move || {
			if let Some(ref cb) = *animate_restart.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		});

		if let Some(ref cb) = *animate.borrow() {
			request_frame(cb, &handle);
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id="circuitCanvas"
			class="circuit-canvas"
			style="position: fixed; inset: 0; z-index: -1; display: block; pointer-events: none;"
		/>
	}
}
