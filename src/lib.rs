//! circuit-site: personal website front end.
//!
//! This crate renders the site shell as a WASM app: a navigation bar loaded
//! from an HTML fragment, an animated circuit-board background, and a
//! typewriter reveal for the projects section.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;
pub mod config;

pub use components::circuit::{CircuitCanvas, CircuitState, CircuitTheme, LoopHandle};
pub use components::fragment::{FragmentError, load_component};
pub use components::typewriter::{Typewriter, TypewriterText};
pub use config::{SiteConfig, load_site_config};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("circuit-site: logging initialized");
}

/// Main application component.
/// Reads page config from the DOM, then lays out the background, the
/// navigation placeholder and the projects section.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_site_config();
	let (navbar_url, navbar_id) = (config.navbar_url.clone(), config.navbar_placeholder.clone());

	// Placeholder is in the DOM once the effect runs.
	Effect::new(move |_| {
		components::fragment::spawn_load(navbar_url.clone(), navbar_id.clone());
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Projects" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<CircuitCanvas seed=config.seed />
		<div id=config.navbar_placeholder.clone()></div>
		<main class="projects">
			<TypewriterText
				phrases=config.phrases.clone()
				typing_ms=config.typing_interval_ms
				pause_ms=config.phrase_pause_ms
				scroll_tolerance=config.scroll_tolerance
			/>
		</main>
	}
}
