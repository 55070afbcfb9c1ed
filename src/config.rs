//! Page configuration.
//!
//! Read from a `<script id="site-config" type="application/json">` element.
//! Every field has a default, so the element and any of its keys may be
//! omitted.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Element id holding the JSON configuration.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Site-wide settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
	/// Fragment injected as the navigation bar.
	pub navbar_url: String,
	/// Id of the element the navigation bar replaces the contents of.
	pub navbar_placeholder: String,
	/// Phrases typed out in the projects section, in order.
	pub phrases: Vec<String>,
	/// Delay between characters.
	pub typing_interval_ms: u64,
	/// Delay between one phrase finishing and the next starting.
	pub phrase_pause_ms: u64,
	/// Auto-scroll only when within this many pixels of the bottom.
	pub scroll_tolerance: f64,
	/// Fixed seed for the background particles; random when unset.
	pub seed: Option<u64>,
}

impl Default for SiteConfig {
	fn default() -> Self {
		Self {
			navbar_url: "navbar.html".into(),
			navbar_placeholder: "navbar-placeholder".into(),
			phrases: vec![
				"**Preparing for response**\n".into(),
				"Wait a second...\n".into(),
				"Error:\nNo projects available yet.".into(),
			],
			typing_interval_ms: 50,
			phrase_pause_ms: 1500,
			scroll_tolerance: 100.0,
			seed: None,
		}
	}
}

impl SiteConfig {
	/// Parse a JSON document, falling back to defaults on malformed input.
	pub fn from_json(json_text: &str) -> Self {
		match serde_json::from_str::<SiteConfig>(json_text) {
			Ok(config) => {
				info!(
					"site: config loaded ({} phrases, navbar from {})",
					config.phrases.len(),
					config.navbar_url
				);
				config
			}
			Err(e) => {
				warn!("site: failed to parse config: {}", e);
				Self::default()
			}
		}
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load the configuration from the DOM, or defaults when absent.
pub fn load_site_config() -> SiteConfig {
	config_text()
		.map(|text| SiteConfig::from_json(&text))
		.unwrap_or_default()
}
