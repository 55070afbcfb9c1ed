//! HTML fragment loading.
//!
//! Fetches a snippet such as `navbar.html` and injects it into a placeholder
//! element. On failure the placeholder is left as it was.

use log::info;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, Response, Window};

/// Why a fragment could not be retrieved.
#[derive(Debug, Error, PartialEq)]
pub enum FragmentError {
	/// Not running in a browser window.
	#[error("no window available")]
	NoWindow,
	/// Server answered outside the 2xx range.
	#[error("HTTP error! status: {status}")]
	Http {
		/// Response status code.
		status: u16,
	},
	/// Fetch rejected or body unreadable.
	#[error("{0}")]
	Js(String),
}

impl From<wasm_bindgen::JsValue> for FragmentError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		Self::Js(format!("{value:?}"))
	}
}

/// Map a response status to a result, mirroring `Response.ok`.
pub fn check_status(status: u16) -> Result<(), FragmentError> {
	if (200..300).contains(&status) {
		Ok(())
	} else {
		Err(FragmentError::Http { status })
	}
}

/// Element whose contents a fragment replaces.
pub trait Placeholder {
	/// Replace everything inside the element with `html`.
	fn replace_contents(&self, html: &str);
}

impl Placeholder for Element {
	fn replace_contents(&self, html: &str) {
		self.set_inner_html(html);
	}
}

/// Write a retrieved fragment into `placeholder`.
///
/// The placeholder is only touched when retrieval succeeded. Returns whether
/// anything was written; a missing placeholder is not an error.
pub fn inject<P: Placeholder + ?Sized>(
	placeholder: Option<&P>,
	fetched: Result<String, FragmentError>,
) -> Result<bool, FragmentError> {
	let html = fetched?;
	match placeholder {
		Some(target) => {
			target.replace_contents(&html);
			Ok(true)
		}
		None => Ok(false),
	}
}

async fn fetch_text(window: &Window, url: &str) -> Result<String, FragmentError> {
	let response: Response = JsFuture::from(window.fetch_with_str(url))
		.await?
		.dyn_into()?;
	check_status(response.status())?;

	Ok(JsFuture::from(response.text()?)
		.await?
		.as_string()
		.unwrap_or_default())
}

/// Fetch `url` and replace the contents of the element with id `placeholder_id`.
///
/// On any retrieval failure the placeholder keeps its previous contents.
pub async fn load_component(url: &str, placeholder_id: &str) -> Result<(), FragmentError> {
	let window = web_sys::window().ok_or(FragmentError::NoWindow)?;
	let fetched = fetch_text(&window, url).await;

	let placeholder = window
		.document()
		.and_then(|doc| doc.get_element_by_id(placeholder_id));
	if inject(placeholder.as_ref(), fetched)? {
		info!("fragment: loaded {} into #{}", url, placeholder_id);
	}
	Ok(())
}

/// Spawn [`load_component`] on the browser event loop, logging any failure.
pub fn spawn_load(url: String, placeholder_id: String) {
	wasm_bindgen_futures::spawn_local(async move {
		if let Err(e) = load_component(&url, &placeholder_id).await {
			log::error!("Error loading component: {}", e);
		}
	});
}
