//! Typewriter-style text reveal for the projects section.
//!
//! [`Typewriter`] is a timer-free state machine: each call to
//! [`Typewriter::step`] produces one [`Beat`] and the caller waits
//! [`Beat::delay`] before the next. [`TypewriterText`] drives it with browser
//! timeouts and renders the text so far.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use web_sys::{ScrollBehavior, ScrollToOptions};

/// Timer settings for a reveal sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
	/// Gap between characters
	pub typing: Duration,
	/// Gap between the end of one phrase and the start of the next
	pub pause: Duration,
}

impl Default for Timing {
	fn default() -> Self {
		Self {
			typing: Duration::from_millis(50),
			pause: Duration::from_millis(1500),
		}
	}
}

/// Outcome of a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Beat {
	/// A phrase began; every phrase after the first starts on a new line.
	Opened,
	/// One character was appended.
	Typed,
	/// The phrase's last character was appended.
	PhraseComplete,
	/// Nothing left to reveal.
	Finished,
}

impl Beat {
	/// How long to wait before the next step, or `None` to stop.
	pub fn delay(self, timing: &Timing) -> Option<Duration> {
		match self {
			Beat::Opened | Beat::Typed => Some(timing.typing),
			Beat::PhraseComplete => Some(timing.pause),
			Beat::Finished => None,
		}
	}
}

/// Reveals an ordered list of phrases one character at a time.
#[derive(Clone, Debug)]
pub struct Typewriter {
	phrases: Vec<Vec<char>>,
	phrase: usize,
	cursor: usize,
	opened: bool,
	text: String,
}

impl Typewriter {
	/// Typewriter over `phrases`, nothing revealed yet.
	pub fn new<I, S>(phrases: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self {
			phrases: phrases
				.into_iter()
				.map(|p| p.as_ref().chars().collect())
				.collect(),
			phrase: 0,
			cursor: 0,
			opened: false,
			text: String::new(),
		}
	}

	/// Text revealed so far.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Every phrase has been revealed.
	pub fn is_finished(&self) -> bool {
		self.phrase >= self.phrases.len()
	}

	/// Clear any revealed text and start again from the first phrase.
	pub fn restart(&mut self) {
		self.phrase = 0;
		self.cursor = 0;
		self.opened = false;
		self.text.clear();
	}

	/// Advance by one beat.
	pub fn step(&mut self) -> Beat {
		let Some(current) = self.phrases.get(self.phrase) else {
			return Beat::Finished;
		};

		if !self.opened {
			self.opened = true;
			if self.phrase > 0 {
				self.text.push('\n');
			}
			return Beat::Opened;
		}

		if let Some(&ch) = current.get(self.cursor) {
			self.text.push(ch);
			self.cursor += 1;
		}
		if self.cursor < current.len() {
			return Beat::Typed;
		}

		self.phrase += 1;
		self.cursor = 0;
		self.opened = false;
		Beat::PhraseComplete
	}
}

/// True when the reader is within `tolerance` pixels of the bottom.
pub fn is_near_bottom(scroll_height: f64, scroll_top: f64, client_height: f64, tolerance: f64) -> bool {
	scroll_height - scroll_top - client_height < tolerance
}

/// Smooth-scroll to the bottom, but only if the reader has not scrolled away.
fn scroll_to_bottom_if_near_end(tolerance: f64) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let Some(root) = window.document().and_then(|d| d.document_element()) else {
		return;
	};
	let scroll_height = root.scroll_height() as f64;
	if is_near_bottom(
		scroll_height,
		root.scroll_top() as f64,
		root.client_height() as f64,
		tolerance,
	) {
		let options = ScrollToOptions::new();
		options.set_top(scroll_height);
		options.set_behavior(ScrollBehavior::Smooth);
		window.scroll_to_with_scroll_to_options(&options);
	}
}

fn drive(
	machine: Rc<RefCell<Typewriter>>,
	text: RwSignal<String>,
	finished: RwSignal<bool>,
	timing: Timing,
	tolerance: f64,
) {
	let beat = machine.borrow_mut().step();
	text.set(machine.borrow().text().to_string());

	if beat == Beat::PhraseComplete {
		scroll_to_bottom_if_near_end(tolerance);
	}
	match beat.delay(&timing) {
		Some(delay) => set_timeout(
			move || drive(machine, text, finished, timing, tolerance),
			delay,
		),
		None => finished.set(true),
	}
}

/// Types out `phrases` in order, one character every `typing_ms`, pausing
/// `pause_ms` between phrases. The blinking cursor is removed once done.
#[component]
pub fn TypewriterText(
	/// Phrases in reveal order.
	phrases: Vec<String>,
	/// Milliseconds between characters.
	#[prop(default = 50)]
	typing_ms: u64,
	/// Milliseconds between phrases.
	#[prop(default = 1500)]
	pause_ms: u64,
	/// Auto-scroll threshold in pixels from the bottom.
	#[prop(default = 100.0)]
	scroll_tolerance: f64,
) -> impl IntoView {
	let text = RwSignal::new(String::new());
	let finished = RwSignal::new(false);
	let timing = Timing {
		typing: Duration::from_millis(typing_ms),
		pause: Duration::from_millis(pause_ms),
	};
	let machine = Rc::new(RefCell::new(Typewriter::new(phrases)));

	Effect::new(move |_| {
		machine.borrow_mut().restart();
		drive(machine.clone(), text, finished, timing, scroll_tolerance);
	});

	view! {
		<div
			id="dynamic-text-display"
			class="typewriter"
			class:typing=move || !finished.get()
			style="white-space: pre-wrap;"
		>
			{move || text.get()}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn run(machine: &mut Typewriter) -> Vec<Beat> {
		let mut beats = Vec::new();
		loop {
			let beat = machine.step();
			beats.push(beat);
			if beat == Beat::Finished {
				return beats;
			}
		}
	}

	#[test]
	fn reveals_phrases_in_order() {
		let mut tw = Typewriter::new(["ab", "c"]);
		assert_eq!(
			run(&mut tw),
			vec![
				Beat::Opened,
				Beat::Typed,
				Beat::PhraseComplete,
				Beat::Opened,
				Beat::PhraseComplete,
				Beat::Finished,
			]
		);
		assert_eq!(tw.text(), "ab\nc");
		assert!(tw.is_finished());
	}

	#[test]
	fn text_grows_one_char_per_step() {
		let mut tw = Typewriter::new(["héllo"]);
		tw.step();
		let mut lens = Vec::new();
		while !tw.is_finished() {
			tw.step();
			lens.push(tw.text().chars().count());
		}
		assert_eq!(lens, vec![1, 2, 3, 4, 5]);
	}

	#[test]
	fn newline_appears_when_next_phrase_opens() {
		let mut tw = Typewriter::new(["a", "b"]);
		tw.step();
		tw.step();
		assert_eq!(tw.text(), "a");
		assert_eq!(tw.step(), Beat::Opened);
		assert_eq!(tw.text(), "a\n");
	}

	#[test]
	fn empty_inputs() {
		let mut none = Typewriter::new(Vec::<String>::new());
		assert_eq!(none.step(), Beat::Finished);

		let mut blank = Typewriter::new(["", "x"]);
		assert_eq!(run(&mut blank).len(), 5);
		assert_eq!(blank.text(), "\nx");
	}

	#[test]
	fn restart_clears_text() {
		let mut tw = Typewriter::new(["ab"]);
		run(&mut tw);
		tw.restart();
		assert_eq!(tw.text(), "");
		assert!(!tw.is_finished());
	}

	#[test]
	fn total_duration_matches_schedule() {
		let timing = Timing::default();
		let mut tw = Typewriter::new(["ab", "c"]);
		let total: Duration = run(&mut tw)
			.into_iter()
			.filter_map(|b| b.delay(&timing))
			.sum();
		// 50 + 50 + 1500 + 50 + 1500
		assert_eq!(total, Duration::from_millis(3150));
	}

	#[test]
	fn near_bottom_tolerance() {
		assert!(is_near_bottom(2000.0, 1150.0, 800.0, 100.0));
		assert!(!is_near_bottom(2000.0, 1100.0, 800.0, 100.0));
		assert!(!is_near_bottom(2000.0, 0.0, 800.0, 100.0));
	}
}
