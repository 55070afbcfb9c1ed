//! Animated circuit-board background.
//!
//! Renders a faint wire grid on a full-viewport canvas with glowing particles
//! that spawn on random wires and drift roughly along them:
//! - Grid rebuilt from scratch on every viewport resize
//! - One particle spawned per frame with a fixed probability
//! - Particles fade out of existence after a fixed number of frames
//! - Injectable RNG and a stop handle for deterministic runs
//!
//! # Example
//!
//! ```ignore
//! use circuit_site::components::circuit::{CircuitCanvas, LoopHandle};
//!
//! let handle = LoopHandle::new();
//! view! { <CircuitCanvas seed=Some(7) handle=handle.clone() /> }
//! // later
//! handle.stop();
//! ```

mod component;
pub mod grid;
pub mod particles;
pub mod render;
mod state;
pub mod theme;

pub use component::CircuitCanvas;
pub use grid::{GridLine, build_grid};
pub use state::{CircuitState, LoopHandle};
pub use theme::CircuitTheme;
