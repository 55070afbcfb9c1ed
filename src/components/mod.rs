//! Page components.

pub mod circuit;
pub mod fragment;
pub mod typewriter;
