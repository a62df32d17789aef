//! Tack engine crate.
//!
//! This crate owns the host-facing pieces used by the widget layer: geometry,
//! the document seam, animation-frame scheduling, logging and the window loop.

pub mod dom;
pub mod platform;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
