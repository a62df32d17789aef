//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window and feeds translated input and frame
//! ticks to a [`WindowApp`].

mod runtime;

pub use runtime::{AppControl, Runtime, RuntimeConfig, WindowApp};
pub use winit::dpi::LogicalSize;
