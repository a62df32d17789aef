//! Platform input translation.
//!
//! The document seam never sees winit types. Runtime code translates window
//! events into [`WindowInput`] here and applies them to its host.

mod winit;

pub use self::winit::{translate_window_event, wheel_delta_y, WindowInput};
