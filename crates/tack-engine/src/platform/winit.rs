use winit::dpi::PhysicalSize;
use winit::event::{MouseScrollDelta, WindowEvent};

use crate::coords::Vec2;

/// Window-level input relevant to scroll tracking, in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WindowInput {
    /// New inner size of the window.
    Resized { size: Vec2 },
    /// Vertical wheel movement. Positive scrolls the page down.
    Wheel { dy: f32 },
    CloseRequested,
}

/// Translates a winit `WindowEvent` into a [`WindowInput`].
///
/// Returns `None` for events the document seam does not care about.
pub fn translate_window_event(
    event: &WindowEvent,
    scale_factor: f64,
    line_height: f32,
) -> Option<WindowInput> {
    match event {
        WindowEvent::Resized(size) => Some(WindowInput::Resized {
            size: to_logical_size(*size, scale_factor),
        }),

        WindowEvent::MouseWheel { delta, .. } => {
            let dy = wheel_delta_y(delta, scale_factor, line_height);
            (dy != 0.0).then_some(WindowInput::Wheel { dy })
        }

        WindowEvent::CloseRequested => Some(WindowInput::CloseRequested),

        _ => None,
    }
}

/// Converts a wheel delta to logical pixels, positive meaning "scroll down".
///
/// winit reports wheel-up as positive, the opposite of document scrolling.
pub fn wheel_delta_y(delta: &MouseScrollDelta, scale_factor: f64, line_height: f32) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * line_height,
        MouseScrollDelta::PixelDelta(p) => {
            let logical = p.to_logical::<f64>(scale_factor);
            -(logical.y as f32)
        }
    }
}

fn to_logical_size(size: PhysicalSize<u32>, scale_factor: f64) -> Vec2 {
    let logical = size.to_logical::<f64>(scale_factor);
    Vec2::new(logical.width as f32, logical.height as f32)
}
