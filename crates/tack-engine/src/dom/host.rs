use crate::coords::{Rect, Vec2};

use super::ids::{ElementId, EventTarget};

/// Geometry queries a widget may make against the embedding document.
///
/// All rects are viewport-relative and reflect the current scroll state.
/// Implementations return `None` for elements they do not know about.
pub trait Host {
    /// Visible size of the global viewport (`innerWidth` / `innerHeight`).
    fn viewport_size(&self) -> Vec2;

    /// Border box of `el` relative to the viewport's top-left corner.
    fn bounding_rect(&self, el: ElementId) -> Option<Rect>;

    /// Inner visible height of `el`, excluding borders and scrollbars.
    fn client_height(&self, el: ElementId) -> Option<f32>;

    /// First element matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<ElementId>;
}

/// The element a widget tracks scrolling against.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ScrollContainer {
    #[default]
    Viewport,
    Element(ElementId),
}

impl ScrollContainer {
    /// Listener target for this container's `scroll` events.
    #[inline]
    pub fn target(self) -> EventTarget {
        match self {
            ScrollContainer::Viewport => EventTarget::Window,
            ScrollContainer::Element(el) => EventTarget::Element(el),
        }
    }

    #[inline]
    pub fn is_viewport(self) -> bool {
        self == ScrollContainer::Viewport
    }

    /// Distance from the viewport top to the container's top edge.
    ///
    /// The viewport itself is always at 0; an element that the host no longer
    /// knows about is treated the same way.
    pub fn top(self, host: &dyn Host) -> f32 {
        match self {
            ScrollContainer::Viewport => 0.0,
            ScrollContainer::Element(el) => host.bounding_rect(el).map_or(0.0, Rect::top),
        }
    }

    /// Visible height of the container.
    pub fn visible_height(self, host: &dyn Host) -> f32 {
        match self {
            ScrollContainer::Viewport => host.viewport_size().y,
            ScrollContainer::Element(el) => host.client_height(el).unwrap_or(0.0),
        }
    }
}
