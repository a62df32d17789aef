use std::collections::HashMap;

use crate::coords::{Rect, Vec2};

use super::host::Host;
use super::ids::{ElementId, EventKind, EventTarget, HostEvent};

#[derive(Debug, Clone)]
struct Node {
    /// Border box in document space, before any scrolling.
    layout: Rect,
    /// Nearest scrollable ancestor, if not the page itself.
    scroll_parent: Option<ElementId>,
    /// Scrollable content height; `None` for elements that do not scroll.
    content_height: Option<f32>,
    scroll_top: f32,
}

/// In-memory document: a flat set of laid-out elements plus scroll state.
///
/// Used headless by tests and by the demo runtime to stand in for a real
/// document. Layout is fixed at insertion; only scroll offsets and the
/// viewport size change afterwards. Scroll setters return the event the
/// document would fire so the caller can route it.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    nodes: HashMap<ElementId, Node>,
    selectors: HashMap<String, ElementId>,
    viewport: Vec2,
    page_height: f32,
    page_scroll: f32,
    next_id: u64,
}

impl MemoryHost {
    pub fn new(viewport: Vec2, page_height: f32) -> Self {
        Self {
            nodes: HashMap::new(),
            selectors: HashMap::new(),
            viewport,
            page_height,
            page_scroll: 0.0,
            next_id: 1,
        }
    }

    /// Inserts an element laid out at `layout` (document coordinates).
    pub fn add_element(&mut self, layout: Rect) -> ElementId {
        self.insert(layout, None)
    }

    /// Inserts an element inside the scrollable element `parent`.
    ///
    /// `layout` is in document coordinates as if `parent` were not scrolled.
    pub fn add_child(&mut self, parent: ElementId, layout: Rect) -> ElementId {
        self.insert(layout, Some(parent))
    }

    fn insert(&mut self, layout: Rect, scroll_parent: Option<ElementId>) -> ElementId {
        let id = ElementId::from_raw(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                layout,
                scroll_parent,
                content_height: None,
                scroll_top: 0.0,
            },
        );
        id
    }

    /// Makes `el` a scroll container with `content_height` of scrollable content.
    pub fn set_scrollable(&mut self, el: ElementId, content_height: f32) {
        if let Some(node) = self.nodes.get_mut(&el) {
            node.content_height = Some(content_height);
        }
    }

    /// Registers `selector` so [`Host::query_selector`] resolves it to `el`.
    pub fn set_selector(&mut self, selector: impl Into<String>, el: ElementId) {
        self.selectors.insert(selector.into(), el);
    }

    /// Replaces the document-space layout of `el`.
    pub fn set_layout(&mut self, el: ElementId, layout: Rect) {
        if let Some(node) = self.nodes.get_mut(&el) {
            node.layout = layout;
        }
    }

    pub fn remove_element(&mut self, el: ElementId) {
        self.nodes.remove(&el);
        self.selectors.retain(|_, id| *id != el);
    }

    pub fn set_viewport_size(&mut self, size: Vec2) -> HostEvent {
        self.viewport = size;
        self.page_scroll = self.page_scroll.clamp(0.0, self.max_page_scroll());
        HostEvent::window_resize()
    }

    #[inline]
    pub fn page_scroll(&self) -> f32 {
        self.page_scroll
    }

    fn max_page_scroll(&self) -> f32 {
        (self.page_height - self.viewport.y).max(0.0)
    }

    pub fn scroll_window_to(&mut self, y: f32) -> HostEvent {
        self.page_scroll = y.clamp(0.0, self.max_page_scroll());
        HostEvent::window_scroll()
    }

    /// Positive `dy` scrolls down.
    pub fn scroll_window_by(&mut self, dy: f32) -> HostEvent {
        self.scroll_window_to(self.page_scroll + dy)
    }

    /// Scrolls a scrollable element. Returns `None` if `el` is unknown or
    /// does not scroll.
    pub fn scroll_element_to(&mut self, el: ElementId, y: f32) -> Option<HostEvent> {
        let node = self.nodes.get_mut(&el)?;
        let content = node.content_height?;
        let max = (content - node.layout.height()).max(0.0);
        node.scroll_top = y.clamp(0.0, max);
        Some(HostEvent::new(EventTarget::Element(el), EventKind::Scroll))
    }

    pub fn scroll_element_by(&mut self, el: ElementId, dy: f32) -> Option<HostEvent> {
        let current = self.nodes.get(&el)?.scroll_top;
        self.scroll_element_to(el, current + dy)
    }

    pub fn scroll_top(&self, el: ElementId) -> Option<f32> {
        self.nodes.get(&el).map(|n| n.scroll_top)
    }

    /// Sum of scroll offsets of every scrollable ancestor of `el`.
    fn ancestor_scroll(&self, el: ElementId) -> f32 {
        let mut total = 0.0;
        let mut parent = self.nodes.get(&el).and_then(|n| n.scroll_parent);
        // Bounded by node count so a malformed parent cycle cannot spin.
        for _ in 0..self.nodes.len() {
            let Some(p) = parent else { break };
            let Some(node) = self.nodes.get(&p) else { break };
            total += node.scroll_top;
            parent = node.scroll_parent;
        }
        total
    }
}

impl Host for MemoryHost {
    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn bounding_rect(&self, el: ElementId) -> Option<Rect> {
        let node = self.nodes.get(&el)?;
        let scrolled = Vec2::vertical(self.page_scroll + self.ancestor_scroll(el));
        Some(node.layout.translated(-scrolled))
    }

    fn client_height(&self, el: ElementId) -> Option<f32> {
        self.nodes.get(&el).map(|n| n.layout.height())
    }

    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        self.selectors
            .get(selector)
            .copied()
            .filter(|el| self.nodes.contains_key(el))
    }
}
