//! Affix: pins its content at a fixed offset once the scroll container has
//! carried it past a top or bottom threshold, and releases it on the way back.
//!
//! # How it runs
//!
//! 1. **mount** resolves the scroll container, measures the container height
//!    and schedules a first calculation. It subscribes to `scroll` on the
//!    container, `resize` on the window and, for element containers, `scroll`
//!    on the window too (page scrolling moves the container).
//! 2. **scroll** requests one animation frame; further scrolls are dropped
//!    until that frame has run.
//! 3. **frame** samples geometry, updates the pinned offset and emits a
//!    [`FixedChange`], every time, changed or not.
//! 4. **resize** and offset changes re-measure the container height before
//!    scheduling a calculation.

pub mod geometry;
mod props;

pub use props::{AffixProps, ContainerTarget};

use tack_engine::dom::{ElementId, EventKind, EventTarget, HostEvent, ScrollContainer};

use crate::config::UiConfig;
use crate::context::Cx;
use crate::event::{ComponentEvent, EventResult, FixedChange};
use crate::view::{Placement, View};
use crate::widget::Widget;

use geometry::Measurements;

/// Mutable affix state read by the render pass.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct AffixState {
    /// Pinned offset from the viewport top; `None` while in flow.
    pub fixed_top: Option<f32>,
    /// Container visible height minus the affix height.
    pub container_height: f32,
    /// A calculation frame is pending.
    pub ticking: bool,
}

/// Sticky wrapper around a host element.
///
/// `node` is the host element whose bounding box is tracked; it stays in flow
/// while its content is pinned, so its position keeps reflecting the scroll.
///
/// # Example
/// ```rust,ignore
/// let id = scene.mount(
///     &host,
///     Affix::new(toolbar)
///         .offset_top(64.0)
///         .container(".article")
///         .z_index(10)
///         .on_fixed_change(|c| log::info!("toolbar pinned: {}", c.fixed)),
/// );
/// ```
pub struct Affix {
    node: ElementId,
    props: AffixProps,
    state: AffixState,
    /// Resolved at mount; `None` while unmounted.
    container: Option<ScrollContainer>,
    on_fixed_change: Option<Box<dyn FnMut(&FixedChange)>>,
}

impl Affix {
    pub fn new(node: ElementId) -> Self {
        Self::with_props(node, AffixProps::default())
    }

    pub fn with_props(node: ElementId, props: AffixProps) -> Self {
        Self {
            node,
            props,
            state: AffixState::default(),
            container: None,
            on_fixed_change: None,
        }
    }

    pub fn offset_top(mut self, v: impl Into<Option<f32>>) -> Self {
        self.props.offset_top = v.into();
        self
    }

    pub fn offset_bottom(mut self, v: impl Into<Option<f32>>) -> Self {
        self.props.offset_bottom = v.into();
        self
    }

    pub fn container(mut self, target: impl Into<ContainerTarget>) -> Self {
        self.props.container = target.into();
        self
    }

    pub fn z_index(mut self, z: i32) -> Self {
        self.props.z_index = Some(z);
        self
    }

    /// Called after every calculation, alongside the emitted event.
    pub fn on_fixed_change(mut self, f: impl FnMut(&FixedChange) + 'static) -> Self {
        self.on_fixed_change = Some(Box::new(f));
        self
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self) -> ElementId {
        self.node
    }

    #[inline]
    pub fn props(&self) -> &AffixProps {
        &self.props
    }

    #[inline]
    pub fn state(&self) -> AffixState {
        self.state
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.state.fixed_top.is_some()
    }

    #[inline]
    pub fn scroll_container(&self) -> Option<ScrollContainer> {
        self.container
    }

    // ── prop updates ──────────────────────────────────────────────────────

    /// Changes the top threshold and recalculates on the next frame.
    pub fn set_offset_top(&mut self, cx: &mut Cx<'_>, v: Option<f32>) {
        if self.props.offset_top == v {
            return;
        }
        self.props.offset_top = v;
        self.calc_init_value(cx);
    }

    /// Changes the bottom threshold and recalculates on the next frame.
    pub fn set_offset_bottom(&mut self, cx: &mut Cx<'_>, v: Option<f32>) {
        if self.props.offset_bottom == v {
            return;
        }
        self.props.offset_bottom = v;
        self.calc_init_value(cx);
    }

    /// Only affects rendering.
    pub fn set_z_index(&mut self, z: Option<i32>) {
        self.props.z_index = z;
    }

    // ── internals ─────────────────────────────────────────────────────────

    /// Re-measures the container height, then schedules a calculation.
    fn calc_init_value(&mut self, cx: &mut Cx<'_>) {
        let Some(container) = self.container else {
            return;
        };
        let host = cx.host();
        let visible = container.visible_height(host);
        let own = host.client_height(self.node).unwrap_or(0.0);
        self.state.container_height = geometry::container_height(visible, own);
        self.handle_scroll(cx);
    }

    fn handle_scroll(&mut self, cx: &mut Cx<'_>) {
        if self.state.ticking {
            return;
        }
        cx.request_animation_frame();
        self.state.ticking = true;
    }

    fn recalculate(&mut self, cx: &mut Cx<'_>) {
        self.state.ticking = false;
        let Some(container) = self.container else {
            return;
        };
        let host = cx.host();
        let Some(rect) = host.bounding_rect(self.node) else {
            log::debug!("{}: affix node {} has no geometry; skipping", cx.id(), self.node);
            return;
        };

        let m = Measurements {
            element_top: rect.top(),
            container_top: container.top(host),
            container_height: self.state.container_height,
        };
        self.state.fixed_top = geometry::fixed_top(m, self.props.offsets());

        let change = FixedChange {
            fixed: self.state.fixed_top.is_some(),
            top: self.state.fixed_top,
        };
        log::trace!("{}: {m:?} -> {change:?}", cx.id());

        cx.emit(ComponentEvent::FixedChange(change));
        if let Some(f) = &mut self.on_fixed_change {
            f(&change);
        }
    }
}

impl Widget for Affix {
    fn mount(&mut self, cx: &mut Cx<'_>) {
        let container = self.props.container.resolve(cx.host());
        self.container = Some(container);
        self.calc_init_value(cx);

        cx.on(container.target(), EventKind::Scroll);
        cx.on(EventTarget::Window, EventKind::Resize);
        if !container.is_viewport() {
            cx.on(EventTarget::Window, EventKind::Scroll);
        }
        log::debug!("{}: affix tracking {:?} against {container:?}", cx.id(), self.node);
    }

    fn unmount(&mut self, cx: &mut Cx<'_>) {
        let Some(container) = self.container.take() else {
            return;
        };
        cx.off(container.target(), EventKind::Scroll);
        cx.off(EventTarget::Window, EventKind::Resize);
        if !container.is_viewport() {
            cx.off(EventTarget::Window, EventKind::Scroll);
        }
        self.state.ticking = false;
    }

    fn on_event(&mut self, cx: &mut Cx<'_>, event: &HostEvent) -> EventResult {
        match event.kind {
            EventKind::Scroll => self.handle_scroll(cx),
            EventKind::Resize => self.calc_init_value(cx),
        }
        EventResult::Ignored
    }

    fn on_frame(&mut self, cx: &mut Cx<'_>) {
        self.recalculate(cx);
    }

    fn render(&self, config: &UiConfig) -> View {
        match self.state.fixed_top {
            Some(top) => View {
                class: Some(config.class_name("affix")),
                placement: Placement::Fixed { top, z_index: self.props.z_index },
                forward_attrs: true,
            },
            None => View::flow(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tack_engine::coords::{Rect, Vec2};
    use tack_engine::dom::MemoryHost;

    use super::*;
    use crate::event::Emitted;
    use crate::scene::UiScene;
    use crate::widget::ComponentId;

    /// 800×600 viewport over a 3000px page.
    fn page() -> MemoryHost {
        MemoryHost::new(Vec2::new(800.0, 600.0), 3000.0)
    }

    fn changes(emitted: Vec<Emitted>) -> Vec<FixedChange> {
        emitted
            .into_iter()
            .map(|e| match e.event {
                ComponentEvent::FixedChange(c) => c,
            })
            .collect()
    }

    fn settle(scene: &mut UiScene, host: &MemoryHost) -> Vec<FixedChange> {
        scene.frame(host);
        changes(scene.drain_emitted())
    }

    fn pinned(top: f32) -> FixedChange {
        FixedChange { fixed: true, top: Some(top) }
    }

    const UNPINNED: FixedChange = FixedChange { fixed: false, top: None };

    fn scroll_window(scene: &mut UiScene, host: &mut MemoryHost, y: f32) {
        let ev = host.scroll_window_to(y);
        scene.dispatch(&*host, ev);
    }

    // ── mount ─────────────────────────────────────────────────────────────

    #[test]
    fn mount_measures_and_calculates_without_scrolling() {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 200.0, 800.0, 40.0));
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Affix::new(node).offset_top(10.0));

        let affix = scene.get::<Affix>(id).unwrap();
        assert_eq!(affix.state().container_height, 560.0);
        assert!(affix.state().ticking);
        assert_eq!(affix.scroll_container(), Some(ScrollContainer::Viewport));

        assert_eq!(settle(&mut scene, &host), vec![UNPINNED]);
        assert!(!scene.get::<Affix>(id).unwrap().state().ticking);
    }

    #[test]
    fn viewport_container_registers_scroll_and_resize() {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 200.0, 800.0, 40.0));
        let mut scene = UiScene::new();
        scene.mount(&host, Affix::new(node));
        assert_eq!(scene.listener_count(), 2);
    }

    // ── top threshold ─────────────────────────────────────────────────────

    #[test]
    fn pins_exactly_when_distance_reaches_offset_top() {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 200.0, 800.0, 40.0));
        let mut scene = UiScene::new();
        scene.mount(&host, Affix::new(node).offset_top(10.0));
        settle(&mut scene, &host);

        scroll_window(&mut scene, &mut host, 189.0);
        assert_eq!(settle(&mut scene, &host), vec![UNPINNED]);

        scroll_window(&mut scene, &mut host, 190.0);
        assert_eq!(settle(&mut scene, &host), vec![pinned(10.0)]);

        scroll_window(&mut scene, &mut host, 800.0);
        assert_eq!(settle(&mut scene, &host), vec![pinned(10.0)]);

        scroll_window(&mut scene, &mut host, 0.0);
        assert_eq!(settle(&mut scene, &host), vec![UNPINNED]);
    }

    // ── bottom threshold ──────────────────────────────────────────────────

    #[test]
    fn pins_to_bottom_until_scrolled_into_view() {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 1000.0, 800.0, 40.0));
        let mut scene = UiScene::new();
        scene.mount(&host, Affix::new(node).offset_top(None).offset_bottom(20.0));

        // limit = 0 + (600 - 40) - 20 = 540
        assert_eq!(settle(&mut scene, &host), vec![pinned(540.0)]);

        scroll_window(&mut scene, &mut host, 460.0);
        assert_eq!(settle(&mut scene, &host), vec![pinned(540.0)]);

        scroll_window(&mut scene, &mut host, 461.0);
        assert_eq!(settle(&mut scene, &host), vec![UNPINNED]);
    }

    #[test]
    fn resize_recomputes_container_height() {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 500.0, 800.0, 40.0));
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Affix::new(node).offset_top(None).offset_bottom(20.0));
        assert_eq!(settle(&mut scene, &host), vec![UNPINNED]);

        let ev = host.set_viewport_size(Vec2::new(800.0, 500.0));
        scene.dispatch(&host, ev);
        assert_eq!(scene.get::<Affix>(id).unwrap().state().container_height, 460.0);
        // limit = 460 - 20 = 440 <= 500
        assert_eq!(settle(&mut scene, &host), vec![pinned(440.0)]);
    }

    // ── element container ─────────────────────────────────────────────────

    fn scroller_page() -> (MemoryHost, ElementId, ElementId) {
        let mut host = page();
        let scroller = host.add_element(Rect::new(0.0, 100.0, 400.0, 300.0));
        host.set_scrollable(scroller, 1200.0);
        host.set_selector(".scroller", scroller);
        let node = host.add_child(scroller, Rect::new(0.0, 250.0, 400.0, 30.0));
        (host, scroller, node)
    }

    #[test]
    fn element_container_tracks_its_top_and_page_scroll() {
        let (mut host, scroller, node) = scroller_page();
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Affix::new(node).offset_top(20.0).container(".scroller"));

        let affix = scene.get::<Affix>(id).unwrap();
        assert_eq!(affix.scroll_container(), Some(ScrollContainer::Element(scroller)));
        assert_eq!(affix.state().container_height, 270.0);
        assert_eq!(scene.listener_count(), 3);
        assert_eq!(settle(&mut scene, &host), vec![UNPINNED]);

        // 150px below the container top; scroll the container by 130.
        let ev = host.scroll_element_to(scroller, 130.0).unwrap();
        scene.dispatch(&host, ev);
        assert_eq!(settle(&mut scene, &host), vec![pinned(120.0)]);

        // Page scroll moves the container up; the pin follows it.
        let ev = host.scroll_window_by(50.0);
        assert_eq!(scene.dispatch(&host, ev), 1);
        assert_eq!(settle(&mut scene, &host), vec![pinned(70.0)]);
    }

    #[test]
    fn unknown_selector_falls_back_to_viewport() {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 200.0, 800.0, 40.0));
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Affix::new(node).container("#missing"));
        assert_eq!(
            scene.get::<Affix>(id).unwrap().scroll_container(),
            Some(ScrollContainer::Viewport)
        );
        assert_eq!(scene.listener_count(), 2);
    }

    // ── scheduling ────────────────────────────────────────────────────────

    #[test]
    fn scroll_burst_coalesces_into_one_calculation() {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 200.0, 800.0, 40.0));
        let mut scene = UiScene::new();
        scene.mount(&host, Affix::new(node));
        settle(&mut scene, &host);

        for y in [50.0, 120.0, 210.0] {
            scroll_window(&mut scene, &mut host, y);
        }
        assert_eq!(scene.pending_frames(), 1);
        assert_eq!(settle(&mut scene, &host), vec![pinned(0.0)]);
    }

    #[test]
    fn frame_without_scroll_emits_nothing() {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 200.0, 800.0, 40.0));
        let mut scene = UiScene::new();
        scene.mount(&host, Affix::new(node));
        settle(&mut scene, &host);
        assert!(settle(&mut scene, &host).is_empty());
    }

    #[test]
    fn unchanged_state_is_still_emitted() {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 200.0, 800.0, 40.0));
        let mut scene = UiScene::new();
        scene.mount(&host, Affix::new(node));
        settle(&mut scene, &host);

        scroll_window(&mut scene, &mut host, 10.0);
        assert_eq!(settle(&mut scene, &host), vec![UNPINNED]);
    }

    // ── prop changes ──────────────────────────────────────────────────────

    #[test]
    fn changing_offset_recalculates_without_scroll() {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 200.0, 800.0, 40.0));
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Affix::new(node).offset_top(10.0));
        settle(&mut scene, &host);

        scene
            .update::<Affix, _>(&host, id, |a, cx| a.set_offset_top(cx, Some(250.0)))
            .unwrap();
        assert_eq!(settle(&mut scene, &host), vec![pinned(250.0)]);

        scene
            .update::<Affix, _>(&host, id, |a, cx| a.set_offset_top(cx, None))
            .unwrap();
        assert_eq!(settle(&mut scene, &host), vec![UNPINNED]);
    }

    #[test]
    fn setting_same_offset_schedules_nothing() {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 200.0, 800.0, 40.0));
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Affix::new(node).offset_bottom(30.0));
        settle(&mut scene, &host);

        scene
            .update::<Affix, _>(&host, id, |a, cx| a.set_offset_bottom(cx, Some(30.0)))
            .unwrap();
        assert_eq!(scene.pending_frames(), 0);
    }

    #[test]
    fn offset_change_remeasures_container_height() {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 200.0, 800.0, 40.0));
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Affix::new(node));
        settle(&mut scene, &host);

        host.set_layout(node, Rect::new(0.0, 200.0, 800.0, 100.0));
        scene
            .update::<Affix, _>(&host, id, |a, cx| a.set_offset_bottom(cx, Some(5.0)))
            .unwrap();
        assert_eq!(scene.get::<Affix>(id).unwrap().state().container_height, 500.0);
    }

    // ── unmount ───────────────────────────────────────────────────────────

    fn mounted_with_pending_frame() -> (MemoryHost, UiScene, ComponentId) {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 200.0, 800.0, 40.0));
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Affix::new(node));
        settle(&mut scene, &host);
        scroll_window(&mut scene, &mut host, 300.0);
        (host, scene, id)
    }

    #[test]
    fn unmount_removes_every_listener() {
        let (mut host, mut scene, id) = mounted_with_pending_frame();
        scene.unmount(&host, id).unwrap();
        assert_eq!(scene.listener_count(), 0);

        let ev = host.scroll_window_by(10.0);
        assert_eq!(scene.dispatch(&host, ev), 0);
        let ev = host.set_viewport_size(Vec2::new(100.0, 100.0));
        assert_eq!(scene.dispatch(&host, ev), 0);
    }

    #[test]
    fn nothing_is_emitted_after_unmount() {
        let (host, mut scene, id) = mounted_with_pending_frame();
        scene.unmount(&host, id).unwrap();
        assert!(settle(&mut scene, &host).is_empty());
    }

    #[test]
    fn element_container_unmount_drops_window_scroll_too() {
        let (host, _, node) = scroller_page();
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Affix::new(node).container(".scroller"));
        scene.unmount(&host, id).unwrap();
        assert_eq!(scene.listener_count(), 0);
    }

    // ── callback / render ─────────────────────────────────────────────────

    #[test]
    fn callback_sees_every_emission() {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 200.0, 800.0, 40.0));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut scene = UiScene::new();
        scene.mount(
            &host,
            Affix::new(node).offset_top(10.0).on_fixed_change(move |c| sink.borrow_mut().push(*c)),
        );
        scene.frame(&host);
        scroll_window(&mut scene, &mut host, 195.0);
        scene.frame(&host);

        assert_eq!(*seen.borrow(), vec![UNPINNED, pinned(10.0)]);
        assert_eq!(scene.drain_emitted().len(), 2);
    }

    #[test]
    fn render_switches_to_fixed_placement() {
        let mut host = page();
        let node = host.add_element(Rect::new(0.0, 200.0, 800.0, 40.0));
        let mut scene = UiScene::with_config(UiConfig::default().class_prefix("acme"));
        let id = scene.mount(&host, Affix::new(node).offset_top(12.0).z_index(7));
        settle(&mut scene, &host);
        assert_eq!(scene.render(id).unwrap(), View::flow());

        scroll_window(&mut scene, &mut host, 250.0);
        settle(&mut scene, &host);
        let view = scene.render(id).unwrap();
        assert_eq!(view.class.as_deref(), Some("acme-affix"));
        assert_eq!(view.placement, Placement::Fixed { top: 12.0, z_index: Some(7) });
        assert!(view.forward_attrs);
    }
}
