use std::any::type_name;
use std::fmt;

use tack_engine::dom::{Host, HostEvent, ListenerRegistry};
use tack_engine::time::FrameQueue;

use crate::config::UiConfig;
use crate::context::Cx;
use crate::event::Emitted;
use crate::view::View;
use crate::widget::{ComponentId, Element, Widget};

// ── SceneError ────────────────────────────────────────────────────────────

/// Error returned by scene operations that address a component by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No mounted component has this id.
    UnknownComponent(ComponentId),
    /// The component exists but is not of the requested widget type.
    TypeMismatch { id: ComponentId, expected: &'static str },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownComponent(id) => write!(f, "{id} is not mounted"),
            SceneError::TypeMismatch { id, expected } => {
                write!(f, "{id} is not a {expected}")
            }
        }
    }
}

impl std::error::Error for SceneError {}

// ── UiScene ───────────────────────────────────────────────────────────────

/// Top-level coordinator that owns mounted components across frames.
///
/// The host document is borrowed per call rather than stored, so the
/// application keeps full ownership of it between events.
///
/// # Example
///
/// ```rust,ignore
/// let mut scene = UiScene::new();
/// let id = scene.mount(&host, Affix::new(node).offset_top(0.0));
///
/// // For every platform event:
/// scene.dispatch(&host, event);
/// // Once per presented frame:
/// scene.frame(&host);
/// ```
pub struct UiScene {
    config: UiConfig,
    components: Vec<(ComponentId, Element)>,
    listeners: ListenerRegistry<ComponentId>,
    frames: FrameQueue<ComponentId>,
    emitted: Vec<Emitted>,
}

impl UiScene {
    pub fn new() -> Self {
        Self::with_config(UiConfig::default())
    }

    pub fn with_config(config: UiConfig) -> Self {
        Self {
            config,
            components: Vec::new(),
            listeners: ListenerRegistry::new(),
            frames: FrameQueue::new(),
            emitted: Vec::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Inserts `element` and runs its mount hook.
    pub fn mount(&mut self, host: &dyn Host, element: impl Into<Element>) -> ComponentId {
        let id = ComponentId::next();
        let mut element = element.into();
        {
            let mut cx = Cx::new(
                id,
                host,
                &mut self.listeners,
                &mut self.frames,
                &mut self.emitted,
            );
            element.mount(&mut cx);
        }
        self.components.push((id, element));
        log::debug!("{id} mounted");
        id
    }

    /// Runs the unmount hook and removes the component.
    ///
    /// Any subscription or frame request the component still holds afterwards
    /// is dropped, so nothing is delivered to it once this returns.
    pub fn unmount(&mut self, host: &dyn Host, id: ComponentId) -> Result<(), SceneError> {
        let idx = self.index_of(id)?;
        let (_, mut element) = self.components.remove(idx);
        {
            let mut cx = Cx::new(
                id,
                host,
                &mut self.listeners,
                &mut self.frames,
                &mut self.emitted,
            );
            element.unmount(&mut cx);
        }

        let stale = self.listeners.off_owner(id);
        if stale > 0 {
            log::debug!("{id}: released {stale} listener(s) left after unmount");
        }
        self.frames.cancel_owner(id);
        log::debug!("{id} unmounted");
        Ok(())
    }

    /// Delivers a host event to every component subscribed to it, in
    /// subscription order. Returns the number of components that received it.
    pub fn dispatch(&mut self, host: &dyn Host, event: HostEvent) -> usize {
        let owners = self.listeners.listeners(event.target, event.kind);
        let mut delivered = 0;

        for owner in owners {
            let Self { components, listeners, frames, emitted, .. } = &mut *self;
            let Some((_, element)) = components.iter_mut().find(|(id, _)| *id == owner) else {
                continue;
            };
            let mut cx = Cx::new(owner, host, listeners, frames, emitted);
            delivered += 1;
            if element.on_event(&mut cx, &event).is_consumed() {
                break;
            }
        }

        log::trace!("{event:?} delivered to {delivered} component(s)");
        delivered
    }

    /// Runs one animation frame: every component that requested a frame
    /// before this call gets its `on_frame` hook. Returns how many ran.
    pub fn frame(&mut self, host: &dyn Host) -> usize {
        let batch = self.frames.begin_frame();
        let mut ran = 0;

        for owner in batch.owners {
            let Self { components, listeners, frames, emitted, .. } = &mut *self;
            let Some((_, element)) = components.iter_mut().find(|(id, _)| *id == owner) else {
                continue;
            };
            let mut cx = Cx::new(owner, host, listeners, frames, emitted);
            element.on_frame(&mut cx);
            ran += 1;
        }

        if ran > 0 {
            log::trace!("frame {} ran {ran} callback(s)", batch.frame_index);
        }
        ran
    }

    /// Mutates a mounted component of type `W`, e.g. to change its props.
    pub fn update<W, R>(
        &mut self,
        host: &dyn Host,
        id: ComponentId,
        f: impl FnOnce(&mut W, &mut Cx<'_>) -> R,
    ) -> Result<R, SceneError>
    where
        W: Widget,
    {
        let idx = self.index_of(id)?;
        let Self { components, listeners, frames, emitted, .. } = self;
        let widget = components[idx]
            .1
            .downcast_mut::<W>()
            .ok_or(SceneError::TypeMismatch { id, expected: type_name::<W>() })?;
        let mut cx = Cx::new(id, host, listeners, frames, emitted);
        Ok(f(widget, &mut cx))
    }

    /// Borrows a mounted component of type `W`.
    pub fn get<W: Widget>(&self, id: ComponentId) -> Result<&W, SceneError> {
        let idx = self.index_of(id)?;
        self.components[idx]
            .1
            .downcast_ref::<W>()
            .ok_or(SceneError::TypeMismatch { id, expected: type_name::<W>() })
    }

    pub fn render(&self, id: ComponentId) -> Result<View, SceneError> {
        let idx = self.index_of(id)?;
        Ok(self.components[idx].1.render(&self.config))
    }

    /// Takes every event emitted since the last call, oldest first.
    pub fn drain_emitted(&mut self) -> Vec<Emitted> {
        std::mem::take(&mut self.emitted)
    }

    pub fn is_mounted(&self, id: ComponentId) -> bool {
        self.index_of(id).is_ok()
    }

    /// Number of mounted components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Live listener subscriptions across all components.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Frame requests waiting for the next [`UiScene::frame`].
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    fn index_of(&self, id: ComponentId) -> Result<usize, SceneError> {
        self.components
            .iter()
            .position(|(cid, _)| *cid == id)
            .ok_or(SceneError::UnknownComponent(id))
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use tack_engine::coords::{Rect, Vec2};
    use tack_engine::dom::{EventKind, EventTarget, MemoryHost};

    use super::*;
    use crate::event::EventResult;

    /// Counts deliveries; optionally consumes, re-requests frames, or forgets
    /// to unsubscribe.
    #[derive(Default)]
    struct Probe {
        events: usize,
        frames: usize,
        consume: bool,
        leak_on_unmount: bool,
    }

    impl Widget for Probe {
        fn mount(&mut self, cx: &mut Cx<'_>) {
            cx.on(EventTarget::Window, EventKind::Scroll);
        }

        fn unmount(&mut self, cx: &mut Cx<'_>) {
            if !self.leak_on_unmount {
                cx.off(EventTarget::Window, EventKind::Scroll);
            }
        }

        fn on_event(&mut self, cx: &mut Cx<'_>, _event: &HostEvent) -> EventResult {
            self.events += 1;
            cx.request_animation_frame();
            if self.consume { EventResult::Consumed } else { EventResult::Ignored }
        }

        fn on_frame(&mut self, cx: &mut Cx<'_>) {
            self.frames += 1;
            // Chained request must wait for the following frame.
            if self.frames == 1 {
                cx.request_animation_frame();
            }
        }

        fn render(&self, _config: &UiConfig) -> View {
            View::flow()
        }
    }

    struct Other;

    impl Widget for Other {
        fn render(&self, _config: &UiConfig) -> View {
            View::flow()
        }
    }

    fn host() -> MemoryHost {
        let mut host = MemoryHost::new(Vec2::new(800.0, 600.0), 2000.0);
        host.add_element(Rect::new(0.0, 0.0, 800.0, 10.0));
        host
    }

    // ── mount / unmount ───────────────────────────────────────────────────

    #[test]
    fn mount_runs_hook_and_registers() {
        let host = host();
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Probe::default());
        assert!(scene.is_mounted(id));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.listener_count(), 1);
    }

    #[test]
    fn unmount_unknown_component_is_an_error() {
        let host = host();
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Other);
        scene.unmount(&host, id).unwrap();
        assert_eq!(scene.unmount(&host, id), Err(SceneError::UnknownComponent(id)));
        assert!(scene.is_empty());
    }

    #[test]
    fn unmount_releases_leaked_listeners_and_frames() {
        let mut host = host();
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Probe { leak_on_unmount: true, ..Probe::default() });

        let ev = host.scroll_window_by(10.0);
        scene.dispatch(&host, ev);
        assert_eq!(scene.pending_frames(), 1);

        scene.unmount(&host, id).unwrap();
        assert_eq!(scene.listener_count(), 0);
        assert_eq!(scene.pending_frames(), 0);
        assert_eq!(scene.dispatch(&host, ev), 0);
    }

    // ── dispatch / frame ──────────────────────────────────────────────────

    #[test]
    fn dispatch_stops_after_consumed() {
        let mut host = host();
        let mut scene = UiScene::new();
        let first = scene.mount(&host, Probe { consume: true, ..Probe::default() });
        let second = scene.mount(&host, Probe::default());

        let ev = host.scroll_window_by(5.0);
        assert_eq!(scene.dispatch(&host, ev), 1);
        assert_eq!(scene.get::<Probe>(first).unwrap().events, 1);
        assert_eq!(scene.get::<Probe>(second).unwrap().events, 0);
    }

    #[test]
    fn dispatch_ignores_unsubscribed_kinds() {
        let mut host = host();
        let mut scene = UiScene::new();
        scene.mount(&host, Probe::default());
        let ev = host.set_viewport_size(Vec2::new(640.0, 480.0));
        assert_eq!(scene.dispatch(&host, ev), 0);
    }

    #[test]
    fn frame_requests_made_during_a_frame_run_next_frame() {
        let mut host = host();
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Probe::default());

        let ev = host.scroll_window_by(5.0);
        scene.dispatch(&host, ev);
        assert_eq!(scene.frame(&host), 1);
        assert_eq!(scene.pending_frames(), 1);
        assert_eq!(scene.frame(&host), 1);
        assert_eq!(scene.frame(&host), 0);
        assert_eq!(scene.get::<Probe>(id).unwrap().frames, 2);
    }

    // ── typed access ──────────────────────────────────────────────────────

    #[test]
    fn update_with_wrong_type_reports_mismatch() {
        let host = host();
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Other);
        let err = scene.update::<Probe, _>(&host, id, |_, _| ()).unwrap_err();
        assert!(matches!(err, SceneError::TypeMismatch { id: got, .. } if got == id));
        assert!(err.to_string().contains("Probe"));
    }

    #[test]
    fn update_can_register_through_context() {
        let host = host();
        let mut scene = UiScene::new();
        let id = scene.mount(&host, Other);
        scene
            .update::<Other, _>(&host, id, |_, cx| {
                cx.on(EventTarget::Window, EventKind::Resize);
            })
            .unwrap();
        assert_eq!(scene.listener_count(), 1);
    }
}
