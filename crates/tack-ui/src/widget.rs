use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tack_engine::dom::HostEvent;

use crate::config::UiConfig;
use crate::context::Cx;
use crate::event::EventResult;
use crate::view::View;

static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(1);

// ── ComponentId ───────────────────────────────────────────────────────────

/// Unique identifier for a mounted component.
///
/// Allocated by [`crate::scene::UiScene::mount`]; also used as the owner key
/// for listener subscriptions and animation-frame requests.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ComponentId(u64);

impl ComponentId {
    pub(crate) fn next() -> Self {
        ComponentId(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

// ── Widget trait ──────────────────────────────────────────────────────────

/// Downcasting support for type-erased widgets. Implemented for every
/// `'static` type.
pub trait AsAny: 'static {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The core trait every component implements.
///
/// Lifecycle hooks receive a [`Cx`] that grants geometry queries, listener
/// registration, animation-frame requests and event emission. Only `render`
/// is required.
///
/// ```rust,ignore
/// use tack_ui::prelude::*;
///
/// struct ScrollCounter { seen: usize }
///
/// impl Widget for ScrollCounter {
///     fn mount(&mut self, cx: &mut Cx<'_>) {
///         cx.on(EventTarget::Window, EventKind::Scroll);
///     }
///     fn on_event(&mut self, _cx: &mut Cx<'_>, _event: &HostEvent) -> EventResult {
///         self.seen += 1;
///         EventResult::Ignored
///     }
///     fn render(&self, _config: &UiConfig) -> View {
///         View::flow()
///     }
/// }
/// ```
pub trait Widget: AsAny {
    /// Called once after the component is inserted into the scene.
    fn mount(&mut self, _cx: &mut Cx<'_>) {}

    /// Called once before the component is removed from the scene.
    fn unmount(&mut self, _cx: &mut Cx<'_>) {}

    /// A host event this component subscribed to has fired.
    ///
    /// Return [`EventResult::Consumed`] to stop delivery to later listeners
    /// of the same event.
    fn on_event(&mut self, _cx: &mut Cx<'_>, _event: &HostEvent) -> EventResult {
        EventResult::Ignored
    }

    /// An animation frame requested through [`Cx::request_animation_frame`].
    fn on_frame(&mut self, _cx: &mut Cx<'_>) {}

    /// Current render output. Must not depend on anything but `self`.
    fn render(&self, config: &UiConfig) -> View;
}

// ── Element ───────────────────────────────────────────────────────────────

/// A type-erased widget — what the scene stores.
///
/// Any `Widget` converts to `Element` via `From` / `Into`.
pub struct Element(Box<dyn Widget>);

impl Element {
    pub fn new<W: Widget>(w: W) -> Self {
        Self(Box::new(w))
    }

    #[inline]
    pub fn mount(&mut self, cx: &mut Cx<'_>) {
        self.0.mount(cx)
    }

    #[inline]
    pub fn unmount(&mut self, cx: &mut Cx<'_>) {
        self.0.unmount(cx)
    }

    #[inline]
    pub fn on_event(&mut self, cx: &mut Cx<'_>, event: &HostEvent) -> EventResult {
        self.0.on_event(cx, event)
    }

    #[inline]
    pub fn on_frame(&mut self, cx: &mut Cx<'_>) {
        self.0.on_frame(cx)
    }

    #[inline]
    pub fn render(&self, config: &UiConfig) -> View {
        self.0.render(config)
    }

    pub fn downcast_ref<W: Widget>(&self) -> Option<&W> {
        let w: &dyn Widget = &*self.0;
        w.as_any().downcast_ref::<W>()
    }

    pub fn downcast_mut<W: Widget>(&mut self) -> Option<&mut W> {
        let w: &mut dyn Widget = &mut *self.0;
        w.as_any_mut().downcast_mut::<W>()
    }
}

impl<W: Widget> From<W> for Element {
    fn from(w: W) -> Self {
        Self::new(w)
    }
}
