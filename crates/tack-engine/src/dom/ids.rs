use std::fmt;

/// Opaque handle to an element owned by the host document.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something a listener can be attached to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventTarget {
    /// The global viewport (`window`).
    Window,
    Element(ElementId),
}

/// Host event types widgets may subscribe to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventKind {
    Scroll,
    Resize,
}

/// A platform event after translation, addressed to a target.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HostEvent {
    pub target: EventTarget,
    pub kind: EventKind,
}

impl HostEvent {
    #[inline]
    pub const fn new(target: EventTarget, kind: EventKind) -> Self {
        Self { target, kind }
    }

    #[inline]
    pub const fn window_scroll() -> Self {
        Self::new(EventTarget::Window, EventKind::Scroll)
    }

    #[inline]
    pub const fn window_resize() -> Self {
        Self::new(EventTarget::Window, EventKind::Resize)
    }
}

/// Handle returned by [`crate::dom::ListenerRegistry::on`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ListenerId(pub(crate) u64);
