use crate::widget::ComponentId;

/// Payload of the affix `fixed-change` notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedChange {
    /// Whether the content is currently pinned.
    pub fixed: bool,
    /// Pinned offset from the viewport top; `None` while unpinned.
    pub top: Option<f32>,
}

/// Notifications components emit to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentEvent {
    FixedChange(FixedChange),
}

/// A [`ComponentEvent`] tagged with the component that emitted it.
#[derive(Debug, Clone, PartialEq)]
pub struct Emitted {
    pub source: ComponentId,
    pub event: ComponentEvent,
}

/// Result returned by [`crate::widget::Widget::on_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled — stop delivering it to later listeners.
    Consumed,
    /// Keep delivering.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
