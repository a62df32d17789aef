use tack_engine::dom::{EventKind, EventTarget, Host, ListenerId, ListenerRegistry};
use tack_engine::time::{FrameQueue, FrameRequestId};

use crate::event::{ComponentEvent, Emitted};
use crate::widget::ComponentId;

/// Per-call context handed to widget lifecycle hooks.
///
/// Borrows the scene's shared state for the duration of one hook. Everything a
/// widget registers is keyed by its [`ComponentId`], so the scene can release
/// it on unmount.
pub struct Cx<'a> {
    id: ComponentId,
    host: &'a dyn Host,
    listeners: &'a mut ListenerRegistry<ComponentId>,
    frames: &'a mut FrameQueue<ComponentId>,
    emitted: &'a mut Vec<Emitted>,
}

impl<'a> Cx<'a> {
    pub(crate) fn new(
        id: ComponentId,
        host: &'a dyn Host,
        listeners: &'a mut ListenerRegistry<ComponentId>,
        frames: &'a mut FrameQueue<ComponentId>,
        emitted: &'a mut Vec<Emitted>,
    ) -> Self {
        Self { id, host, listeners, frames, emitted }
    }

    #[inline]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Geometry queries against the embedding document.
    #[inline]
    pub fn host(&self) -> &'a dyn Host {
        self.host
    }

    /// Subscribes this component to `kind` events on `target`.
    pub fn on(&mut self, target: EventTarget, kind: EventKind) -> ListenerId {
        self.listeners.on(target, kind, self.id)
    }

    /// Removes a subscription made with [`Cx::on`].
    pub fn off(&mut self, target: EventTarget, kind: EventKind) -> bool {
        self.listeners.off(target, kind, self.id)
    }

    /// Schedules [`crate::widget::Widget::on_frame`] for the next frame.
    pub fn request_animation_frame(&mut self) -> FrameRequestId {
        self.frames.request(self.id)
    }

    /// Queues `event` on the scene's outbox.
    pub fn emit(&mut self, event: ComponentEvent) {
        self.emitted.push(Emitted { source: self.id, event });
    }
}
