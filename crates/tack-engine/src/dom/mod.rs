//! Document seam.
//!
//! Widgets never touch a platform document directly. They ask a [`Host`] for
//! geometry and record listener subscriptions in a [`ListenerRegistry`]; the
//! embedding runtime turns platform input into [`HostEvent`]s and routes them
//! to the subscribed owners.

mod host;
mod ids;
mod listeners;
mod memory;

pub use host::{Host, ScrollContainer};
pub use ids::{ElementId, EventKind, EventTarget, HostEvent, ListenerId};
pub use listeners::ListenerRegistry;
pub use memory::MemoryHost;
