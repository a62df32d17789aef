//! Tack UI — mounted components on top of `tack-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use tack_ui::prelude::*;
//!
//! let mut scene = UiScene::new();
//! let id = scene.mount(&host, Affix::new(node).offset_top(10.0));
//!
//! // Route host events, then run one animation frame:
//! scene.dispatch(&host, host.scroll_window_by(40.0));
//! scene.frame(&host);
//! for emitted in scene.drain_emitted() {
//!     println!("{:?}", emitted.event);
//! }
//! ```
//!
//! # Extending with custom widgets
//!
//! Implement [`Widget`](widget::Widget) for any `'static` type and mount it
//! through [`UiScene::mount`](scene::UiScene::mount). Subscriptions made through
//! [`Cx`](context::Cx) are released automatically when the widget unmounts.

pub mod config;
pub mod context;
pub mod event;
pub mod scene;
pub mod view;
pub mod widget;
pub mod widgets;

/// Everything needed to mount and drive components.
pub mod prelude {
    pub use crate::config::UiConfig;
    pub use crate::context::Cx;
    pub use crate::event::{ComponentEvent, Emitted, EventResult, FixedChange};
    pub use crate::scene::{SceneError, UiScene};
    pub use crate::view::{Placement, View};
    pub use crate::widget::{ComponentId, Element, Widget};
    pub use crate::widgets::affix::{Affix, AffixProps, AffixState, ContainerTarget};

    // Re-export the engine primitives everyone needs.
    pub use tack_engine::coords::{Rect, Vec2};
    pub use tack_engine::dom::{
        ElementId, EventKind, EventTarget, Host, HostEvent, MemoryHost, ScrollContainer,
    };
}
