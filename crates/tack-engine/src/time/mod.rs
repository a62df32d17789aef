//! Time subsystem.
//!
//! Provides the animation-frame queue without coupling to the window runtime.
//! Intended usage:
//! - widgets call `request()` from event handlers
//! - the runtime calls `begin_frame()` once per presented frame and runs the
//!   returned owners' frame callbacks

mod frame_queue;

pub use frame_queue::{FrameBatch, FrameQueue, FrameRequestId};
