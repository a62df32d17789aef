/// Handle for a single pending animation-frame request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameRequestId(u64);

/// Owners whose frame callbacks are due in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBatch<O> {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Owners in request order.
    pub owners: Vec<O>,
}

/// Queue of animation-frame requests, `requestAnimationFrame` style.
///
/// Requests are one-shot: `begin_frame` hands out everything requested so far
/// and empties the queue, so a request made while the batch is being run
/// lands in the following frame.
#[derive(Debug, Clone)]
pub struct FrameQueue<O> {
    pending: Vec<(FrameRequestId, O)>,
    next_id: u64,
    frame_index: u64,
}

impl<O: Copy + PartialEq> FrameQueue<O> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 1,
            frame_index: 0,
        }
    }

    /// Schedules `owner` for the next frame.
    pub fn request(&mut self, owner: O) -> FrameRequestId {
        let id = FrameRequestId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push((id, owner));
        id
    }

    /// Cancels one request. Returns `false` if it already ran or was cancelled.
    pub fn cancel(&mut self, id: FrameRequestId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(rid, _)| *rid != id);
        self.pending.len() != before
    }

    /// Cancels every pending request made by `owner`.
    pub fn cancel_owner(&mut self, owner: O) -> usize {
        let before = self.pending.len();
        self.pending.retain(|(_, o)| *o != owner);
        before - self.pending.len()
    }

    pub fn is_pending(&self, owner: O) -> bool {
        self.pending.iter().any(|(_, o)| *o == owner)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Index of the next frame `begin_frame` will produce.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Takes every pending request and advances the frame counter.
    pub fn begin_frame(&mut self) -> FrameBatch<O> {
        let owners = self.pending.drain(..).map(|(_, o)| o).collect();
        let batch = FrameBatch {
            frame_index: self.frame_index,
            owners,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        batch
    }
}

impl<O: Copy + PartialEq> Default for FrameQueue<O> {
    fn default() -> Self {
        Self::new()
    }
}
