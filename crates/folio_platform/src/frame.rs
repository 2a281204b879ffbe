//! Per-frame scheduling
//!
//! A [`FrameDriver`] is the host's "run this before the next paint"
//! primitive. Requests are one-shot: a component that wants to keep
//! animating requests a new frame from inside its frame callback. The host
//! calls [`FrameDriver::drain_due`] once per frame and delivers each handle
//! back to whoever requested it.

/// Handle to a requested animation frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Cancellable one-shot frame scheduling
pub trait FrameDriver {
    /// Schedule a callback for the next frame
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a pending request; cancelling a delivered or unknown handle is a no-op
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Take every request due this frame, in request order
    fn drain_due(&mut self) -> Vec<FrameHandle>;

    /// Number of requests waiting for the next frame
    fn pending(&self) -> usize;
}

/// Frame driver stepped explicitly by its owner
///
/// Used for headless simulation and tests: each call to `drain_due` is one
/// frame.
#[derive(Debug, Default)]
pub struct ManualFrameDriver {
    next_id: u64,
    pending: Vec<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualFrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of frames ever requested
    pub fn requested_count(&self) -> u64 {
        self.requested
    }

    /// Total number of pending requests that were cancelled
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl FrameDriver for ManualFrameDriver {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }

    fn drain_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_drain() {
        let mut driver = ManualFrameDriver::new();
        let a = driver.request_frame();
        let b = driver.request_frame();
        assert_ne!(a, b);
        assert_eq!(driver.pending(), 2);
        assert_eq!(driver.drain_due(), vec![a, b]);
        assert_eq!(driver.pending(), 0);
        assert!(driver.drain_due().is_empty());
    }

    #[test]
    fn test_cancel_only_counts_pending() {
        let mut driver = ManualFrameDriver::new();
        let a = driver.request_frame();
        driver.cancel_frame(a);
        driver.cancel_frame(a);
        assert_eq!(driver.cancelled_count(), 1);
        assert_eq!(driver.requested_count(), 1);
        assert!(driver.drain_due().is_empty());
    }
}
