//! Animation-frame scheduling.
//!
//! Building a widget is deferred to the next frame so that layout work
//! caused by destroying the old widget never interleaves with measuring the
//! new one. The deferral is a queue of values rather than callbacks: the
//! presenter pushes a [`BuildJob`] and later drains the frame.

use std::collections::VecDeque;

use crate::request::RenderRequest;

/// A build waiting for the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildJob {
    /// Submission order across the presenter's lifetime
    pub sequence: u64,
    pub request: RenderRequest,
}

/// Queue of work deferred to the next frame.
///
/// Implementations must hand jobs back in submission order.
pub trait FrameScheduler {
    /// Defers `job` to the next frame.
    fn request_frame(&mut self, job: BuildJob);

    /// Takes every job due on this frame.
    fn take_frame(&mut self) -> Vec<BuildJob>;

    /// Number of jobs waiting.
    fn pending(&self) -> usize;
}

/// FIFO frame queue.
#[derive(Debug, Default)]
pub struct FrameQueue {
    jobs: VecDeque<BuildJob>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self, job: BuildJob) {
        self.jobs.push_back(job);
    }

    fn take_frame(&mut self) -> Vec<BuildJob> {
        self.jobs.drain(..).collect()
    }

    fn pending(&self) -> usize {
        self.jobs.len()
    }
}
