// Mount/unmount bookkeeping for the animation loop. The loop is either
// `Unmounted` or `Running`; while running at most one frame request is
// outstanding, and unmounting revokes it so no callback fires after teardown.

use crate::error::BackgroundError;
use std::fmt;

/// Something that can call us back once per display frame, such as
/// `requestAnimationFrame`.
pub trait FrameScheduler {
    type Handle: Copy + PartialEq + fmt::Debug;

    fn request_frame(&mut self) -> Result<Self::Handle, BackgroundError>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoopState<H> {
    Unmounted,
    Running { pending: Option<H> },
}

pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    state: LoopState<S::Handle>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        FrameLoop {
            scheduler,
            state: LoopState::Unmounted,
        }
    }

    pub fn state(&self) -> LoopState<S::Handle> {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    pub fn pending(&self) -> Option<S::Handle> {
        match self.state {
            LoopState::Running { pending } => pending,
            LoopState::Unmounted => None,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Starts the loop and asks for the first frame. Mounting a running loop
    /// does nothing; a refused request leaves the loop unmounted.
    pub fn mount(&mut self) -> Result<(), BackgroundError> {
        if self.is_running() {
            return Ok(());
        }
        self.state = LoopState::Running { pending: None };
        let scheduled = self.schedule_next();
        if scheduled.is_err() {
            self.state = LoopState::Unmounted;
        }
        scheduled
    }

    /// Called from the frame callback. Returns false when the callback is
    /// stale and the frame should not be drawn.
    pub fn frame_fired(&mut self) -> bool {
        match &mut self.state {
            LoopState::Running { pending } => {
                *pending = None;
                true
            }
            LoopState::Unmounted => false,
        }
    }

    pub fn schedule_next(&mut self) -> Result<(), BackgroundError> {
        if let LoopState::Running { pending } = self.state {
            if pending.is_some() {
                return Ok(());
            }
            let handle = self.scheduler.request_frame()?;
            self.state = LoopState::Running {
                pending: Some(handle),
            };
        }
        Ok(())
    }

    pub fn unmount(&mut self) {
        if let Some(handle) = self.pending() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = LoopState::Unmounted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct SpyScheduler {
        next: u32,
        requested: Vec<u32>,
        cancelled: Vec<u32>,
        refuse: bool,
    }

    impl SpyScheduler {
        fn outstanding(&self) -> Vec<u32> {
            self.requested
                .iter()
                .copied()
                .filter(|handle| !self.cancelled.contains(handle))
                .collect()
        }
    }

    impl FrameScheduler for SpyScheduler {
        type Handle = u32;

        fn request_frame(&mut self) -> Result<u32, BackgroundError> {
            if self.refuse {
                return Err(BackgroundError::Schedule("refused".to_owned()));
            }
            self.next += 1;
            self.requested.push(self.next);
            Ok(self.next)
        }

        fn cancel_frame(&mut self, handle: u32) {
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn mount_requests_first_frame() {
        let mut frames = FrameLoop::new(SpyScheduler::default());
        assert_eq!(frames.state(), LoopState::Unmounted);
        frames.mount().unwrap();
        assert!(frames.is_running());
        assert_eq!(frames.pending(), Some(1));
        assert_eq!(frames.scheduler().requested, vec![1]);
    }

    #[test]
    fn unmount_before_first_frame_leaves_nothing_pending() {
        let mut frames = FrameLoop::new(SpyScheduler::default());
        frames.mount().unwrap();
        frames.unmount();
        assert_eq!(frames.state(), LoopState::Unmounted);
        assert_eq!(frames.scheduler().cancelled, vec![1]);
        assert!(frames.scheduler().outstanding().is_empty());
    }

    #[test]
    fn each_frame_schedules_exactly_one_successor() {
        let mut frames = FrameLoop::new(SpyScheduler::default());
        frames.mount().unwrap();
        for expected in 2..=5 {
            assert!(frames.frame_fired());
            assert_eq!(frames.pending(), None);
            frames.schedule_next().unwrap();
            frames.schedule_next().unwrap();
            assert_eq!(frames.pending(), Some(expected));
        }
        assert_eq!(frames.scheduler().requested, vec![1, 2, 3, 4, 5]);
        frames.unmount();
        assert_eq!(frames.pending(), None);
        assert_eq!(frames.scheduler().cancelled, vec![5]);
    }

    #[test]
    fn stale_callback_after_unmount_is_ignored() {
        let mut frames = FrameLoop::new(SpyScheduler::default());
        frames.mount().unwrap();
        frames.unmount();
        assert!(!frames.frame_fired());
        frames.schedule_next().unwrap();
        assert_eq!(frames.scheduler().requested, vec![1]);
    }

    #[test]
    fn unmount_is_idempotent() {
        let mut frames = FrameLoop::new(SpyScheduler::default());
        frames.unmount();
        frames.mount().unwrap();
        frames.unmount();
        frames.unmount();
        assert_eq!(frames.scheduler().cancelled, vec![1]);
    }

    #[test]
    fn remount_restarts_the_loop() {
        let mut frames = FrameLoop::new(SpyScheduler::default());
        frames.mount().unwrap();
        frames.mount().unwrap();
        assert_eq!(frames.scheduler().requested, vec![1]);
        frames.unmount();
        frames.mount().unwrap();
        assert_eq!(frames.pending(), Some(2));
    }

    #[test]
    fn refused_request_surfaces_error() {
        let mut frames = FrameLoop::new(SpyScheduler {
            refuse: true,
            ..SpyScheduler::default()
        });
        assert_eq!(
            frames.mount(),
            Err(BackgroundError::Schedule("refused".to_owned()))
        );
        assert!(!frames.is_running());
    }
}
