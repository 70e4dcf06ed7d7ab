//! Repeating per-frame tasks with explicit stop handles.

use std::cell::Cell;
use std::rc::Rc;

/// Shared run flag for a frame task. Clones observe the same flag.
#[derive(Clone, Debug)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
}

impl Default for LoopHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopHandle {
    pub fn new() -> Self {
        Self {
            running: Rc::new(Cell::new(true)),
        }
    }

    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// Something advanced once per animation frame.
pub trait FrameTask {
    fn frame(&mut self, now_ms: f64);
}

/// Deterministic frame source: steps a task at a fixed interval while its
/// handle is running.
#[derive(Debug)]
pub struct ManualFrames {
    now_ms: f64,
    interval_ms: f64,
}

impl ManualFrames {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            now_ms: 0.0,
            interval_ms,
        }
    }

    pub fn now(&self) -> f64 {
        self.now_ms
    }

    /// Runs up to `frames` frames; returns how many actually ran.
    pub fn run<T: FrameTask + ?Sized>(&mut self, task: &mut T, handle: &LoopHandle, frames: usize) -> usize {
        let mut ran = 0;
        for _ in 0..frames {
            if !handle.is_running() {
                break;
            }
            self.now_ms += self.interval_ms;
            task.frame(self.now_ms);
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Count(Vec<f64>);

    impl FrameTask for Count {
        fn frame(&mut self, now_ms: f64) {
            self.0.push(now_ms);
        }
    }

    #[test]
    fn test_manual_frames_step_clock() {
        let mut frames = ManualFrames::new(16.0);
        let mut task = Count(Vec::new());
        let handle = LoopHandle::new();
        assert_eq!(frames.run(&mut task, &handle, 3), 3);
        assert_eq!(task.0, vec![16.0, 32.0, 48.0]);
        assert_eq!(frames.now(), 48.0);
    }

    #[test]
    fn test_stopped_handle_halts_loop() {
        let mut frames = ManualFrames::new(16.0);
        let mut task = Count(Vec::new());
        let handle = LoopHandle::new();
        let remote = handle.clone();
        frames.run(&mut task, &handle, 2);
        remote.stop();
        assert_eq!(frames.run(&mut task, &handle, 5), 0);
        assert_eq!(task.0.len(), 2);
    }
}
