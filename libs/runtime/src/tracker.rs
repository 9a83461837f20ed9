//! Tracking of runtime processes that are still running.
//!
//! A started runtime process is always waited for. On shutdown the tracker is
//! closed so no new process starts, and the caller waits for it to go idle
//! before dropping the work that spawned the running ones.

use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default)]
struct State {
    running: usize,
    closed: bool,
}

/// Counts runtime processes currently being waited on.
#[derive(Debug, Clone)]
pub struct ChildTracker {
    state: Arc<watch::Sender<State>>,
}

impl ChildTracker {
    /// Create an open tracker with no running processes.
    pub fn new() -> Self {
        let (state, _) = watch::channel(State::default());
        Self {
            state: Arc::new(state),
        }
    }

    /// Number of processes currently running.
    pub fn running(&self) -> usize {
        self.state.borrow().running
    }

    /// Whether no process is running.
    pub fn is_idle(&self) -> bool {
        self.running() == 0
    }

    /// Whether new processes are refused.
    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }

    /// Refuse new processes. Running ones are unaffected.
    pub fn close(&self) {
        self.state.send_modify(|s| s.closed = true);
    }

    /// Mark a process as running until the returned guard is dropped.
    ///
    /// Returns `None` once the tracker is closed.
    pub fn enter(&self) -> Option<ChildGuard> {
        let mut entered = false;
        self.state.send_if_modified(|s| {
            if s.closed {
                return false;
            }
            s.running += 1;
            entered = true;
            true
        });
        entered.then(|| ChildGuard {
            tracker: self.clone(),
        })
    }

    /// Wait until no process is running.
    pub async fn wait_idle(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|s| s.running == 0).await;
    }
}

impl Default for ChildTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a process counted as running while alive.
#[derive(Debug)]
pub struct ChildGuard {
    tracker: ChildTracker,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.tracker
            .state
            .send_modify(|s| s.running = s.running.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_guard_counts_running() {
        let tracker = ChildTracker::new();
        assert!(tracker.is_idle());

        let first = tracker.enter().unwrap();
        let second = tracker.clone().enter().unwrap();
        assert_eq!(tracker.running(), 2);

        drop(first);
        assert_eq!(tracker.running(), 1);
        drop(second);
        assert!(tracker.is_idle());
    }

    #[test]
    fn test_closed_tracker_refuses_new_processes() {
        let tracker = ChildTracker::new();
        let running = tracker.enter().unwrap();

        tracker.close();
        assert!(tracker.is_closed());
        assert!(tracker.enter().is_none());
        assert_eq!(tracker.running(), 1);

        drop(running);
        assert!(tracker.is_idle());
    }

    #[tokio::test]
    async fn test_wait_idle_returns_when_guard_drops() {
        let tracker = ChildTracker::new();
        let guard = tracker.enter().unwrap();

        let release = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            drop(guard);
        });

        tokio::time::timeout(Duration::from_secs(5), tracker.wait_idle())
            .await
            .unwrap();
        assert!(tracker.is_idle());
        release.await.unwrap();
    }

    #[tokio::test]
    async fn test_wait_idle_on_idle_tracker() {
        let tracker = ChildTracker::new();
        tokio::time::timeout(Duration::from_secs(1), tracker.wait_idle())
            .await
            .unwrap();
    }
}
