//! Supervision for fire-and-forget background work.
//!
//! The orchestrator hands the video pipeline off without awaiting it, but
//! the task still runs under this tracker: spawns are counted, completions
//! logged, and shutdown can drain what is still in flight.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Default)]
pub struct TaskTracker {
    spawned: AtomicUsize,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl TaskTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a named background task under supervision.
    pub fn spawn<F>(&self, name: &str, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let name = name.to_string();
        self.spawned.fetch_add(1, Ordering::SeqCst);
        info!(task = %name, "Background task started");

        let handle = tokio::spawn(async move {
            fut.await;
            info!(task = %name, "Background task finished");
        });

        let mut handles = self.handles.lock().expect("task tracker poisoned");
        // Drop handles of tasks that already ran to completion
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Number of tasks spawned and not yet observed as finished.
    pub fn in_flight(&self) -> usize {
        let handles = self.handles.lock().expect("task tracker poisoned");
        handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Total tasks ever spawned.
    pub fn spawned(&self) -> usize {
        self.spawned.load(Ordering::SeqCst)
    }

    /// Await all currently tracked tasks (graceful shutdown).
    pub async fn drain(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut guard = self.handles.lock().expect("task tracker poisoned");
            guard.drain(..).collect()
        };

        for handle in handles {
            if let Err(e) = handle.await {
                warn!("Background task panicked: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_spawned_task_runs_to_completion() {
        let tracker = Arc::new(TaskTracker::new());
        let ran = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&ran);
        tracker.spawn("test_task", async move {
            flag.store(true, Ordering::SeqCst);
        });

        tracker.drain().await;
        assert!(ran.load(Ordering::SeqCst));
        assert_eq!(tracker.spawned(), 1);
        assert_eq!(tracker.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_drain_waits_for_slow_tasks() {
        let tracker = TaskTracker::new();
        let done = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&done);
        tracker.spawn("slow_task", async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            flag.store(true, Ordering::SeqCst);
        });

        tracker.drain().await;
        assert!(done.load(Ordering::SeqCst));
    }
}
