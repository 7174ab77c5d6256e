use pulse_core::{Scheduler, TickCallback, TimerHandle};
use std::collections::HashMap;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// One spawned task per timer. Must be used from within a tokio runtime.
#[derive(Default)]
pub struct TokioScheduler {
    next_id: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, interval: Duration, mut callback: TickCallback) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::from_raw(self.next_id);
        let task = tokio::spawn(async move {
            // First tick lands one interval out, not immediately.
            let mut ticker =
                tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                callback();
            }
        });
        debug!(timer = handle.id(), "tokio timer spawned");
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.tasks.remove(&handle) {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    fn active_timers(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_callback(counter: &Arc<AtomicUsize>) -> TickCallback {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn timer_fires_every_interval_until_cancelled() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scheduler = TokioScheduler::new();
        let handle = scheduler.schedule(Duration::from_millis(1800), counting_callback(&counter));

        tokio::time::sleep(Duration::from_millis(1700)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(3700)).await;
        let fired = counter.load(Ordering::SeqCst);
        assert!(fired >= 2, "expected at least two ticks, got {fired}");

        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        tokio::time::sleep(Duration::from_millis(18_000)).await;
        assert_eq!(counter.load(Ordering::SeqCst), fired);
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_scheduler_aborts_timers() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scheduler = TokioScheduler::new();
        scheduler.schedule(Duration::from_millis(100), counting_callback(&counter));
        drop(scheduler);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
