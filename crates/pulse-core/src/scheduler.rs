use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Periodic timer facility. `cancel` on a handle that is unknown or already
/// cancelled returns `false` and does nothing else.
pub trait Scheduler {
    fn schedule(&mut self, interval: Duration, callback: TickCallback) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle) -> bool;
    fn active_timers(&self) -> usize;
}

struct ManualTimer {
    interval: Duration,
    elapsed: Duration,
    callback: TickCallback,
}

/// Scheduler driven by explicit [`ManualScheduler::advance`] calls.
#[derive(Default)]
pub struct ManualScheduler {
    next_id: u64,
    timers: BTreeMap<TimerHandle, ManualTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward and fires each live timer once per full
    /// interval elapsed. Returns the number of callbacks fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let mut fired = 0;
        for timer in self.timers.values_mut() {
            timer.elapsed += by;
            while !timer.interval.is_zero() && timer.elapsed >= timer.interval {
                timer.elapsed -= timer.interval;
                (timer.callback)();
                fired += 1;
            }
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, interval: Duration, callback: TickCallback) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.timers.insert(
            handle,
            ManualTimer {
                interval,
                elapsed: Duration::ZERO,
                callback,
            },
        );
        debug!(timer = handle.id(), interval_ms = interval.as_millis() as u64, "manual timer scheduled");
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(&handle).is_some()
    }

    fn active_timers(&self) -> usize {
        self.timers.len()
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("next_id", &self.next_id)
            .field("timers", &self.timers.len())
            .finish()
    }
}
