use crate::action::Action;
use crate::random::RandomSource;
use crate::scheduler::{Scheduler, TickCallback, TimerHandle};
use crate::state::DashboardState;
use std::time::Duration;
use tracing::{info, warn};

/// Owns a dashboard state together with its random source and its timer.
///
/// The scheduled callback only signals that a tick is due; whoever drives
/// the dashboard applies it with [`LiveDashboard::on_tick`], so ticks and
/// actions never interleave.
pub struct LiveDashboard<S: Scheduler> {
    state: DashboardState,
    rng: Box<dyn RandomSource + Send>,
    scheduler: S,
    interval: Duration,
    timer: Option<TimerHandle>,
}

impl<S: Scheduler> LiveDashboard<S> {
    pub fn new(
        state: DashboardState,
        rng: Box<dyn RandomSource + Send>,
        scheduler: S,
        interval: Duration,
    ) -> Self {
        Self {
            state,
            rng,
            scheduler,
            interval,
            timer: None,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Schedules the tick timer. A second call while running keeps the
    /// existing timer.
    pub fn start(&mut self, on_due: TickCallback) -> TimerHandle {
        if let Some(handle) = self.timer {
            warn!(timer = handle.id(), "dashboard timer already running; start ignored");
            return handle;
        }
        let handle = self.scheduler.schedule(self.interval, on_due);
        info!(
            timer = handle.id(),
            interval_ms = self.interval.as_millis() as u64,
            "dashboard timer started"
        );
        self.timer = Some(handle);
        handle
    }

    /// Cancels the tick timer. Safe to call any number of times, including
    /// before `start`.
    pub fn stop(&mut self) {
        let Some(handle) = self.timer.take() else {
            return;
        };
        if self.scheduler.cancel(handle) {
            info!(timer = handle.id(), "dashboard timer cancelled");
        } else {
            warn!(timer = handle.id(), "dashboard timer was not known to the scheduler");
        }
    }

    pub fn on_tick(&mut self) {
        self.state = self.state.clone().tick(&mut *self.rng);
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state = self.state.clone().apply(action);
    }
}

impl<S: Scheduler> Drop for LiveDashboard<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;
    use crate::scheduler::ManualScheduler;
    use std::sync::mpsc;

    fn dashboard() -> LiveDashboard<ManualScheduler> {
        LiveDashboard::new(
            DashboardState::seeded(),
            Box::new(SequenceRandom::new(vec![0.5])),
            ManualScheduler::new(),
            Duration::from_millis(1800),
        )
    }

    #[test]
    fn start_twice_keeps_single_timer() {
        let mut live = dashboard();
        let first = live.start(Box::new(|| {}));
        let second = live.start(Box::new(|| {}));
        assert_eq!(first, second);
        assert_eq!(live.scheduler().active_timers(), 1);
        assert!(live.is_running());
    }

    #[test]
    fn stop_is_idempotent_and_safe_before_start() {
        let mut live = dashboard();
        live.stop();
        live.start(Box::new(|| {}));
        live.stop();
        live.stop();
        assert!(!live.is_running());
        assert_eq!(live.scheduler().active_timers(), 0);
    }

    #[test]
    fn due_signals_drive_ticks() {
        let (tx, rx) = mpsc::channel();
        let mut live = dashboard();
        live.start(Box::new(move || {
            let _ = tx.send(());
        }));
        live.scheduler_mut().advance(Duration::from_millis(3600));
        while rx.try_recv().is_ok() {
            live.on_tick();
        }
        assert_eq!(live.state().tick_count, 2);
    }

    #[test]
    fn dispatch_applies_action() {
        let mut live = dashboard();
        live.dispatch(Action::GenerateReport);
        assert_eq!(live.state().last_action, "Report compiled and shared.");
    }
}
