use crate::action::Action;
use crate::feed::ActivityFeed;
use crate::model::{ActivityEntry, Mission, Stat, Ticker, Tone};
use crate::random::RandomSource;
use crate::walk::{walk_stats, walk_tickers};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_SECTION: &str = "Dashboard";
pub const IDLE_MESSAGE: &str = "System idle — awaiting command.";

/// Everything the rendering layer reads. Transitions consume the state and
/// hand back its successor; stats and tickers are rebuilt, never edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardState {
    pub active_section: String,
    pub last_action: String,
    pub pulse_count: u64,
    pub tick_count: u64,
    pub stats: Vec<Stat>,
    pub tickers: Vec<Ticker>,
    pub activity: ActivityFeed,
    missions: Vec<Mission>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::seeded()
    }
}

impl DashboardState {
    pub fn seeded() -> Self {
        Self::with_missions(
            vec![
                Stat::new("Energy", 84290.0, None, 12.4),
                Stat::new("Active Nodes", 12480.0, None, 5.1),
                Stat::new("Alerts", 1240.0, None, -2.3),
                Stat::new("Conversion", 3.9, Some("%"), 0.4),
            ],
            vec![
                Ticker::new("NEO", 428.12, 1.24),
                Ticker::new("LUX", 91.48, -0.32),
                Ticker::new("PRISM", 238.03, 0.14),
                Ticker::new("VOLT", 61.29, 0.0),
                Ticker::new("ORBIT", 129.77, -0.85),
            ],
            ActivityFeed::from_entries([
                ActivityEntry::new("New pulse detected", "2m", Tone::Success),
                ActivityEntry::new("Voltage spike resolved", "10m", Tone::Warn),
                ActivityEntry::new("System sync complete", "1h", Tone::Info),
                ActivityEntry::new("Quantum ping delivered", "3h", Tone::Info),
            ]),
            vec![
                Mission::new("Aurora UI", "On Track", "Amina", "Feb 20"),
                Mission::new("Photon App", "At Risk", "Yassine", "Mar 12"),
                Mission::new("Neon API", "On Track", "Sara", "Mar 28"),
            ],
        )
    }

    pub fn with_missions(
        stats: Vec<Stat>,
        tickers: Vec<Ticker>,
        activity: ActivityFeed,
        missions: Vec<Mission>,
    ) -> Self {
        Self {
            active_section: DEFAULT_SECTION.to_string(),
            last_action: IDLE_MESSAGE.to_string(),
            pulse_count: 0,
            tick_count: 0,
            stats,
            tickers,
            activity,
            missions,
        }
    }

    /// Missions are fixed at construction; there is no mutable accessor.
    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    /// One timer tick: stats, then tickers, then the optional synthetic beat,
    /// all drawing from `rng` in that order.
    pub fn tick(mut self, rng: &mut dyn RandomSource) -> Self {
        self.stats = walk_stats(&self.stats, rng);
        self.tickers = walk_tickers(&self.tickers, rng);
        let beat = self.activity.maybe_push_beat(rng);
        self.tick_count = self.tick_count.wrapping_add(1);
        debug!(tick = self.tick_count, beat = ?beat, "dashboard tick applied");
        self
    }

    pub fn apply(mut self, action: Action) -> Self {
        match &action {
            Action::SelectSection(section) => {
                self.active_section = section.clone();
            }
            Action::TriggerPulse => {
                self.pulse_count += 1;
            }
            _ => {}
        }
        self.last_action = action.last_action_message();
        if let Some((label, tone)) = action.activity() {
            self.activity.push(label, tone);
        }
        info!(action = action.name(), pulses = self.pulse_count, "dashboard action");
        self
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
