pub mod action;
pub mod config;
pub mod feed;
pub mod live;
pub mod model;
pub mod random;
pub mod scheduler;
pub mod state;
pub mod walk;

pub use action::Action;
pub use config::{ConfigError, DashboardConfig, DEFAULT_TICK_INTERVAL_MS};
pub use feed::{ActivityFeed, ACTIVITY_CAPACITY, SYNTHETIC_BEATS};
pub use live::LiveDashboard;
pub use model::{round2, ActivityEntry, Mission, Stat, Ticker, Tone, Trend};
pub use random::{RandomSource, SeededRandom, SequenceRandom};
pub use scheduler::{ManualScheduler, Scheduler, TickCallback, TimerHandle};
pub use state::DashboardState;
