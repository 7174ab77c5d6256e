use crate::model::{ActivityEntry, Tone};
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const ACTIVITY_CAPACITY: usize = 6;
pub const BEAT_THRESHOLD: f64 = 0.4;
pub const SYNTHETIC_BEATS: [&str; 5] = [
    "Liquidity spike detected",
    "Market pulse stabilised",
    "Arb signal confirmed",
    "Latency drop: 12ms",
    "Trade burst from sector 7",
];

/// Newest-first activity log holding at most [`ACTIVITY_CAPACITY`] entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "Vec<ActivityEntry>", into = "Vec<ActivityEntry>")]
pub struct ActivityFeed {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a feed from entries already ordered newest first.
    pub fn from_entries(entries: impl IntoIterator<Item = ActivityEntry>) -> Self {
        let mut entries: VecDeque<ActivityEntry> = entries.into_iter().collect();
        entries.truncate(ACTIVITY_CAPACITY);
        Self { entries }
    }

    pub fn push(&mut self, label: &str, tone: Tone) {
        self.entries.push_front(ActivityEntry::just_now(label, tone));
        self.entries.truncate(ACTIVITY_CAPACITY);
    }

    pub fn push_info(&mut self, label: &str) {
        self.push(label, Tone::Info);
    }

    /// Pushes a synthetic beat when the first draw clears the threshold.
    /// The second draw, taken only on a hit, picks the label.
    pub fn maybe_push_beat(&mut self, rng: &mut dyn RandomSource) -> Option<&'static str> {
        if rng.next_unit() <= BEAT_THRESHOLD {
            return None;
        }
        let index = (rng.next_unit() * SYNTHETIC_BEATS.len() as f64) as usize;
        let label = SYNTHETIC_BEATS[index.min(SYNTHETIC_BEATS.len() - 1)];
        self.push_info(label);
        Some(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }
}

impl From<Vec<ActivityEntry>> for ActivityFeed {
    fn from(entries: Vec<ActivityEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<ActivityFeed> for Vec<ActivityEntry> {
    fn from(feed: ActivityFeed) -> Self {
        feed.entries.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    #[test]
    fn push_prepends_with_just_now() {
        let mut feed = ActivityFeed::new();
        feed.push("Pulse broadcasted", Tone::Success);
        feed.push_info("Node sync queued");
        let latest = feed.latest().expect("latest entry");
        assert_eq!(latest.label, "Node sync queued");
        assert_eq!(latest.time, "just now");
        assert_eq!(latest.tone, Some(Tone::Info));
        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn seventh_push_evicts_oldest() {
        let mut feed = ActivityFeed::new();
        for index in 1..=7 {
            feed.push_info(&format!("entry {index}"));
            assert!(feed.len() <= ACTIVITY_CAPACITY);
        }
        let labels: Vec<&str> = feed.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["entry 7", "entry 6", "entry 5", "entry 4", "entry 3", "entry 2"]
        );
    }

    #[test]
    fn from_entries_truncates_to_capacity() {
        let entries = (0..9).map(|index| ActivityEntry::new(&format!("e{index}"), "1h", Tone::Info));
        let feed = ActivityFeed::from_entries(entries);
        assert_eq!(feed.len(), ACTIVITY_CAPACITY);
        assert_eq!(feed.latest().map(|entry| entry.label.as_str()), Some("e0"));
    }

    #[test]
    fn loaded_feed_keeps_newest_six() {
        let json = serde_json::to_string(
            &(0..9)
                .map(|index| ActivityEntry::new(&format!("e{index}"), "1h", Tone::Info))
                .collect::<Vec<_>>(),
        )
        .expect("serialize entries");
        let feed: ActivityFeed = serde_json::from_str(&json).expect("parse feed");
        assert_eq!(feed.len(), ACTIVITY_CAPACITY);
        assert_eq!(feed.latest().map(|entry| entry.label.as_str()), Some("e0"));

        let value = serde_json::to_value(&feed).expect("serialize feed");
        assert_eq!(value.as_array().map(Vec::len), Some(ACTIVITY_CAPACITY));
    }

    #[test]
    fn beat_skipped_at_or_below_threshold() {
        let mut feed = ActivityFeed::new();
        let mut rng = SequenceRandom::new(vec![0.4]);
        assert_eq!(feed.maybe_push_beat(&mut rng), None);
        assert!(feed.is_empty());
        assert_eq!(rng.consumed(), 1);
    }

    #[test]
    fn beat_label_picked_by_second_draw() {
        let mut feed = ActivityFeed::new();
        let mut rng = SequenceRandom::new(vec![0.41, 0.0, 0.9, 0.99]);
        assert_eq!(feed.maybe_push_beat(&mut rng), Some("Liquidity spike detected"));
        assert_eq!(feed.maybe_push_beat(&mut rng), Some("Trade burst from sector 7"));
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.latest().and_then(|entry| entry.tone), Some(Tone::Info));
    }
}
