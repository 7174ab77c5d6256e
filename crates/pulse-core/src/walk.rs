//! Bounded random walk applied to stats and tickers on every tick.
//!
//! Sampling and application are split: [`StatDrift::sample`] and
//! [`sample_ticker_change`] consume draws, [`walk_stat`] and [`walk_ticker`]
//! are pure so exact outcomes can be asserted from fixed drifts.

use crate::model::{round2, Stat, Ticker, Trend};
use crate::random::RandomSource;

pub const PERCENT_DRIFT: (f64, f64) = (-0.2, 0.3);
pub const ABSOLUTE_DRIFT: (f64, f64) = (-240.0, 260.0);
pub const DELTA_DRIFT: (f64, f64) = (-0.4, 0.5);
pub const TICKER_CHANGE: (f64, f64) = (-1.8, 1.9);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatDrift {
    pub value: f64,
    pub delta: f64,
}

impl StatDrift {
    /// Value drift first, then delta drift.
    pub fn sample(stat: &Stat, rng: &mut dyn RandomSource) -> Self {
        let (min, max) = if stat.is_percent() {
            PERCENT_DRIFT
        } else {
            ABSOLUTE_DRIFT
        };
        let value = rng.uniform(min, max);
        let delta = rng.uniform(DELTA_DRIFT.0, DELTA_DRIFT.1);
        Self { value, delta }
    }
}

pub fn walk_stat(stat: &Stat, drift: StatDrift) -> Stat {
    let value = round2(stat.value + drift.value).max(0.0);
    let delta = round2(stat.delta + drift.delta);
    Stat {
        value,
        delta,
        trend: Trend::from_delta(delta),
        ..stat.clone()
    }
}

pub fn sample_ticker_change(rng: &mut dyn RandomSource) -> f64 {
    rng.uniform(TICKER_CHANGE.0, TICKER_CHANGE.1)
}

/// The new change replaces the old one; it does not accumulate.
pub fn walk_ticker(ticker: &Ticker, raw_change: f64) -> Ticker {
    let change = round2(raw_change);
    let price = round2(ticker.price + change);
    Ticker {
        price,
        change,
        trend: Trend::from_delta(change),
        ..ticker.clone()
    }
}

pub fn walk_stats(stats: &[Stat], rng: &mut dyn RandomSource) -> Vec<Stat> {
    stats
        .iter()
        .map(|stat| {
            let drift = StatDrift::sample(stat, rng);
            walk_stat(stat, drift)
        })
        .collect()
}

pub fn walk_tickers(tickers: &[Ticker], rng: &mut dyn RandomSource) -> Vec<Ticker> {
    tickers
        .iter()
        .map(|ticker| walk_ticker(ticker, sample_ticker_change(rng)))
        .collect()
}
