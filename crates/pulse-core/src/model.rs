use serde::{Deserialize, Serialize};

pub const PERCENT_UNIT: &str = "%";
pub const JUST_NOW: &str = "just now";

/// Rounds to two decimal places, half away from zero.
///
/// Negative zero collapses to `0.0` so a rounded-away drift reads as flat
/// and never renders as `-0.00`.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn from_delta(delta: f64) -> Self {
        if delta == 0.0 {
            Trend::Flat
        } else if delta > 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Flat => "flat",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Info,
    Success,
    Warn,
}

/// Deserialization goes through [`StatRecord`] so a loaded stat always has a
/// non-negative value and a trend that agrees with its delta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "StatRecord")]
pub struct Stat {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub delta: f64,
    pub trend: Trend,
}

impl Stat {
    pub fn new(label: &str, value: f64, unit: Option<&str>, delta: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
            unit: unit.map(str::to_string),
            delta,
            trend: Trend::from_delta(delta),
        }
    }

    pub fn is_percent(&self) -> bool {
        self.unit.as_deref() == Some(PERCENT_UNIT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "TickerRecord")]
pub struct Ticker {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub trend: Trend,
}

impl Ticker {
    pub fn new(symbol: &str, price: f64, change: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            price,
            change,
            trend: Trend::from_delta(change),
        }
    }
}

#[derive(Deserialize)]
struct StatRecord {
    label: String,
    value: f64,
    #[serde(default)]
    unit: Option<String>,
    delta: f64,
}

impl From<StatRecord> for Stat {
    fn from(record: StatRecord) -> Self {
        Self {
            label: record.label,
            value: record.value.max(0.0),
            unit: record.unit,
            delta: record.delta,
            trend: Trend::from_delta(record.delta),
        }
    }
}

#[derive(Deserialize)]
struct TickerRecord {
    symbol: String,
    price: f64,
    change: f64,
}

impl From<TickerRecord> for Ticker {
    fn from(record: TickerRecord) -> Self {
        Self {
            symbol: record.symbol,
            price: record.price,
            change: record.change,
            trend: Trend::from_delta(record.change),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityEntry {
    pub label: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
}

impl ActivityEntry {
    pub fn new(label: &str, time: &str, tone: Tone) -> Self {
        Self {
            label: label.to_string(),
            time: time.to_string(),
            tone: Some(tone),
        }
    }

    pub fn just_now(label: &str, tone: Tone) -> Self {
        Self::new(label, JUST_NOW, tone)
    }

    /// Entries without an explicit tone render as info.
    pub fn tone_or_default(&self) -> Tone {
        self.tone.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mission {
    pub project: String,
    pub status: String,
    pub owner: String,
    pub due: String,
}

impl Mission {
    pub fn new(project: &str, status: &str, owner: &str, due: &str) -> Self {
        Self {
            project: project.to_string(),
            status: status.to_string(),
            owner: owner.to_string(),
            due: due.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_000_1), 1.24);
        assert_eq!(round2(-1.235_000_1), -1.24);
        assert_eq!(round2(150.0), 150.0);
    }

    #[test]
    fn round2_normalizes_negative_zero() {
        let value = round2(-0.001);
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
        assert_eq!(format!("{value:.2}"), "0.00");
    }

    #[test]
    fn trend_follows_sign_of_delta() {
        assert_eq!(Trend::from_delta(0.0), Trend::Flat);
        assert_eq!(Trend::from_delta(-0.0), Trend::Flat);
        assert_eq!(Trend::from_delta(0.01), Trend::Up);
        assert_eq!(Trend::from_delta(-0.01), Trend::Down);
    }

    #[test]
    fn constructors_derive_trend() {
        assert_eq!(Stat::new("Alerts", 1240.0, None, -2.3).trend, Trend::Down);
        assert_eq!(Ticker::new("VOLT", 61.29, 0.0).trend, Trend::Flat);
        assert!(Stat::new("Conversion", 3.9, Some("%"), 0.4).is_percent());
    }

    #[test]
    fn records_serialize_with_lowercase_enums() {
        let stat = Stat::new("Energy", 84290.0, None, 12.4);
        let json = serde_json::to_value(&stat).expect("serialize stat");
        assert_eq!(json["trend"], "up");
        assert!(json.get("unit").is_none());

        let entry = ActivityEntry::just_now("Report compiled", Tone::Success);
        let json = serde_json::to_value(&entry).expect("serialize entry");
        assert_eq!(json["tone"], "success");
        assert_eq!(json["time"], "just now");
    }

    #[test]
    fn loaded_stat_is_clamped_and_trend_rederived() {
        let stat: Stat = serde_json::from_str(
            r#"{"label":"Alerts","value":-5,"delta":3,"trend":"down"}"#,
        )
        .expect("parse stat");
        assert_eq!(stat.value, 0.0);
        assert_eq!(stat.trend, Trend::Up);
        assert_eq!(stat.unit, None);

        let ticker: Ticker =
            serde_json::from_str(r#"{"symbol":"VOLT","price":61.29,"change":0,"trend":"up"}"#)
                .expect("parse ticker");
        assert_eq!(ticker.trend, Trend::Flat);
    }
}
