use serde::{Deserialize, Serialize};

/// One hourly call-volume sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub time_label: String,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_label: impl Into<String>, value: f64) -> Self {
        Self {
            time_label: time_label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSlice {
    pub name: String,
    pub value: f64,
}

impl SentimentSlice {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

pub const DEFAULT_SLOT_INDEX: usize = 2;

/// Chart colors as RGB triples: sky, indigo, purple, pink.
pub const PALETTE: [(u8, u8, u8); 4] = [
    (56, 189, 248),
    (129, 140, 248),
    (192, 132, 252),
    (244, 114, 182),
];

pub fn palette_rgb(idx: usize) -> (u8, u8, u8) {
    PALETTE[idx % PALETTE.len()]
}

pub fn seed_call_volume() -> Vec<TimeSeriesPoint> {
    [
        ("09:00", 120.0),
        ("10:00", 240.0),
        ("11:00", 340.0),
        ("12:00", 280.0),
        ("13:00", 150.0),
        ("14:00", 310.0),
        ("15:00", 450.0),
    ]
    .into_iter()
    .map(|(time, calls)| TimeSeriesPoint::new(time, calls))
    .collect()
}

pub fn seed_sentiment() -> Vec<SentimentSlice> {
    vec![
        SentimentSlice::new("Positive", 400.0),
        SentimentSlice::new("Neutral", 300.0),
        SentimentSlice::new("Negative", 300.0),
    ]
}

/// Name under which an override for `point` is stored remotely.
pub fn slot_label(point: &TimeSeriesPoint) -> String {
    format!("Calls at {}", point.time_label)
}
