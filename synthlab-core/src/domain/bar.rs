//! Spot and futures bars: one row per trading timestamp.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Index spot bar for a single timestamp.
///
/// Open and close both carry the walk value for the step; high and low are
/// the same value scaled up and down by an independent wick draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotBar {
    pub datetime: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl SpotBar {
    /// Basic OHLC sanity check: high >= close >= low, open within range, prices positive.
    pub fn is_sane(&self) -> bool {
        ohlc_is_sane(self.open, self.high, self.low, self.close)
    }
}

/// Index futures bar for a single timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturesBar {
    pub datetime: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub open_interest: u64,
    pub expiry: NaiveDate,
}

impl FuturesBar {
    pub fn is_sane(&self) -> bool {
        ohlc_is_sane(self.open, self.high, self.low, self.close)
    }
}

fn ohlc_is_sane(open: f64, high: f64, low: f64, close: f64) -> bool {
    if open.is_nan() || high.is_nan() || low.is_nan() || close.is_nan() {
        return false;
    }
    high >= low
        && high >= open
        && high >= close
        && low <= open
        && low <= close
        && open > 0.0
        && close > 0.0
}
