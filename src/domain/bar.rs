//! OHLCV bar representation.

use chrono::NaiveDate;

use super::error::TrailstopError;
use super::num::Num;

/// One period's open/high/low/close prices, volume, and close date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar<N: Num> {
    pub date: NaiveDate,
    pub open: N,
    pub high: N,
    pub low: N,
    pub close: N,
    pub volume: i64,
}

impl<N: Num> Bar<N> {
    /// Build a bar, rejecting prices that violate `low <= open,close <= high`.
    pub fn new(
        date: NaiveDate,
        open: N,
        high: N,
        low: N,
        close: N,
        volume: i64,
    ) -> Result<Self, TrailstopError> {
        if low > high {
            return Err(TrailstopError::InvalidBar {
                date,
                reason: format!("low {low} above high {high}"),
            });
        }
        if open < low || open > high {
            return Err(TrailstopError::InvalidBar {
                date,
                reason: format!("open {open} outside [{low}, {high}]"),
            });
        }
        if close < low || close > high {
            return Err(TrailstopError::InvalidBar {
                date,
                reason: format!("close {close} outside [{low}, {high}]"),
            });
        }
        Ok(Bar {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// (high + low + close) / 3
    pub fn typical_price(&self) -> N {
        (self.high + self.low + self.close) / N::from_usize(3)
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: N) -> N {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}
