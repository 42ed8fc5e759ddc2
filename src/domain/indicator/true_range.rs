//! True Range indicator.
//!
//! TR(i) = max(high - low, |high - prev_close|, |low - prev_close|).
//! The first retained bar has no predecessor, so its TR falls back to
//! high - low. Always non-negative.

use crate::domain::error::TrailstopError;
use crate::domain::indicator::Indicator;
use crate::domain::num::Num;
use crate::domain::series::BarSeries;

#[derive(Debug, Clone, Copy)]
pub struct TrueRange<'a, N: Num> {
    series: &'a BarSeries<N>,
}

impl<'a, N: Num> TrueRange<'a, N> {
    pub fn new(series: &'a BarSeries<N>) -> Self {
        TrueRange { series }
    }

    pub(crate) fn series(&self) -> &'a BarSeries<N> {
        self.series
    }
}

impl<N: Num> Indicator for TrueRange<'_, N> {
    type Num = N;

    fn value(&self, index: usize) -> Result<N, TrailstopError> {
        let bar = self.series.bar(index)?;
        if index == self.series.begin_index() {
            return Ok(bar.high - bar.low);
        }
        let prev_close = self.series.bar(index - 1)?.close;
        Ok(bar.true_range(prev_close))
    }
}
