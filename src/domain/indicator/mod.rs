//! Technical indicators.
//!
//! An [`Indicator`] is a lazy function from bar index to value over a
//! borrowed [`BarSeries`]: evaluating index `i` must be deterministic and
//! side-effect-free for any `i` up to the series' current end. Indicators
//! hold no mutable state, so a rule composed of them can be shared freely
//! between threads as long as the series is not mutated mid-call.

pub mod atr;
pub mod true_range;

use super::error::TrailstopError;
use super::num::Num;
use super::series::BarSeries;

pub trait Indicator {
    type Num: Num;

    /// The indicator value at `index`. Out-of-range indices are errors.
    fn value(&self, index: usize) -> Result<Self::Num, TrailstopError>;
}

/// Close price of the bar at the queried index.
#[derive(Debug, Clone, Copy)]
pub struct ClosePrice<'a, N: Num> {
    series: &'a BarSeries<N>,
}

impl<'a, N: Num> ClosePrice<'a, N> {
    pub fn new(series: &'a BarSeries<N>) -> Self {
        ClosePrice { series }
    }
}

impl<N: Num> Indicator for ClosePrice<'_, N> {
    type Num = N;

    fn value(&self, index: usize) -> Result<N, TrailstopError> {
        Ok(self.series.bar(index)?.close)
    }
}

/// High price of the bar at the queried index.
#[derive(Debug, Clone, Copy)]
pub struct HighPrice<'a, N: Num> {
    series: &'a BarSeries<N>,
}

impl<'a, N: Num> HighPrice<'a, N> {
    pub fn new(series: &'a BarSeries<N>) -> Self {
        HighPrice { series }
    }
}

impl<N: Num> Indicator for HighPrice<'_, N> {
    type Num = N;

    fn value(&self, index: usize) -> Result<N, TrailstopError> {
        Ok(self.series.bar(index)?.high)
    }
}

/// Low price of the bar at the queried index.
#[derive(Debug, Clone, Copy)]
pub struct LowPrice<'a, N: Num> {
    series: &'a BarSeries<N>,
}

impl<'a, N: Num> LowPrice<'a, N> {
    pub fn new(series: &'a BarSeries<N>) -> Self {
        LowPrice { series }
    }
}

impl<N: Num> Indicator for LowPrice<'_, N> {
    type Num = N;

    fn value(&self, index: usize) -> Result<N, TrailstopError> {
        Ok(self.series.bar(index)?.low)
    }
}
