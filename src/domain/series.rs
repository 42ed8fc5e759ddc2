//! Append-only bar series with stable indices.
//!
//! Indices are assigned at append time and never move: when a maximum bar
//! count evicts old bars, `begin_index` advances and queries into the evicted
//! range fail with a range error instead of silently answering from the
//! oldest retained bar.

use std::collections::VecDeque;

use super::bar::Bar;
use super::error::TrailstopError;
use super::num::Num;

#[derive(Debug, Clone)]
pub struct BarSeries<N: Num> {
    name: String,
    bars: VecDeque<Bar<N>>,
    removed: usize,
    max_bar_count: Option<usize>,
}

impl<N: Num> BarSeries<N> {
    pub fn new(name: impl Into<String>) -> Self {
        BarSeries {
            name: name.into(),
            bars: VecDeque::new(),
            removed: 0,
            max_bar_count: None,
        }
    }

    /// A series that retains at most `max_bar_count` bars, dropping the
    /// oldest on overflow.
    pub fn with_max_bar_count(
        name: impl Into<String>,
        max_bar_count: usize,
    ) -> Result<Self, TrailstopError> {
        if max_bar_count == 0 {
            return Err(TrailstopError::InvalidMaxBarCount {
                count: max_bar_count,
            });
        }
        Ok(BarSeries {
            name: name.into(),
            bars: VecDeque::new(),
            removed: 0,
            max_bar_count: Some(max_bar_count),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a bar. Its date must advance the series.
    pub fn add_bar(&mut self, bar: Bar<N>) -> Result<(), TrailstopError> {
        if let Some(last) = self.bars.back() {
            if bar.date <= last.date {
                return Err(TrailstopError::OutOfOrderBar {
                    date: bar.date,
                    last: last.date,
                });
            }
        }
        self.bars.push_back(bar);
        if let Some(max) = self.max_bar_count {
            while self.bars.len() > max {
                self.bars.pop_front();
                self.removed += 1;
            }
        }
        Ok(())
    }

    /// The bar at `index`, which must lie in `[begin_index, end_index]`.
    pub fn bar(&self, index: usize) -> Result<&Bar<N>, TrailstopError> {
        let end = self.end_index().ok_or(TrailstopError::EmptySeries)?;
        let begin = self.begin_index();
        if index < begin || index > end {
            return Err(TrailstopError::IndexOutOfRange { index, begin, end });
        }
        Ok(&self.bars[index - self.removed])
    }

    /// Index of the oldest retained bar.
    pub fn begin_index(&self) -> usize {
        self.removed
    }

    /// Index of the newest bar, `None` while the series is empty.
    pub fn end_index(&self) -> Option<usize> {
        if self.bars.is_empty() {
            None
        } else {
            Some(self.removed + self.bars.len() - 1)
        }
    }

    /// Number of retained bars.
    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Convert a literal into the series' numeric backing.
    pub fn num_of(&self, value: f64) -> Result<N, TrailstopError> {
        N::from_f64(value).ok_or(TrailstopError::NumericConversion { value })
    }
}
