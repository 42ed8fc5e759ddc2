//! ATR trailing stop-loss rule.
//!
//! Exits a position once the reference price crosses a trailing stop set
//! `multiplier * ATR(lookback)` away from it. The stop trails a watermark:
//! for a long position it is the highest `ref(k) - m*ATR(k)` seen since
//! entry and only ever rises; for a short it is the lowest
//! `ref(k) + m*ATR(k)` and only ever falls. Equality counts as a breach.
//!
//! The watermark is recomputed from the entry index on every call: the rule
//! instance is shared across independent trading records, so it holds no
//! per-position state and every answer is a pure function of
//! (series, record, index).

use super::error::TrailstopError;
use super::indicator::atr::AverageTrueRange;
use super::indicator::{ClosePrice, Indicator};
use super::num::Num;
use super::position::{Side, TradingRecord};
use super::rule::Rule;
use super::series::BarSeries;

pub struct AtrTrailingStopLossRule<'a, N: Num> {
    series: &'a BarSeries<N>,
    reference: Reference<'a, N>,
    atr: AverageTrueRange<'a, N>,
    multiplier: N,
}

impl<N: Num> std::fmt::Debug for AtrTrailingStopLossRule<'_, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtrTrailingStopLossRule")
            .field("lookback", &self.atr.lookback())
            .field("multiplier", &self.multiplier)
            .finish_non_exhaustive()
    }
}

/// The reference-price slot: the series' own close by default, or any
/// caller-supplied indicator over the same series.
enum Reference<'a, N: Num> {
    Close(ClosePrice<'a, N>),
    Custom(&'a dyn Indicator<Num = N>),
}

impl<N: Num> Reference<'_, N> {
    fn value(&self, index: usize) -> Result<N, TrailstopError> {
        match self {
            Reference::Close(close) => close.value(index),
            Reference::Custom(indicator) => indicator.value(index),
        }
    }
}

impl<'a, N: Num> AtrTrailingStopLossRule<'a, N> {
    /// A rule that trails the close price of `series`.
    pub fn new(
        series: &'a BarSeries<N>,
        lookback: usize,
        multiplier: N,
    ) -> Result<Self, TrailstopError> {
        Self::build(
            series,
            Reference::Close(ClosePrice::new(series)),
            lookback,
            multiplier,
        )
    }

    /// A rule that trails a caller-supplied reference price over `series`.
    pub fn with_reference(
        series: &'a BarSeries<N>,
        reference: &'a dyn Indicator<Num = N>,
        lookback: usize,
        multiplier: N,
    ) -> Result<Self, TrailstopError> {
        Self::build(series, Reference::Custom(reference), lookback, multiplier)
    }

    fn build(
        series: &'a BarSeries<N>,
        reference: Reference<'a, N>,
        lookback: usize,
        multiplier: N,
    ) -> Result<Self, TrailstopError> {
        if multiplier < N::zero() {
            return Err(TrailstopError::InvalidMultiplier {
                multiplier: multiplier.to_string(),
            });
        }
        let atr = AverageTrueRange::new(series, lookback)?;
        Ok(AtrTrailingStopLossRule {
            series,
            reference,
            atr,
            multiplier,
        })
    }

    pub fn lookback(&self) -> usize {
        self.atr.lookback()
    }

    /// The trailing stop watermark at `index` for the record's open
    /// position, or `None` when there is no open position or the index
    /// precedes its entry.
    ///
    /// Both the query index and the entry index must lie in the series'
    /// retained range; a stale answer is never substituted for an evicted
    /// bar.
    pub fn stop_level(
        &self,
        index: usize,
        record: &TradingRecord<N>,
    ) -> Result<Option<N>, TrailstopError> {
        let Some(position) = record.current_position() else {
            return Ok(None);
        };
        if index < position.entry_index {
            return Ok(None);
        }

        self.series.bar(index)?;
        self.series.bar(position.entry_index)?;

        let begin = self.series.begin_index();
        let atr_values = self.atr.prefix(index)?;

        let mut watermark: Option<N> = None;
        for k in position.entry_index..=index {
            let stop = self.stop_for(k, atr_values[k - begin], position.side)?;
            watermark = Some(match watermark {
                None => stop,
                Some(mark) => match position.side {
                    Side::Long => mark.max(stop),
                    Side::Short => mark.min(stop),
                },
            });
        }
        Ok(watermark)
    }

    fn stop_for(&self, index: usize, atr: N, side: Side) -> Result<N, TrailstopError> {
        let reference = self.reference.value(index)?;
        Ok(match side {
            Side::Long => reference - self.multiplier * atr,
            Side::Short => reference + self.multiplier * atr,
        })
    }
}

impl<N: Num> Rule for AtrTrailingStopLossRule<'_, N> {
    type Num = N;

    fn is_satisfied(
        &self,
        index: usize,
        record: &TradingRecord<N>,
    ) -> Result<bool, TrailstopError> {
        let Some(position) = record.current_position() else {
            return Ok(false);
        };
        if index < position.entry_index {
            return Ok(false);
        }
        let Some(watermark) = self.stop_level(index, record)? else {
            return Ok(false);
        };
        let price = self.reference.value(index)?;
        Ok(match position.side {
            Side::Long => price <= watermark,
            Side::Short => price >= watermark,
        })
    }
}
