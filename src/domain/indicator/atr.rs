//! Average True Range indicator.
//!
//! Wilder's smoothing applied to the true range, seeded at the first
//! retained bar:
//!
//! - ATR(begin) = TR(begin)
//! - ATR(i) = (ATR(i-1) * (n-1) + TR(i)) / n
//!
//! The recurrence runs from the first bar rather than seeding with an n-bar
//! simple average, so every index from `begin_index` on has a defined value
//! and rules built on top of it never see a warmup gap. Evaluation is
//! strictly left-to-right; with a non-associative backing the result is the
//! recurrence's, not an algebraic rearrangement of it.

use crate::domain::error::TrailstopError;
use crate::domain::indicator::true_range::TrueRange;
use crate::domain::indicator::Indicator;
use crate::domain::num::Num;
use crate::domain::series::BarSeries;

#[derive(Debug, Clone, Copy)]
pub struct AverageTrueRange<'a, N: Num> {
    true_range: TrueRange<'a, N>,
    lookback: usize,
}

impl<'a, N: Num> AverageTrueRange<'a, N> {
    pub fn new(series: &'a BarSeries<N>, lookback: usize) -> Result<Self, TrailstopError> {
        if lookback == 0 {
            return Err(TrailstopError::InvalidLookback { lookback });
        }
        Ok(AverageTrueRange {
            true_range: TrueRange::new(series),
            lookback,
        })
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    /// ATR for every index in `[begin_index, upto]`, in one pass.
    ///
    /// A caller that needs a whole span (the trailing-stop watermark scans
    /// from entry to the query index) pays O(upto - begin) once instead of
    /// re-running the recurrence per index. The buffer is local to the call,
    /// so the indicator stays free of shared mutable state.
    pub(crate) fn prefix(&self, upto: usize) -> Result<Vec<N>, TrailstopError> {
        let series = self.true_range.series();
        // Validates the index and rejects empty series.
        series.bar(upto)?;
        let begin = series.begin_index();

        let n = N::from_usize(self.lookback);
        let n_minus_one = N::from_usize(self.lookback - 1);

        let mut values = Vec::with_capacity(upto - begin + 1);
        let mut atr = self.true_range.value(begin)?;
        values.push(atr);
        for index in (begin + 1)..=upto {
            atr = (atr * n_minus_one + self.true_range.value(index)?) / n;
            values.push(atr);
        }
        Ok(values)
    }
}

impl<N: Num> Indicator for AverageTrueRange<'_, N> {
    type Num = N;

    fn value(&self, index: usize) -> Result<N, TrailstopError> {
        let values = self.prefix(index)?;
        values.last().copied().ok_or(TrailstopError::EmptySeries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bar::Bar;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::Decimal;

    fn series_from(bars: &[(f64, f64, f64, f64)]) -> BarSeries<f64> {
        let mut series = BarSeries::new("test");
        for (day, &(open, high, low, close)) in bars.iter().enumerate() {
            let date = NaiveDate::from_ymd_opt(2024, 1, day as u32 + 1).unwrap();
            series
                .add_bar(Bar::new(date, open, high, low, close, 1000).unwrap())
                .unwrap();
        }
        series
    }

    #[test]
    fn zero_lookback_is_rejected() {
        let series = series_from(&[(10.0, 12.0, 8.0, 11.0)]);
        let err = AverageTrueRange::new(&series, 0).unwrap_err();
        assert_eq!(err, TrailstopError::InvalidLookback { lookback: 0 });
    }

    #[test]
    fn seeds_with_first_true_range() {
        let series = series_from(&[(10.0, 12.0, 8.0, 11.0), (11.0, 13.0, 9.0, 12.0)]);
        let atr = AverageTrueRange::new(&series, 3).unwrap();
        // ATR(0) = TR(0) = 4; no warmup suppression.
        assert_relative_eq!(atr.value(0).unwrap(), 4.0);
    }

    #[test]
    fn wilder_recurrence() {
        // TRs: 10, 8, 12 → ATR(1) = (10*2 + 8)/3, ATR(2) = (ATR(1)*2 + 12)/3.
        let series = series_from(&[
            (100.0, 105.0, 95.0, 100.0),
            (100.0, 104.0, 96.0, 98.0),
            (98.0, 106.0, 94.0, 100.0),
        ]);
        let atr = AverageTrueRange::new(&series, 3).unwrap();

        let atr1 = (10.0 * 2.0 + 8.0) / 3.0;
        let atr2 = (atr1 * 2.0 + 12.0) / 3.0;
        assert_relative_eq!(atr.value(1).unwrap(), atr1, max_relative = 1e-12);
        assert_relative_eq!(atr.value(2).unwrap(), atr2, max_relative = 1e-12);
    }

    #[test]
    fn lookback_one_tracks_true_range() {
        let series = series_from(&[
            (100.0, 105.0, 95.0, 100.0),
            (100.0, 104.0, 96.0, 98.0),
            (98.0, 106.0, 94.0, 100.0),
        ]);
        let atr = AverageTrueRange::new(&series, 1).unwrap();
        let tr = TrueRange::new(&series);
        for index in 0..=2 {
            assert_relative_eq!(atr.value(index).unwrap(), tr.value(index).unwrap());
        }
    }

    #[test]
    fn prefix_matches_per_index_values() {
        let series = series_from(&[
            (10.0, 12.0, 8.0, 11.0),
            (11.0, 13.0, 9.0, 12.0),
            (12.0, 14.0, 10.0, 13.0),
            (13.0, 15.0, 11.0, 14.0),
        ]);
        let atr = AverageTrueRange::new(&series, 3).unwrap();
        let prefix = atr.prefix(3).unwrap();
        assert_eq!(prefix.len(), 4);
        for (index, expected) in prefix.iter().enumerate() {
            assert_relative_eq!(atr.value(index).unwrap(), *expected);
        }
    }

    #[test]
    fn decimal_backing_matches_float_backing() {
        let bars = [
            (10.0, 12.0, 8.0, 11.0),
            (11.0, 13.0, 9.0, 12.0),
            (12.0, 14.0, 10.0, 13.0),
        ];
        let floats = series_from(&bars);

        let mut decimals: BarSeries<Decimal> = BarSeries::new("test");
        for (day, &(open, high, low, close)) in bars.iter().enumerate() {
            let date = NaiveDate::from_ymd_opt(2024, 1, day as u32 + 1).unwrap();
            let bar = Bar::new(
                date,
                decimals.num_of(open).unwrap(),
                decimals.num_of(high).unwrap(),
                decimals.num_of(low).unwrap(),
                decimals.num_of(close).unwrap(),
                1000,
            )
            .unwrap();
            decimals.add_bar(bar).unwrap();
        }

        let float_atr = AverageTrueRange::new(&floats, 3).unwrap();
        let decimal_atr = AverageTrueRange::new(&decimals, 3).unwrap();
        for index in 0..=2 {
            let from_decimal = decimal_atr
                .value(index)
                .unwrap()
                .to_f64()
                .expect("decimal converts to f64");
            assert_relative_eq!(float_atr.value(index).unwrap(), from_decimal, max_relative = 1e-9);
        }
    }

    #[test]
    fn out_of_range_is_an_error() {
        let series = series_from(&[(10.0, 12.0, 8.0, 11.0)]);
        let atr = AverageTrueRange::new(&series, 3).unwrap();
        assert!(matches!(
            atr.value(4).unwrap_err(),
            TrailstopError::IndexOutOfRange { index: 4, .. }
        ));
    }
}
