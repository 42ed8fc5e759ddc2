#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use trailstop::domain::bar::Bar;
use trailstop::domain::num::Num;
use trailstop::domain::position::{Side, TradingRecord};
use trailstop::domain::series::BarSeries;

pub fn date(day_offset: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(day_offset as i64)
}

/// The five-bar uptrend every scenario starts from:
/// (10,12,8,11), (11,13,9,12), (12,14,10,13), (13,15,11,14), (14,16,12,15).
pub fn base_bars() -> Vec<(f64, f64, f64, f64)> {
    vec![
        (10.0, 12.0, 8.0, 11.0),
        (11.0, 13.0, 9.0, 12.0),
        (12.0, 14.0, 10.0, 13.0),
        (13.0, 15.0, 11.0, 14.0),
        (14.0, 16.0, 12.0, 15.0),
    ]
}

pub fn make_series<N: Num>(name: &str, bars: &[(f64, f64, f64, f64)]) -> BarSeries<N> {
    let mut series = BarSeries::new(name);
    for &tuple in bars {
        append_bar(&mut series, tuple);
    }
    series
}

pub fn append_bar<N: Num>(series: &mut BarSeries<N>, (open, high, low, close): (f64, f64, f64, f64)) {
    let day = series.end_index().map(|end| end + 1).unwrap_or(0);
    let bar = Bar::new(
        date(day),
        series.num_of(open).unwrap(),
        series.num_of(high).unwrap(),
        series.num_of(low).unwrap(),
        series.num_of(close).unwrap(),
        1000,
    )
    .unwrap();
    series.add_bar(bar).unwrap();
}

pub fn float_series(bars: &[(f64, f64, f64, f64)]) -> BarSeries<f64> {
    make_series("Test Series", bars)
}

pub fn decimal_series(bars: &[(f64, f64, f64, f64)]) -> BarSeries<Decimal> {
    make_series("Test Series", bars)
}

/// Enter at the close of `entry_index` on the given side.
pub fn enter_at<N: Num>(
    series: &BarSeries<N>,
    entry_index: usize,
    side: Side,
) -> TradingRecord<N> {
    let mut record = TradingRecord::new();
    let entry_close = series.bar(entry_index).unwrap().close;
    record.enter(entry_index, entry_close, side).unwrap();
    record
}
