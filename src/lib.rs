//! trailstop — ATR trailing stop-loss rule evaluation.
//!
//! Bar series, lazily evaluated indicators (true range, Wilder's ATR), and
//! trading rules that decide, bar by bar, whether an open position's trailing
//! stop has been breached. Generic over the numeric backing via
//! [`domain::num::Num`].

pub mod domain;
