//! Trading rules.
//!
//! A rule is a predicate over a bar index and a [`TradingRecord`]: "should
//! the strategy act here, given this trade history?". Rules are stateless —
//! whatever state an evaluation needs lives in the record — so the same rule
//! instance can be queried for many independent records.
//!
//! Combinators follow short-circuit semantics: `and` stops at the first
//! `false`, `or` at the first `true`. An error from a child always
//! propagates; it is never collapsed into a boolean.

use std::marker::PhantomData;

use super::error::TrailstopError;
use super::num::Num;
use super::position::TradingRecord;

pub trait Rule {
    type Num: Num;

    fn is_satisfied(
        &self,
        index: usize,
        record: &TradingRecord<Self::Num>,
    ) -> Result<bool, TrailstopError>;

    fn and<R>(self, other: R) -> And<Self, R>
    where
        Self: Sized,
        R: Rule<Num = Self::Num>,
    {
        And {
            left: self,
            right: other,
        }
    }

    fn or<R>(self, other: R) -> Or<Self, R>
    where
        Self: Sized,
        R: Rule<Num = Self::Num>,
    {
        Or {
            left: self,
            right: other,
        }
    }

    fn negation(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not { inner: self }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct And<L, R> {
    left: L,
    right: R,
}

impl<L: Rule, R: Rule<Num = L::Num>> Rule for And<L, R> {
    type Num = L::Num;

    fn is_satisfied(
        &self,
        index: usize,
        record: &TradingRecord<Self::Num>,
    ) -> Result<bool, TrailstopError> {
        Ok(self.left.is_satisfied(index, record)? && self.right.is_satisfied(index, record)?)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Or<L, R> {
    left: L,
    right: R,
}

impl<L: Rule, R: Rule<Num = L::Num>> Rule for Or<L, R> {
    type Num = L::Num;

    fn is_satisfied(
        &self,
        index: usize,
        record: &TradingRecord<Self::Num>,
    ) -> Result<bool, TrailstopError> {
        Ok(self.left.is_satisfied(index, record)? || self.right.is_satisfied(index, record)?)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Not<R> {
    inner: R,
}

impl<R: Rule> Rule for Not<R> {
    type Num = R::Num;

    fn is_satisfied(
        &self,
        index: usize,
        record: &TradingRecord<Self::Num>,
    ) -> Result<bool, TrailstopError> {
        Ok(!self.inner.is_satisfied(index, record)?)
    }
}

/// A rule with a constant answer. Useful as a combinator operand and in tests.
#[derive(Debug, Clone, Copy)]
pub struct BooleanRule<N: Num> {
    satisfied: bool,
    _num: PhantomData<N>,
}

impl<N: Num> BooleanRule<N> {
    pub fn new(satisfied: bool) -> Self {
        BooleanRule {
            satisfied,
            _num: PhantomData,
        }
    }
}

impl<N: Num> Rule for BooleanRule<N> {
    type Num = N;

    fn is_satisfied(
        &self,
        _index: usize,
        _record: &TradingRecord<N>,
    ) -> Result<bool, TrailstopError> {
        Ok(self.satisfied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TradingRecord<f64> {
        TradingRecord::new()
    }

    #[test]
    fn boolean_rule_is_constant() {
        let record = record();
        assert!(BooleanRule::<f64>::new(true).is_satisfied(0, &record).unwrap());
        assert!(!BooleanRule::<f64>::new(false).is_satisfied(7, &record).unwrap());
    }

    #[test]
    fn and_requires_both() {
        let record = record();
        let both = BooleanRule::<f64>::new(true).and(BooleanRule::new(true));
        let one = BooleanRule::<f64>::new(true).and(BooleanRule::new(false));
        assert!(both.is_satisfied(0, &record).unwrap());
        assert!(!one.is_satisfied(0, &record).unwrap());
    }

    #[test]
    fn or_requires_either() {
        let record = record();
        let one = BooleanRule::<f64>::new(false).or(BooleanRule::new(true));
        let neither = BooleanRule::<f64>::new(false).or(BooleanRule::new(false));
        assert!(one.is_satisfied(0, &record).unwrap());
        assert!(!neither.is_satisfied(0, &record).unwrap());
    }

    #[test]
    fn negation_inverts() {
        let record = record();
        let negated = BooleanRule::<f64>::new(true).negation();
        assert!(!negated.is_satisfied(0, &record).unwrap());
    }

    #[test]
    fn combinators_nest() {
        let record = record();
        let rule = BooleanRule::<f64>::new(true)
            .and(BooleanRule::new(false).negation())
            .or(BooleanRule::new(false));
        assert!(rule.is_satisfied(3, &record).unwrap());
    }
}
