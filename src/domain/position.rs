//! Positions and trade history.

use super::error::TrailstopError;
use super::num::Num;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Long,
    Short,
}

impl Side {
    pub fn is_long(self) -> bool {
        matches!(self, Side::Long)
    }

    pub fn is_short(self) -> bool {
        matches!(self, Side::Short)
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Long => Side::Short,
            Side::Short => Side::Long,
        }
    }
}

/// An open position: where it was entered and on which side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position<N: Num> {
    pub entry_index: usize,
    pub entry_price: N,
    pub side: Side,
}

impl<N: Num> Position<N> {
    pub fn unrealized_pnl(&self, price: N) -> N {
        match self.side {
            Side::Long => price - self.entry_price,
            Side::Short => self.entry_price - price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosedTrade<N: Num> {
    pub entry_index: usize,
    pub entry_price: N,
    pub exit_index: usize,
    pub exit_price: N,
    pub side: Side,
}

impl<N: Num> ClosedTrade<N> {
    pub fn pnl(&self) -> N {
        match self.side {
            Side::Long => self.exit_price - self.entry_price,
            Side::Short => self.entry_price - self.exit_price,
        }
    }
}

/// Entry/exit history for a single instrument.
///
/// Holds at most one open position at a time; closed trades accumulate in
/// entry order. Rules consult [`current_position`](Self::current_position)
/// only — closed trades never feed an evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct TradingRecord<N: Num> {
    open: Option<Position<N>>,
    closed: Vec<ClosedTrade<N>>,
}

impl<N: Num> TradingRecord<N> {
    pub fn new() -> Self {
        TradingRecord {
            open: None,
            closed: Vec::new(),
        }
    }

    /// Open a position. Fails if one is already open.
    pub fn enter(&mut self, index: usize, price: N, side: Side) -> Result<(), TrailstopError> {
        if let Some(open) = &self.open {
            return Err(TrailstopError::PositionAlreadyOpen {
                entry_index: open.entry_index,
            });
        }
        self.open = Some(Position {
            entry_index: index,
            entry_price: price,
            side,
        });
        Ok(())
    }

    /// Close the open position, recording it as a trade.
    pub fn exit(&mut self, index: usize, price: N) -> Result<(), TrailstopError> {
        let open = self.open.take().ok_or(TrailstopError::NoOpenPosition)?;
        if index < open.entry_index {
            self.open = Some(open);
            return Err(TrailstopError::ExitBeforeEntry {
                entry_index: open.entry_index,
                exit_index: index,
            });
        }
        self.closed.push(ClosedTrade {
            entry_index: open.entry_index,
            entry_price: open.entry_price,
            exit_index: index,
            exit_price: price,
            side: open.side,
        });
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current_position(&self) -> Option<&Position<N>> {
        self.open.as_ref()
    }

    pub fn closed_trades(&self) -> &[ClosedTrade<N>] {
        &self.closed
    }
}

impl<N: Num> Default for TradingRecord<N> {
    fn default() -> Self {
        TradingRecord::new()
    }
}
