// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Balance and active wager storage.
//!
//! The [`Ledger`] holds data only. It applies no race policy and performs no
//! affordability checks; callers must validate a debit before applying it.
//!
//! # Example
//!
//! ```
//! use race_betting_rs::{Bet, LaneId, Ledger};
//!
//! let mut ledger = Ledger::new();
//! ledger
//!     .set_bets(vec![Bet::new(LaneId(1), 100), Bet::new(LaneId(2), 50)])
//!     .unwrap();
//! assert_eq!(ledger.total_bet_amount(), 150);
//! assert_eq!(ledger.balance(), 1000);
//! ```

use crate::RaceError;
use crate::base::{Amount, LaneId};
use crate::bet::Bet;
use std::collections::HashSet;

/// Account balance plus the ordered set of bets for the current race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    balance: Amount,
    /// Submission order is kept for settlement output.
    bets: Vec<Bet>,
}

impl Ledger {
    pub const INITIAL_BALANCE: Amount = 1000;

    pub fn new() -> Self {
        Self::with_balance(Self::INITIAL_BALANCE)
    }

    pub fn with_balance(balance: Amount) -> Self {
        Self {
            balance,
            bets: Vec::new(),
        }
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Adds `delta` to the balance. Negative deltas are debits.
    ///
    /// No bounds checking is done; the balance may go below zero if the
    /// caller did not check affordability first.
    pub fn adjust_balance(&mut self, delta: Amount) {
        self.balance += delta;
    }

    /// Replaces the active bet set.
    ///
    /// # Errors
    ///
    /// Returns [`RaceError::InvalidBet`] if any bet has a non-positive amount,
    /// targets lane 0, or shares a lane with an earlier bet in `bets`. The
    /// previous bet set is kept in that case.
    pub fn set_bets(&mut self, bets: Vec<Bet>) -> Result<(), RaceError> {
        let mut seen: HashSet<LaneId> = HashSet::with_capacity(bets.len());
        for bet in &bets {
            if bet.amount() <= 0 || !bet.lane().is_valid() || !seen.insert(bet.lane()) {
                return Err(RaceError::InvalidBet);
            }
        }
        self.bets = bets;
        Ok(())
    }

    pub fn clear_bets(&mut self) {
        self.bets.clear();
    }

    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }

    /// Sum of all active bet amounts. Always derived from the bet set.
    pub fn total_bet_amount(&self) -> Amount {
        self.bets.iter().map(Bet::amount).sum()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
