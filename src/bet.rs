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

//! Wagers and settlement outcomes.

use crate::base::{Amount, LaneId};
use serde::{Deserialize, Serialize};

/// A wager on a single lane.
///
/// Fields are read-only once constructed. Validation happens when the bet is
/// submitted to the [`Ledger`](crate::Ledger), not here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bet {
    lane: LaneId,
    amount: Amount,
}

impl Bet {
    pub fn new(lane: LaneId, amount: Amount) -> Self {
        Self { lane, amount }
    }

    pub fn lane(&self) -> LaneId {
        self.lane
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// Result of a single bet after the race finished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaneOutcome {
    pub lane: LaneId,
    pub wagered: Amount,
    pub payout: Amount,
    pub won: bool,
}

/// Financial outcome of one race.
///
/// `net_change` is `total_winnings - total_staked`; the stake itself was
/// debited when the race started.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementResult {
    pub winning_lane: LaneId,
    /// One entry per bet, in submission order.
    pub lanes: Vec<LaneOutcome>,
    pub total_staked: Amount,
    pub total_winnings: Amount,
    pub net_change: Amount,
    /// Human readable summary, one line per bet followed by the total.
    pub message: String,
}

impl SettlementResult {
    /// Returns the outcome for `lane`, if a bet was placed on it.
    pub fn outcome(&self, lane: LaneId) -> Option<&LaneOutcome> {
        self.lanes.iter().find(|outcome| outcome.lane == lane)
    }
}
