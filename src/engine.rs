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

//! Race lifecycle and settlement engine.
//!
//! The [`RaceEngine`] owns the [`Ledger`] and is the only component with
//! betting rules. It accepts wagers, decides whether a race may start,
//! and settles the race once a winning lane is reported.
//!
//! # Race Lifecycle
//!
//! ```text
//!  Idle ──start_race──► Racing ──finish_race──► AwaitingReset
//!   ▲                     │                         │
//!   └───────reset─────────┴──────────reset──────────┘
//! ```
//!
//! - **Idle**: bets may be replaced.
//! - **Racing**: the stake has been debited; bets are frozen.
//! - **AwaitingReset**: the race is settled; a reset is needed before the next start.
//!
//! # Payouts
//!
//! The bet on the winning lane pays twice its amount. Every other bet loses its
//! whole stake. The stake is debited at start, so settlement only credits
//! winnings.

use crate::base::{Amount, LaneId};
use crate::bet::{Bet, LaneOutcome, SettlementResult};
use crate::config::EngineConfig;
use crate::events::{EventBus, RaceEvent};
use crate::ledger::Ledger;
use crate::RaceError;
use crossbeam::channel::Receiver;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Winning bets pay `amount * PAYOUT_MULTIPLIER`.
pub const PAYOUT_MULTIPLIER: Amount = 2;

/// Race lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceState {
    #[default]
    Idle,
    Racing,
    AwaitingReset,
}

impl fmt::Display for RaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Racing => "racing",
            Self::AwaitingReset => "awaiting reset",
        };
        f.write_str(name)
    }
}

/// Betting engine for a single player and one race at a time.
///
/// # Invariants
///
/// - Bets can only change while [`RaceState::Idle`].
/// - A race starts only if the total stake is covered by the balance, so the
///   balance never goes negative through the engine.
/// - Rejected calls change nothing and publish no events.
#[derive(Debug)]
pub struct RaceEngine {
    ledger: Ledger,
    state: RaceState,
    last_result: Option<SettlementResult>,
    events: EventBus,
}

impl RaceEngine {
    /// Creates an idle engine with the default starting balance.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        RaceEngine {
            ledger: Ledger::with_balance(config.starting_balance),
            state: RaceState::Idle,
            last_result: None,
            events: EventBus::new(),
        }
    }

    /// Returns a receiver for every change made after this call.
    pub fn subscribe(&mut self) -> Receiver<RaceEvent> {
        self.events.subscribe()
    }

    pub fn balance(&self) -> Amount {
        self.ledger.balance()
    }

    pub fn total_bet_amount(&self) -> Amount {
        self.ledger.total_bet_amount()
    }

    pub fn current_bets(&self) -> &[Bet] {
        self.ledger.bets()
    }

    pub fn state(&self) -> RaceState {
        self.state
    }

    /// Settlement of the most recent race, until the next reset.
    pub fn last_result(&self) -> Option<&SettlementResult> {
        self.last_result.as_ref()
    }

    /// Replaces the bets for the next race.
    ///
    /// # Errors
    ///
    /// - [`RaceError::RaceInProgress`] - The engine is not idle.
    /// - [`RaceError::InvalidBet`] - A bet has a non-positive amount, lane 0, or a repeated lane.
    pub fn set_current_bets(&mut self, bets: Vec<Bet>) -> Result<(), RaceError> {
        if self.state != RaceState::Idle {
            tracing::debug!(state = %self.state, "rejected bet change");
            return Err(RaceError::RaceInProgress);
        }
        self.ledger.set_bets(bets)?;

        let total_bet_amount = self.ledger.total_bet_amount();
        tracing::debug!(bets = self.ledger.bets().len(), total_bet_amount, "bets placed");
        self.events.publish(RaceEvent::BetsChanged { total_bet_amount });
        Ok(())
    }

    /// Starts a race, debiting the total stake.
    ///
    /// Conditions are checked in this order and the first failure is returned.
    ///
    /// # Errors
    ///
    /// - [`RaceError::NoBetsPlaced`] - The bet set is empty.
    /// - [`RaceError::InsufficientBalance`] - The total stake exceeds the balance.
    /// - [`RaceError::RaceInProgress`] - A race is already running.
    /// - [`RaceError::ResetRequired`] - The previous race was settled but not reset.
    pub fn start_race(&mut self) -> Result<(), RaceError> {
        let stake = self.ledger.total_bet_amount();

        let rejection = if self.ledger.bets().is_empty() {
            Some(RaceError::NoBetsPlaced)
        } else if stake > self.ledger.balance() {
            Some(RaceError::InsufficientBalance)
        } else {
            match self.state {
                RaceState::Idle => None,
                RaceState::Racing => Some(RaceError::RaceInProgress),
                RaceState::AwaitingReset => Some(RaceError::ResetRequired),
            }
        };
        if let Some(error) = rejection {
            tracing::debug!(%error, state = %self.state, "race start rejected");
            return Err(error);
        }

        // The stake is at risk from here on; a reset does not refund it.
        self.ledger.adjust_balance(-stake);
        self.state = RaceState::Racing;

        tracing::info!(stake, balance = self.ledger.balance(), "race started");
        self.events
            .publish(RaceEvent::BalanceChanged(self.ledger.balance()));
        self.events.publish(RaceEvent::StateChanged(self.state));
        Ok(())
    }

    /// Settles the running race with `winning_lane` as the winner.
    ///
    /// A lane nobody bet on is a valid winner; every bet then loses.
    ///
    /// # Errors
    ///
    /// Returns [`RaceError::NotRacing`] if no race is running. The call is
    /// then a no-op, so reporting a winner twice for one race cannot pay out twice.
    pub fn finish_race(&mut self, winning_lane: LaneId) -> Result<SettlementResult, RaceError> {
        if self.state != RaceState::Racing {
            tracing::debug!(state = %self.state, %winning_lane, "settlement rejected");
            return Err(RaceError::NotRacing);
        }

        let result = settle(self.ledger.bets(), winning_lane);
        if result.total_winnings > 0 {
            self.ledger.adjust_balance(result.total_winnings);
            self.events
                .publish(RaceEvent::BalanceChanged(self.ledger.balance()));
        }
        self.state = RaceState::AwaitingReset;
        self.last_result = Some(result.clone());

        tracing::info!(
            %winning_lane,
            staked = result.total_staked,
            winnings = result.total_winnings,
            net_change = result.net_change,
            balance = self.ledger.balance(),
            "race settled"
        );
        self.events.publish(RaceEvent::StateChanged(self.state));
        self.events.publish(RaceEvent::Settled(result.clone()));
        Ok(result)
    }

    /// Clears bets and any settlement, returning to [`RaceState::Idle`].
    ///
    /// Allowed in every state and idempotent. Resetting a running race forfeits its stake.
    pub fn reset(&mut self) {
        if !self.ledger.bets().is_empty() {
            self.ledger.clear_bets();
            self.events.publish(RaceEvent::BetsChanged {
                total_bet_amount: 0,
            });
        }
        if self.last_result.take().is_some() {
            self.events.publish(RaceEvent::ResultCleared);
        }
        if self.state != RaceState::Idle {
            tracing::debug!(from = %self.state, "race reset");
            self.state = RaceState::Idle;
            self.events.publish(RaceEvent::StateChanged(self.state));
        }
    }

    /// Adds funds to the balance. Allowed in every state.
    ///
    /// # Errors
    ///
    /// Returns [`RaceError::InvalidAmount`] if `amount` is zero or negative.
    pub fn deposit_funds(&mut self, amount: Amount) -> Result<(), RaceError> {
        if amount <= 0 {
            return Err(RaceError::InvalidAmount);
        }
        self.ledger.adjust_balance(amount);

        tracing::debug!(amount, balance = self.ledger.balance(), "funds deposited");
        self.events
            .publish(RaceEvent::BalanceChanged(self.ledger.balance()));
        Ok(())
    }
}

impl Default for RaceEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes payouts for `bets` without touching any balance.
fn settle(bets: &[Bet], winning_lane: LaneId) -> SettlementResult {
    let mut lanes = Vec::with_capacity(bets.len());
    let mut message = String::new();
    let mut total_staked = 0;
    let mut total_winnings = 0;

    for bet in bets {
        let won = bet.lane() == winning_lane;
        let payout = if won { bet.amount() * PAYOUT_MULTIPLIER } else { 0 };
        total_staked += bet.amount();
        total_winnings += payout;

        if won {
            message.push_str(&format!("Horse {} won! +{}\n", bet.lane(), payout));
        } else {
            message.push_str(&format!("Horse {} lost\n", bet.lane()));
        }
        lanes.push(LaneOutcome {
            lane: bet.lane(),
            wagered: bet.amount(),
            payout,
            won,
        });
    }

    let net_change = total_winnings - total_staked;
    message.push_str(&format!("\nTotal: {net_change:+}"));

    SettlementResult {
        winning_lane,
        lanes,
        total_staked,
        total_winnings,
        net_change,
        message,
    }
}
