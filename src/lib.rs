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

//! # Race Betting
//!
//! This library provides a betting and settlement engine for a horse race
//! mini-game: wagers on independent lanes, race start arbitration, and a fixed
//! 2:1 payout once a winner is reported.
//!
//! ## Core Components
//!
//! - [`RaceEngine`]: Race lifecycle and settlement, owns the ledger
//! - [`Ledger`]: Balance and active bet storage
//! - [`RaceSimulator`]: Random progress driver that reports a winner
//! - [`RaceEvent`]: Change notifications for observers
//! - [`RaceError`]: Error types for rejected operations
//!
//! ## Example
//!
//! ```
//! use race_betting_rs::{Bet, LaneId, RaceEngine, RaceState};
//!
//! let mut engine = RaceEngine::new();
//! engine
//!     .set_current_bets(vec![Bet::new(LaneId(1), 100), Bet::new(LaneId(2), 50)])
//!     .unwrap();
//!
//! engine.start_race().unwrap();
//! assert_eq!(engine.balance(), 850);
//!
//! let result = engine.finish_race(LaneId(1)).unwrap();
//! assert_eq!(result.net_change, 50);
//! assert_eq!(engine.balance(), 1050);
//! assert_eq!(engine.state(), RaceState::AwaitingReset);
//!
//! engine.reset();
//! assert_eq!(engine.state(), RaceState::Idle);
//! ```
//!
//! ## Threading
//!
//! Every operation takes `&mut self` and completes synchronously. The engine is
//! meant to be driven from a single owner; observers receive events over
//! channels and may live on other threads.

mod base;
mod bet;
pub mod config;
mod engine;
pub mod error;
mod events;
pub mod ledger;
mod simulation;

pub use base::{Amount, LaneId};
pub use bet::{Bet, LaneOutcome, SettlementResult};
pub use config::{EngineConfig, SimulationConfig};
pub use engine::{PAYOUT_MULTIPLIER, RaceEngine, RaceState};
pub use error::RaceError;
pub use events::{EventBus, RaceEvent};
pub use ledger::Ledger;
pub use simulation::RaceSimulator;
