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

//! Change notification for engine observers.
//!
//! Each subscriber owns the receiving end of an unbounded channel. Publishing
//! never blocks and drops subscribers whose receiver has gone away.

use crate::base::Amount;
use crate::bet::SettlementResult;
use crate::engine::RaceState;
use crossbeam::channel::{self, Receiver, Sender};

/// Observable change in engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceEvent {
    BalanceChanged(Amount),
    BetsChanged { total_bet_amount: Amount },
    StateChanged(RaceState),
    Settled(SettlementResult),
    ResultCleared,
}

/// Fan-out of [`RaceEvent`]s to any number of subscribers.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<RaceEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Registers a new subscriber. Events published before this call are not replayed.
    pub fn subscribe(&mut self) -> Receiver<RaceEvent> {
        let (tx, rx) = channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, event: RaceEvent) {
        // A send only fails once the receiver is dropped.
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
