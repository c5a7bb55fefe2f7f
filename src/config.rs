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

//! Engine and simulation configuration.

use crate::RaceError;
use crate::base::Amount;
use crate::ledger::Ledger;
use serde::{Deserialize, Serialize};

/// Race engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Balance a fresh engine starts with.
    pub starting_balance: Amount,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_balance: Ledger::INITIAL_BALANCE,
        }
    }
}

/// Race progress simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of competing lanes, numbered `1..=lanes`.
    pub lanes: u32,
    /// Progress a lane must reach to win.
    pub finish_line: u32,
    /// Largest progress step per tick. Steps are drawn from `0..=max_step`.
    pub max_step: u32,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), RaceError> {
        if self.lanes == 0 {
            return Err(RaceError::InvalidConfig("lanes must be at least 1"));
        }
        if self.finish_line == 0 {
            return Err(RaceError::InvalidConfig("finish line must be positive"));
        }
        if self.max_step == 0 {
            return Err(RaceError::InvalidConfig("max step must be positive"));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            lanes: 4,
            finish_line: 100,
            max_step: 2,
        }
    }
}
