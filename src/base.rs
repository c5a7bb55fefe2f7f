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

//! Core identifier and amount types for lanes and wagers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole-unit currency amount.
///
/// Signed so the ledger can represent a debit below zero; the engine never
/// lets that happen.
pub type Amount = i64;

/// Identifier of a competing horse.
///
/// Wraps a `u32`. Lanes are numbered from 1; lane 0 is never a valid bet target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LaneId(pub u32);

impl LaneId {
    /// Returns `true` for lanes a bet may target.
    pub fn is_valid(&self) -> bool {
        self.0 >= 1
    }
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::LaneId;

    #[test]
    fn lane_zero_is_invalid() {
        assert!(!LaneId(0).is_valid());
        assert!(LaneId(1).is_valid());
    }

    #[test]
    fn lane_serializes_transparently() {
        assert_eq!(serde_json::to_string(&LaneId(3)).unwrap(), "3");
        assert_eq!(LaneId(3).to_string(), "3");
    }
}
