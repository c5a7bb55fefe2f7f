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

//! Error types for betting and race lifecycle operations.

use thiserror::Error;

/// Race and wager errors.
///
/// Every variant is a recoverable input problem. A call that returns one of
/// these leaves the engine exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RaceError {
    /// Bet amount is not positive, lane is 0, or a lane repeats in one submission
    #[error("invalid bet (amount must be positive, lanes start at 1 and may not repeat)")]
    InvalidBet,

    /// Bets were edited or a start was requested while a race is running
    #[error("race already in progress")]
    RaceInProgress,

    /// A start was requested after settlement without a reset
    #[error("race must be reset before starting again")]
    ResetRequired,

    /// A start was requested with an empty bet set
    #[error("no bets placed")]
    NoBetsPlaced,

    /// The total stake exceeds the current balance
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Deposit amount is zero or negative
    #[error("invalid amount (must be positive)")]
    InvalidAmount,

    /// Settlement was requested while no race is running
    #[error("no race in progress")]
    NotRacing,

    /// Simulation parameters cannot produce a finish
    #[error("invalid simulation config: {0}")]
    InvalidConfig(&'static str),
}

#[cfg(test)]
mod tests {
    use super::RaceError;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            RaceError::InvalidBet.to_string(),
            "invalid bet (amount must be positive, lanes start at 1 and may not repeat)"
        );
        assert_eq!(RaceError::RaceInProgress.to_string(), "race already in progress");
        assert_eq!(
            RaceError::ResetRequired.to_string(),
            "race must be reset before starting again"
        );
        assert_eq!(RaceError::NoBetsPlaced.to_string(), "no bets placed");
        assert_eq!(RaceError::InsufficientBalance.to_string(), "insufficient balance");
        assert_eq!(
            RaceError::InvalidAmount.to_string(),
            "invalid amount (must be positive)"
        );
        assert_eq!(RaceError::NotRacing.to_string(), "no race in progress");
        assert_eq!(
            RaceError::InvalidConfig("lanes must be at least 1").to_string(),
            "invalid simulation config: lanes must be at least 1"
        );
    }

    #[test]
    fn errors_are_cloneable() {
        let error = RaceError::InsufficientBalance;
        let cloned = error.clone();
        assert_eq!(error, cloned);
    }
}
