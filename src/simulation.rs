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

//! Headless race progress driver.
//!
//! A [`RaceSimulator`] advances every lane by a random step on each tick and
//! reports the first lane to reach the finish line to the engine. It only uses
//! the engine's public operations.
//!
//! # Example
//!
//! ```
//! use race_betting_rs::{Bet, LaneId, RaceEngine, RaceSimulator, RaceState, SimulationConfig};
//!
//! let mut engine = RaceEngine::new();
//! engine.set_current_bets(vec![Bet::new(LaneId(2), 100)]).unwrap();
//! engine.start_race().unwrap();
//!
//! let mut simulator = RaceSimulator::seeded(SimulationConfig::default(), 7).unwrap();
//! let result = simulator.run(&mut engine).unwrap();
//! assert_eq!(engine.state(), RaceState::AwaitingReset);
//! assert!(result.winning_lane.0 >= 1 && result.winning_lane.0 <= 4);
//! ```

use crate::RaceError;
use crate::base::LaneId;
use crate::bet::SettlementResult;
use crate::config::SimulationConfig;
use crate::engine::{RaceEngine, RaceState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Drives one race at a time to a finish.
#[derive(Debug)]
pub struct RaceSimulator<R> {
    config: SimulationConfig,
    /// Progress per lane; index 0 is lane 1.
    progress: Vec<u32>,
    rng: R,
}

impl RaceSimulator<StdRng> {
    /// Creates a simulator with a reproducible random sequence.
    pub fn seeded(config: SimulationConfig, seed: u64) -> Result<Self, RaceError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a simulator seeded from the operating system.
    pub fn from_entropy(config: SimulationConfig) -> Result<Self, RaceError> {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> RaceSimulator<R> {
    /// # Errors
    ///
    /// Returns [`RaceError::InvalidConfig`] if `config` cannot produce a finish.
    pub fn new(config: SimulationConfig, rng: R) -> Result<Self, RaceError> {
        config.validate()?;
        Ok(Self {
            config,
            progress: vec![0; config.lanes as usize],
            rng,
        })
    }

    pub fn progress(&self) -> &[u32] {
        &self.progress
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Moves every lane back to the start.
    pub fn reset(&mut self) {
        self.progress.iter_mut().for_each(|p| *p = 0);
    }

    /// Advances the race by one tick.
    ///
    /// Does nothing unless the engine is racing. Lanes are advanced in order;
    /// the first to reach the finish line is reported to the engine and the
    /// remaining lanes stay where they are for this tick.
    pub fn tick(&mut self, engine: &mut RaceEngine) -> Result<Option<SettlementResult>, RaceError> {
        if engine.state() != RaceState::Racing {
            return Ok(None);
        }

        for (index, progress) in self.progress.iter_mut().enumerate() {
            *progress += self.rng.gen_range(0..=self.config.max_step);
            if *progress >= self.config.finish_line {
                let winner = LaneId(index as u32 + 1);
                tracing::debug!(%winner, "lane crossed the finish line");
                return engine.finish_race(winner).map(Some);
            }
        }
        Ok(None)
    }

    /// Ticks until a lane wins and returns the settlement.
    ///
    /// # Errors
    ///
    /// Returns [`RaceError::NotRacing`] if the engine is not racing.
    pub fn run(&mut self, engine: &mut RaceEngine) -> Result<SettlementResult, RaceError> {
        if engine.state() != RaceState::Racing {
            return Err(RaceError::NotRacing);
        }
        let mut ticks: u64 = 0;
        loop {
            ticks += 1;
            if let Some(result) = self.tick(engine)? {
                tracing::debug!(ticks, "race finished");
                return Ok(result);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bet;

    fn racing_engine() -> RaceEngine {
        let mut engine = RaceEngine::new();
        engine.set_current_bets(vec![Bet::new(LaneId(1), 10)]).unwrap();
        engine.start_race().unwrap();
        engine
    }

    #[test]
    fn new_simulator_starts_at_zero() {
        let simulator = RaceSimulator::seeded(SimulationConfig::default(), 1).unwrap();
        assert_eq!(simulator.progress(), &[0, 0, 0, 0]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimulationConfig {
            lanes: 0,
            ..SimulationConfig::default()
        };
        assert!(RaceSimulator::seeded(config, 1).is_err());
    }

    #[test]
    fn tick_without_race_does_nothing() {
        let mut engine = RaceEngine::new();
        let mut simulator = RaceSimulator::seeded(SimulationConfig::default(), 1).unwrap();
        assert_eq!(simulator.tick(&mut engine), Ok(None));
        assert_eq!(simulator.progress(), &[0, 0, 0, 0]);
    }

    #[test]
    fn run_without_race_is_rejected() {
        let mut engine = RaceEngine::new();
        let mut simulator = RaceSimulator::seeded(SimulationConfig::default(), 1).unwrap();
        assert_eq!(simulator.run(&mut engine), Err(RaceError::NotRacing));
    }

    #[test]
    fn only_the_winner_reaches_the_finish_line() {
        for seed in 0..20 {
            let mut engine = racing_engine();
            let mut simulator = RaceSimulator::seeded(SimulationConfig::default(), seed).unwrap();

            let result = simulator.run(&mut engine).unwrap();
            let winner = result.winning_lane.0 as usize - 1;

            for (index, &progress) in simulator.progress().iter().enumerate() {
                if index == winner {
                    assert!(progress >= 100);
                } else {
                    assert!(progress < 100, "seed {seed}: lane {} also finished", index + 1);
                }
            }
            assert_eq!(engine.state(), RaceState::AwaitingReset);
        }
    }

    #[test]
    fn tick_after_finish_does_nothing() {
        let mut engine = racing_engine();
        let mut simulator = RaceSimulator::seeded(SimulationConfig::default(), 9).unwrap();
        simulator.run(&mut engine).unwrap();
        let frozen = simulator.progress().to_vec();

        assert_eq!(simulator.tick(&mut engine), Ok(None));
        assert_eq!(simulator.progress(), frozen.as_slice());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut first_engine = racing_engine();
        let mut second_engine = racing_engine();
        let mut first = RaceSimulator::seeded(SimulationConfig::default(), 42).unwrap();
        let mut second = RaceSimulator::seeded(SimulationConfig::default(), 42).unwrap();

        let a = first.run(&mut first_engine).unwrap();
        let b = second.run(&mut second_engine).unwrap();

        assert_eq!(a, b);
        assert_eq!(first.progress(), second.progress());
    }

    #[test]
    fn reset_zeroes_progress() {
        let mut engine = racing_engine();
        let mut simulator = RaceSimulator::seeded(SimulationConfig::default(), 3).unwrap();
        simulator.run(&mut engine).unwrap();
        assert!(simulator.progress().iter().any(|&p| p > 0));

        simulator.reset();
        assert_eq!(simulator.progress(), &[0, 0, 0, 0]);
    }
}
