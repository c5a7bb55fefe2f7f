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

//! Race simulator integration tests.

use race_betting_rs::{
    Bet, LaneId, RaceEngine, RaceError, RaceSimulator, RaceState, SimulationConfig,
};

fn bet_on_every_lane(engine: &mut RaceEngine, lanes: u32) {
    let bets = (1..=lanes).map(|lane| Bet::new(LaneId(lane), 10)).collect();
    engine.set_current_bets(bets).unwrap();
}

#[test]
fn simulated_race_pays_the_reported_winner() {
    let mut engine = RaceEngine::new();
    bet_on_every_lane(&mut engine, 4);
    engine.start_race().unwrap();

    let mut simulator = RaceSimulator::seeded(SimulationConfig::default(), 2024).unwrap();
    let result = simulator.run(&mut engine).unwrap();

    // One of four 10-unit bets wins 20.
    assert_eq!(result.total_winnings, 20);
    assert_eq!(result.net_change, -20);
    assert_eq!(engine.balance(), 980);
    assert!(result.outcome(result.winning_lane).unwrap().won);
}

#[test]
fn simulator_only_reports_one_winner() {
    let mut engine = RaceEngine::new();
    bet_on_every_lane(&mut engine, 4);
    engine.start_race().unwrap();

    let mut simulator = RaceSimulator::seeded(SimulationConfig::default(), 5).unwrap();
    simulator.run(&mut engine).unwrap();

    let result = engine.last_result().unwrap();
    assert_eq!(result.lanes.iter().filter(|outcome| outcome.won).count(), 1);
    assert_eq!(simulator.run(&mut engine), Err(RaceError::NotRacing));
}

#[test]
fn winner_can_be_a_lane_without_bets() {
    let config = SimulationConfig {
        lanes: 8,
        ..SimulationConfig::default()
    };
    let mut engine = RaceEngine::new();
    engine.set_current_bets(vec![Bet::new(LaneId(9), 10)]).unwrap();
    engine.start_race().unwrap();

    let mut simulator = RaceSimulator::seeded(config, 11).unwrap();
    let result = simulator.run(&mut engine).unwrap();

    assert!(result.winning_lane.0 <= 8);
    assert_eq!(result.net_change, -10);
}

#[test]
fn reset_mid_race_stops_the_simulation() {
    let mut engine = RaceEngine::new();
    bet_on_every_lane(&mut engine, 4);
    engine.start_race().unwrap();

    let mut simulator = RaceSimulator::seeded(SimulationConfig::default(), 8).unwrap();
    for _ in 0..5 {
        assert_eq!(simulator.tick(&mut engine), Ok(None));
    }
    engine.reset();

    assert_eq!(simulator.tick(&mut engine), Ok(None));
    assert_eq!(engine.state(), RaceState::Idle);
    assert_eq!(engine.balance(), 960);
}

#[test]
fn single_lane_race_always_finishes_on_lane_one() {
    let config = SimulationConfig {
        lanes: 1,
        finish_line: 10,
        max_step: 3,
    };
    let mut engine = RaceEngine::new();
    engine.set_current_bets(vec![Bet::new(LaneId(1), 100)]).unwrap();
    engine.start_race().unwrap();

    let mut simulator = RaceSimulator::from_entropy(config).unwrap();
    let result = simulator.run(&mut engine).unwrap();

    assert_eq!(result.winning_lane, LaneId(1));
    assert_eq!(engine.balance(), 1100);
}
