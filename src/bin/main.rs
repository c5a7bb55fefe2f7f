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

use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use race_betting_rs::{
    Amount, Bet, EngineConfig, LaneId, RaceEngine, RaceError, RaceSimulator, SettlementResult,
    SimulationConfig,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Race Betting - Replay a betting session from a CSV file
///
/// Reads session commands from a CSV file and writes one row per settled
/// race to stdout. Log output goes to stderr and is controlled by RUST_LOG.
#[derive(Parser, Debug)]
#[command(name = "race-betting-rs")]
#[command(about = "Replays a race betting session from a command CSV", long_about = None)]
struct Args {
    /// Path to CSV file with session commands
    ///
    /// Expected format: command,lane,amount
    /// Example: cargo run -- session.csv > settlements.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Balance the player starts with
    #[arg(long, default_value_t = 1000)]
    starting_balance: Amount,

    /// Seed for simulated races (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of lanes in simulated races
    #[arg(long, default_value_t = 4)]
    lanes: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let engine_config = EngineConfig {
        starting_balance: args.starting_balance,
    };
    let simulation_config = SimulationConfig {
        lanes: args.lanes,
        ..SimulationConfig::default()
    };
    let simulator = match args.seed {
        Some(seed) => RaceSimulator::seeded(simulation_config, seed),
        None => RaceSimulator::from_entropy(simulation_config),
    };
    let simulator = match simulator {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let mut session = Session::new(RaceEngine::with_config(engine_config), simulator);

    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = process_session(BufReader::new(file), &mut session) {
        eprintln!("Error processing session: {}", e);
        process::exit(1);
    }

    if let Err(e) = write_settlements(session.settlements(), std::io::stdout()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Raw CSV record matching the input format.
///
/// Fields: `command, lane, amount`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    command: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    lane: Option<u32>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    amount: Option<Amount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Adds a bet to the pending slip.
    Bet(Bet),
    /// Submits the pending slip as the current bets.
    Place,
    Start,
    Finish(LaneId),
    Simulate,
    Reset,
    Deposit(Amount),
}

impl CsvRecord {
    /// Returns `None` for unknown commands or missing required fields.
    fn into_command(self) -> Option<Command> {
        match self.command.to_lowercase().as_str() {
            "bet" => Some(Command::Bet(Bet::new(LaneId(self.lane?), self.amount?))),
            "place" => Some(Command::Place),
            "start" => Some(Command::Start),
            "finish" => Some(Command::Finish(LaneId(self.lane?))),
            "simulate" => Some(Command::Simulate),
            "reset" => Some(Command::Reset),
            "deposit" => Some(Command::Deposit(self.amount?)),
            _ => None,
        }
    }
}

/// One output row per settled race.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct SettlementRow {
    race: u32,
    winner: LaneId,
    staked: Amount,
    winnings: Amount,
    net_change: Amount,
    balance: Amount,
}

/// Engine plus the driver state a player session needs.
struct Session {
    engine: RaceEngine,
    simulator: RaceSimulator<StdRng>,
    slip: Vec<Bet>,
    settlements: Vec<SettlementRow>,
}

impl Session {
    fn new(engine: RaceEngine, simulator: RaceSimulator<StdRng>) -> Self {
        Self {
            engine,
            simulator,
            slip: Vec::new(),
            settlements: Vec::new(),
        }
    }

    fn settlements(&self) -> &[SettlementRow] {
        &self.settlements
    }

    fn apply(&mut self, command: Command) -> Result<(), RaceError> {
        match command {
            Command::Bet(bet) => self.slip.push(bet),
            Command::Place => {
                let slip = std::mem::take(&mut self.slip);
                self.engine.set_current_bets(slip)?;
            }
            Command::Start => self.engine.start_race()?,
            Command::Finish(lane) => {
                let result = self.engine.finish_race(lane)?;
                self.record(result);
            }
            Command::Simulate => {
                self.simulator.reset();
                let result = self.simulator.run(&mut self.engine)?;
                self.record(result);
            }
            Command::Reset => self.engine.reset(),
            Command::Deposit(amount) => self.engine.deposit_funds(amount)?,
        }
        Ok(())
    }

    fn record(&mut self, result: SettlementResult) {
        self.settlements.push(SettlementRow {
            race: self.settlements.len() as u32 + 1,
            winner: result.winning_lane,
            staked: result.total_staked,
            winnings: result.total_winnings,
            net_change: result.net_change,
            balance: self.engine.balance(),
        });
    }
}

/// Replays session commands from a CSV reader.
///
/// Rows are streamed. Malformed rows, unknown commands, and commands the
/// engine rejects are logged and skipped.
///
/// # CSV Format
///
/// Expected columns: `command, lane, amount`
/// - `command`: bet, place, start, finish, simulate, reset, deposit
/// - `lane`: Lane number (required for bet and finish)
/// - `amount`: Whole amount (required for bet and deposit)
///
/// # Example
///
/// ```csv
/// command,lane,amount
/// bet,1,100
/// bet,2,50
/// place,,
/// start,,
/// finish,1,
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the CSV structure is invalid.
fn process_session<R: Read>(reader: R, session: &mut Session) -> Result<(), csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for result in rdr.deserialize::<CsvRecord>() {
        match result {
            Ok(record) => {
                let Some(command) = record.into_command() else {
                    tracing::warn!("skipping invalid command record");
                    continue;
                };
                if let Err(e) = session.apply(command) {
                    tracing::warn!(?command, error = %e, "command rejected");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed row");
                continue;
            }
        }
    }

    Ok(())
}

/// Writes settlement rows as CSV.
///
/// # CSV Format
///
/// Columns: `race, winner, staked, winnings, net_change, balance`
fn write_settlements<W: Write>(rows: &[SettlementRow], writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
