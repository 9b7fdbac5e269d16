// ABOUTME: Interactive console menu for the Maresia training tracker
// ABOUTME: Records sessions, stage results, and extra variables, and prints the prognosis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Maresia Console Binary
//!
//! The interactive flavor of the tracker: a menu loop over the same record,
//! repository, and prognosis core the HTTP server uses. The prognosis engine
//! keeps its fitted model across menu iterations and is retrained after every
//! mutation.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use maresia::{
    config::ServerConfig,
    errors::ErrorCode,
    intelligence::prognosis::{format_prognosis, PrognosisEngine},
    logging,
    models::{AthleteRecord, TrainingSession},
    storage::{HistoryRepository, JsonFileHistory},
};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "maresia-cli")]
#[command(about = "Maresia - interactive training tracker console")]
pub struct Args {
    /// Override history file path
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Athlete name used when no history exists yet
    #[arg(long, default_value = "Wesley Leite")]
    athlete_name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(history_file) = args.history_file {
        config.history.path = history_file;
    }

    logging::init_from_env()?;

    let history = JsonFileHistory::new(config.history.path.clone());
    let mut record = match history.load().await? {
        Some(record) => record,
        None => AthleteRecord::new(args.athlete_name),
    };

    let mut engine = PrognosisEngine::new();
    println!("Maresia tracker - {}", record.name);

    loop {
        println!();
        println!("1) Record sea session");
        println!("2) Record gym session");
        println!("3) Record stage result");
        println!("4) Add extra variable");
        println!("5) Prognosis");
        println!("0) Quit");

        match prompt("> ")?.trim() {
            "1" => {
                let session = prompt_session("sea")?;
                record.record_sea_session(session);
                history.save(&record).await?;
                retrain(&mut engine, &record);
            }
            "2" => {
                let session = prompt_session("gym")?;
                record.record_gym_session(session);
                history.save(&record).await?;
                retrain(&mut engine, &record);
            }
            "3" => {
                let stage = prompt_parsed::<usize>("Stage (1-4): ")?;
                let score = prompt_parsed::<f64>("Score: ")?;
                let placement = prompt_parsed::<u32>("Placement: ")?;
                match record.set_stage_result(stage, score, placement) {
                    Ok(()) => {
                        history.save(&record).await?;
                        println!("Stage {stage} result recorded.");
                        retrain(&mut engine, &record);
                    }
                    Err(e) => println!("{e}"),
                }
            }
            "4" => {
                let name = prompt("Variable name: ")?.trim().to_owned();
                let value = prompt("Current value: ")?.trim().to_owned();
                let impact = prompt_parsed::<u8>("Impact (1-5): ")?;
                match record.add_extra_variable(name, value, impact) {
                    Ok(()) => {
                        history.save(&record).await?;
                        println!("Variable registered.");
                        retrain(&mut engine, &record);
                    }
                    Err(e) => println!("{e}"),
                }
            }
            "5" => match engine.forecast(&record) {
                Ok(projected) => println!("{}", format_prognosis(projected)),
                Err(e) if e.code == ErrorCode::ModelNotTrained => {
                    println!("No trained model yet. Record a stage result first.");
                }
                Err(e) => println!("{e}"),
            },
            "0" => break,
            other => println!("Unknown option: {other}"),
        }
    }

    Ok(())
}

/// Ask the trained-today question and build the session
fn prompt_session(discipline: &str) -> Result<TrainingSession> {
    let trained = prompt(&format!("Did you train at the {discipline} today? (y/n): "))?;
    if trained.trim().eq_ignore_ascii_case("y") {
        let date = Local::now().date_naive();
        println!("Session recorded for {date} with quality 5.");
        Ok(TrainingSession::Trained { date })
    } else {
        let note = prompt("Describe the skipped session: ")?.trim().to_owned();
        println!("Skipped session recorded with quality 1.");
        Ok(TrainingSession::Skipped { note })
    }
}

/// Retrain the cached model, reporting when the record is still too thin
fn retrain(engine: &mut PrognosisEngine, record: &AthleteRecord) {
    match engine.train(record) {
        Ok(()) => println!("Prognosis model trained."),
        Err(e) if e.code == ErrorCode::InsufficientData => {
            println!("Not enough data to train the prognosis model yet.");
        }
        Err(e) => println!("{e}"),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

/// Re-prompt until the input parses
fn prompt_parsed<T: std::str::FromStr>(label: &str) -> Result<T> {
    loop {
        let raw = prompt(label)?;
        match raw.trim().parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Invalid value, try again."),
        }
    }
}
