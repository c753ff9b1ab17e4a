// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Phoenix Bot.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use clap::Parser;
use log::{error, info};
use std::time::Duration;

use phoenix_bot::{Config, EstimatorConfig, Exit, StrategyKind};
use phoenix_core::poker::Chips;

#[derive(Debug, Parser)]
struct Cli {
    /// The server host.
    #[clap(long, default_value = "poker.cygni.se")]
    host: String,
    /// The server port.
    #[clap(long, short, default_value_t = 4711)]
    port: u16,
    /// The bot name.
    #[clap(long, short, default_value = "Phoenix-HeuristicBot")]
    name: String,
    /// The room to play in.
    #[clap(long, short, default_value = "TRAINING")]
    room: String,
    /// The bot strategy.
    #[clap(long, short, value_enum, default_value_t = StrategyKind::Heuristic)]
    strategy: StrategyKind,
    /// The chips at the start of a table.
    #[clap(long, default_value_t = 10_000)]
    starting_chips: u32,
    /// Number of sampled hands for each win estimate.
    #[clap(long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
    samples: u32,
    /// Number of threads that sample hands.
    #[clap(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=64))]
    workers: u8,
    /// Stops sampling after this many milliseconds.
    #[clap(long)]
    timeout_ms: Option<u64>,
    /// Enables debug logs.
    #[clap(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let config = Config {
        host: cli.host,
        port: cli.port,
        name: cli.name,
        room: cli.room,
        strategy: cli.strategy,
        starting_chips: Chips::new(cli.starting_chips),
        estimator: EstimatorConfig {
            sample_count: cli.samples as usize,
            workers: cli.workers as usize,
            timeout: cli.timeout_ms.map(Duration::from_millis),
        },
    };

    match phoenix_bot::run(config).await {
        Ok(Exit::ServerShutdown(message)) => info!("Server shutdown. Bye! ({message})"),
        Ok(Exit::ConnectionClosed) => info!("Connection closed"),
        Ok(Exit::Interrupted) => info!("Bye!"),
        Err(e) => error!("{e}"),
    }
}
