// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Phoenix Poker bot.
//!
//! The bot connects to a Cygni Texas Hold'em server, registers for play in a
//! room, and answers each action request with the action chosen by a
//! [Strategy].
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use log::info;
use tokio::signal;

use phoenix_core::{connection, poker::Chips};

mod client;
pub mod estimator;
pub mod observer;
pub mod strategy;

pub use client::{Client, Exit};
pub use estimator::{EstimateError, EstimatorConfig, WinEstimator};
pub use observer::{LogObserver, NoopObserver, Observer, Snapshot};
pub use strategy::{HeuristicStrategy, SimpleStrategy, Strategy};

/// The strategies the bot can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyKind {
    /// Bets on the estimated probability of winning.
    Heuristic,
    /// Bets on high cards and hand ranks.
    Simple,
}

/// Bot configuration.
#[derive(Debug)]
pub struct Config {
    /// The server host.
    pub host: String,
    /// The server port.
    pub port: u16,
    /// The bot name.
    pub name: String,
    /// The room to play in.
    pub room: String,
    /// The strategy to play.
    pub strategy: StrategyKind,
    /// The chips at the start of a table.
    pub starting_chips: Chips,
    /// The win estimator configuration.
    pub estimator: EstimatorConfig,
}

impl Config {
    fn new_strategy(&self) -> Box<dyn Strategy> {
        match self.strategy {
            StrategyKind::Heuristic => Box::new(HeuristicStrategy::new(
                self.starting_chips,
                self.estimator.clone(),
            )),
            StrategyKind::Simple => Box::new(SimpleStrategy),
        }
    }
}

/// Connects to the server and plays until the session ends or Ctrl-C.
pub async fn run(config: Config) -> Result<Exit> {
    info!("Bot {} plays {:?}", config.name, config.strategy);
    info!("Connecting to {}:{}...", config.host, config.port);

    let conn = connection::connect(&config.host, config.port).await?;
    let mut client = Client::new(
        conn,
        &config.name,
        &config.room,
        config.new_strategy(),
        Box::new(LogObserver::new(&config.host)),
    );

    let exit = tokio::select! {
        res = client.run() => res?,
        _ = signal::ctrl_c() => {
            info!("Received Ctrl-c signal");
            Exit::Interrupted
        }
    };

    client.close().await;

    Ok(exit)
}
