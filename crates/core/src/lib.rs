// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Phoenix Poker bot core types.
//!
//! This crate has the types shared by the bot components: chips and streets,
//! the JSON messages exchanged with a Cygni Texas Hold'em server, the framing
//! of messages on a byte stream, and the game state built from the server
//! events.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

#[cfg(feature = "connection")]
pub mod connection;
pub mod frame;
pub mod game_state;
pub mod message;
pub mod poker;
