// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Phoenix Poker hand evaluator.
//!
//! To use the evaluator create a hand and use [HandRank] to evaluate the hand
//! and compare it with other hands:
//!
//! ```
//! # use phoenix_eval::*;
//! # use std::cmp::Ordering;
//! let pair = [
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//!     Card::new(Rank::Nine, Suit::Clubs),
//!     Card::new(Rank::Five, Suit::Diamonds),
//!     Card::new(Rank::Deuce, Suit::Clubs),
//! ];
//! let high = [
//!     Card::new(Rank::King, Suit::Spades),
//!     Card::new(Rank::Queen, Suit::Hearts),
//!     Card::new(Rank::Nine, Suit::Clubs),
//!     Card::new(Rank::Five, Suit::Diamonds),
//!     Card::new(Rank::Deuce, Suit::Clubs),
//! ];
//!
//! let (r1, r2) = (HandRank::eval(&pair), HandRank::eval(&high));
//! assert_eq!(r1, HandRank::OnePair);
//! assert_eq!(HandRank::compare(r1, &pair, r2, &high), Ordering::Greater);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::HandRank;

// Reexport cards types.
pub use phoenix_cards::{Card, Deck, Rank, Suit};
