// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! Evaluates 5, 6, and 7 cards hands to a [HandRank] using per suit and per
//! rank bit masks, for hands with more than 5 cards the rank is the rank of the
//! best 5 cards hand.
//!
//! Hands of the same rank are ordered with [HandRank::compare] that looks at the
//! descending ranks of all the cards in each hand.
mod rank;
pub use rank::HandRank;
