// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker bot strategies.
use phoenix_core::{
    game_state::GameState,
    message::{Action, ActionRequest, ActionType, Message},
    poker::Chips,
};

mod heuristic;
mod simple;

pub use heuristic::{BotSession, HeuristicStrategy};
pub use simple::SimpleStrategy;

/// A Poker bot strategy.
pub trait Strategy: Send {
    /// Chooses an action given a request and the game state.
    ///
    /// The returned action must be one of the request actions.
    fn act(&mut self, req: &ActionRequest, state: &GameState) -> Action;

    /// Updates the strategy with a server message, the game state has already
    /// applied the message.
    fn update(&mut self, msg: &Message, state: &GameState);

    /// The last win estimate if this strategy computes one.
    fn win_estimate(&self) -> Option<f64> {
        None
    }

    /// The chips tracked by this strategy if any.
    fn chips(&self) -> Option<Chips> {
        None
    }
}

/// Turns a strategy choice into a legal action.
///
/// A missing choice or a fold when a check is possible becomes a check, if
/// there is no check the result is a fold.
pub fn normalize(choice: Option<Action>, req: &ActionRequest) -> Action {
    match choice {
        Some(action) if action.action_type == ActionType::Fold => req.check().unwrap_or(action),
        Some(action) => action,
        None => req.check().unwrap_or_else(|| req.fold()),
    }
}
