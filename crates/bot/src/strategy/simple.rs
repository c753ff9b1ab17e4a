// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Rule of thumb strategy that looks only at its own hand.
use log::debug;

use phoenix_core::{
    game_state::GameState,
    message::{Action, ActionRequest, Message},
    poker::{HandRank, Rank, Street},
};

use super::{Strategy, normalize};

/// A strategy that plays high cards pre-flop and its hand rank post-flop.
#[derive(Debug, Default)]
pub struct SimpleStrategy;

impl SimpleStrategy {
    fn choose(req: &ActionRequest, state: &GameState) -> Option<Action> {
        let mut cards = state.own_cards().to_vec();
        cards.extend_from_slice(state.community_cards());

        if state.street() == Street::PreFlop || !(5..=7).contains(&cards.len()) {
            if let Some(check) = req.check() {
                return Some(check);
            }

            if state.own_cards().iter().any(|c| c.rank() > Rank::Ten) {
                return req.call();
            }

            return Some(req.fold());
        }

        let rank = HandRank::eval(&cards);
        debug!("Holding {rank}");

        if rank > HandRank::TwoPair {
            if let Some(all_in) = req.all_in() {
                return Some(all_in);
            }
        }

        if let Some(check) = req.check() {
            return Some(check);
        }

        if rank > HandRank::OnePair {
            if let Some(raise) = req.raise() {
                return Some(raise);
            }
        }

        if rank >= HandRank::OnePair {
            if let Some(call) = req.call() {
                return Some(call);
            }
        }

        Some(req.fold())
    }
}

impl Strategy for SimpleStrategy {
    fn act(&mut self, req: &ActionRequest, state: &GameState) -> Action {
        normalize(Self::choose(req, state), req)
    }

    fn update(&mut self, _msg: &Message, _state: &GameState) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::tests::request;
    use phoenix_core::{
        message::*,
        poker::{Card, Suit},
    };

    fn state(street: Street, cards: &[Card], community: &[Card]) -> GameState {
        let mut state = GameState::new("Phoenix");
        state
            .apply(&Message::from(TableChangedState { state: street }))
            .unwrap();
        for &card in cards {
            state
                .apply(&Message::from(YouHaveBeenDealtCard { card }))
                .unwrap();
        }
        for &card in community {
            state
                .apply(&Message::from(CommunityCardDealt { card }))
                .unwrap();
        }
        state
    }

    #[test]
    fn pre_flop() {
        let high = [
            Card::new(Rank::Jack, Suit::Clubs),
            Card::new(Rank::Four, Suit::Hearts),
        ];
        let low = [
            Card::new(Rank::Ten, Suit::Clubs),
            Card::new(Rank::Four, Suit::Hearts),
        ];

        let mut bot = SimpleStrategy;
        let req = request(&[(ActionType::Call, 10), (ActionType::Fold, 0)]);
        let action = bot.act(&req, &state(Street::PreFlop, &high, &[]));
        assert_eq!(action.action_type, ActionType::Call);

        let action = bot.act(&req, &state(Street::PreFlop, &low, &[]));
        assert_eq!(action.action_type, ActionType::Fold);

        let req = request(&[(ActionType::Check, 0), (ActionType::Raise, 10)]);
        let action = bot.act(&req, &state(Street::PreFlop, &high, &[]));
        assert_eq!(action.action_type, ActionType::Check);
    }

    #[test]
    fn post_flop() {
        let cards = [
            Card::new(Rank::Jack, Suit::Clubs),
            Card::new(Rank::Jack, Suit::Hearts),
        ];
        let trips = [
            Card::new(Rank::Jack, Suit::Spades),
            Card::new(Rank::Four, Suit::Hearts),
            Card::new(Rank::Nine, Suit::Diamonds),
        ];
        let dry = [
            Card::new(Rank::Deuce, Suit::Spades),
            Card::new(Rank::Four, Suit::Hearts),
            Card::new(Rank::Nine, Suit::Diamonds),
        ];

        let mut bot = SimpleStrategy;
        let req = request(&[
            (ActionType::Call, 50),
            (ActionType::Raise, 100),
            (ActionType::AllIn, 1000),
            (ActionType::Fold, 0),
        ]);

        let action = bot.act(&req, &state(Street::Flop, &cards, &trips));
        assert_eq!(action.action_type, ActionType::AllIn);

        // A pair calls.
        let action = bot.act(&req, &state(Street::Flop, &cards, &dry));
        assert_eq!(action.action_type, ActionType::Call);

        let req = request(&[(ActionType::Check, 0), (ActionType::Raise, 100)]);
        let action = bot.act(&req, &state(Street::Flop, &cards, &dry));
        assert_eq!(action.action_type, ActionType::Check);

        let no_pair = [
            Card::new(Rank::King, Suit::Clubs),
            Card::new(Rank::Queen, Suit::Hearts),
        ];
        let req = request(&[(ActionType::Call, 50), (ActionType::Fold, 0)]);
        let action = bot.act(&req, &state(Street::Flop, &no_pair, &dry));
        assert_eq!(action.action_type, ActionType::Fold);
    }
}
