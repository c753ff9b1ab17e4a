// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Heuristic strategy driven by a win estimate.
//!
//! Each street has its own thresholds, the decision is taken by the first
//! matching rule in this order: desperation all in, overbet guard, optimistic
//! raise or call, cautious call, river all in, and check or fold.
use log::{debug, error};

use phoenix_core::{
    game_state::GameState,
    message::{Action, ActionRequest, ActionType, Message},
    poker::{Chips, Street},
};

use super::{Strategy, normalize};
use crate::estimator::{EstimatorConfig, WinEstimator};

/// Minimum win estimate to go all in post-flop when short of chips.
const LAST_RESORT_THRESHOLD: f64 = 0.5;

/// A call costing more than this multiple of the hand spend is an overbet.
const OVERBET_FACTOR: u32 = 3;

/// River all in cost, as a multiple of the hand spend, up to which the lower
/// win bar applies.
const RIVER_MODERATE_STAKE: f64 = 3.0;
const RIVER_MODERATE_BAR: f64 = 0.7;
const RIVER_HIGH_BAR: f64 = 0.9;

/// A spend limit as a fraction of the chips.
#[derive(Debug, Clone, Copy)]
struct Limit {
    base: f64,
    weight: f64,
    spend_weight: f64,
}

impl Limit {
    const fn new(base: f64, weight: f64, spend_weight: f64) -> Self {
        Self {
            base,
            weight,
            spend_weight,
        }
    }

    fn fraction(&self, score: f64, spent_fraction: f64) -> f64 {
        self.base + score * self.weight + spent_fraction * self.spend_weight
    }
}

/// Street thresholds.
#[derive(Debug, Clone, Copy)]
struct Thresholds {
    optimism_baseline: f64,
    caution_baseline: f64,
    caution_spend_weight: f64,
    raise: Limit,
    call: Limit,
    cautious_call: Limit,
}

const PRE_FLOP: Thresholds = Thresholds {
    optimism_baseline: 0.75,
    caution_baseline: 0.45,
    caution_spend_weight: 0.3,
    raise: Limit::new(0.02, 0.5, 0.1),
    call: Limit::new(0.05, 1.0, 0.2),
    cautious_call: Limit::new(0.02, 0.2, 0.1),
};

const FLOP: Thresholds = Thresholds {
    optimism_baseline: 0.75,
    caution_baseline: 0.5,
    caution_spend_weight: 0.4,
    raise: Limit::new(0.05, 0.8, 0.2),
    call: Limit::new(0.1, 1.0, 0.3),
    cautious_call: Limit::new(0.03, 0.3, 0.2),
};

const TURN: Thresholds = Thresholds {
    optimism_baseline: 0.78,
    caution_baseline: 0.55,
    caution_spend_weight: 0.5,
    raise: Limit::new(0.08, 1.0, 0.3),
    call: Limit::new(0.12, 1.2, 0.4),
    cautious_call: Limit::new(0.04, 0.4, 0.25),
};

const RIVER: Thresholds = Thresholds {
    optimism_baseline: 0.8,
    caution_baseline: 0.6,
    caution_spend_weight: 0.6,
    raise: Limit::new(0.1, 1.5, 0.4),
    call: Limit::new(0.15, 1.5, 0.5),
    cautious_call: Limit::new(0.05, 0.5, 0.3),
};

impl Thresholds {
    fn for_street(street: Street) -> &'static Thresholds {
        match street {
            Street::PreFlop => &PRE_FLOP,
            Street::Flop => &FLOP,
            Street::Turn => &TURN,
            Street::River => &RIVER,
        }
    }
}

/// The heuristic bot state for the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotSession {
    /// The bot chips at the start of the hand.
    pub chips: Chips,
    /// The chips spent in this hand.
    pub spent: Chips,
    /// A player went all in during this hand.
    pub all_in_seen: bool,
}

impl BotSession {
    /// Creates a session with the given chips.
    pub fn new(chips: Chips) -> Self {
        Self {
            chips,
            spent: Chips::ZERO,
            all_in_seen: false,
        }
    }

    fn start_hand(&mut self) {
        self.spent = Chips::ZERO;
        self.all_in_seen = false;
    }
}

/// The inputs of a decision.
#[derive(Debug, Clone, Copy)]
struct Situation {
    street: Street,
    win: f64,
    session: BotSession,
    small_blind: Chips,
    big_blind: Chips,
}

/// Picks an action, `None` if no rule matched.
fn decide(s: &Situation, req: &ActionRequest) -> Option<Action> {
    let t = Thresholds::for_street(s.street);
    let chips = s.session.chips.as_f64().max(1.0);
    let spent = s.session.spent.as_f64();
    let spent_fraction = spent / chips;
    let win = s.win;

    let optimism = win - t.optimism_baseline;
    let caution = win - t.caution_baseline + spent_fraction * t.caution_spend_weight;
    let raise_limit = chips * t.raise.fraction(optimism, spent_fraction);
    let call_limit = chips * t.call.fraction(optimism, spent_fraction);
    let cautious_call_limit = chips * t.cautious_call.fraction(caution, spent_fraction);

    // Short of chips.
    if let Some(all_in) = req.all_in() {
        let remaining = s.session.chips - s.session.spent;
        if remaining <= s.small_blind {
            return Some(all_in);
        }

        if remaining <= s.big_blind && (s.street == Street::PreFlop || win > LAST_RESORT_THRESHOLD)
        {
            return Some(all_in);
        }
    }

    // Overbet guard.
    if let Some(call) = req.call() {
        if s.session.spent > Chips::ZERO && call.amount > s.session.spent * OVERBET_FACTOR {
            let bounded = s.street == Street::PreFlop || call.amount.as_f64() <= spent * (1.0 + win);
            if optimism > 0.0 && bounded {
                return Some(call);
            }

            if let Some(check) = req.check() {
                return Some(check);
            }
        }
    }

    if optimism > 0.0 {
        if let Some(raise) = req.raise().filter(|a| a.amount.as_f64() < raise_limit) {
            return Some(raise);
        }

        if let Some(call) = req.call().filter(|a| a.amount.as_f64() < call_limit) {
            return Some(call);
        }
    }

    if caution > 0.0 {
        if let Some(call) = req.call().filter(|a| a.amount.as_f64() < cautious_call_limit) {
            return Some(call);
        }
    }

    if s.street == Street::River && req.call().is_none() && !s.session.all_in_seen {
        if let Some(all_in) = req.all_in() {
            let base = spent.max(s.big_blind.as_f64()).max(1.0);
            let bar = if all_in.amount.as_f64() / base <= RIVER_MODERATE_STAKE {
                RIVER_MODERATE_BAR
            } else {
                RIVER_HIGH_BAR
            };

            if win > bar {
                return Some(all_in);
            }
        }
    }

    req.check().or_else(|| Some(req.fold()))
}

/// A strategy that bets according to the estimated probability of winning.
#[derive(Debug)]
pub struct HeuristicStrategy {
    estimator: WinEstimator,
    session: BotSession,
    starting_chips: Chips,
    win: f64,
}

impl HeuristicStrategy {
    /// Creates a strategy with the given starting chips.
    pub fn new(starting_chips: Chips, config: EstimatorConfig) -> Self {
        Self::with_estimator(starting_chips, WinEstimator::new(config))
    }

    /// Creates a strategy that uses the given estimator.
    pub fn with_estimator(starting_chips: Chips, estimator: WinEstimator) -> Self {
        Self {
            estimator,
            session: BotSession::new(starting_chips),
            starting_chips,
            win: 0.0,
        }
    }

    /// The current hand session.
    pub fn session(&self) -> &BotSession {
        &self.session
    }
}

impl Strategy for HeuristicStrategy {
    fn act(&mut self, req: &ActionRequest, state: &GameState) -> Action {
        self.win = match self.estimator.estimate(state) {
            Ok(win) => win,
            Err(err) => {
                error!("Win estimate failed: {err}");
                0.0
            }
        };

        let situation = Situation {
            street: state.street(),
            win: self.win,
            session: self.session,
            small_blind: state.small_blind(),
            big_blind: state.big_blind(),
        };

        let action = normalize(decide(&situation, req), req);

        self.session.spent += action.amount;
        if action.action_type == ActionType::AllIn {
            self.session.all_in_seen = true;
        }

        debug!(
            "{} win {:.3} chips {} spent {} -> {} {}",
            situation.street,
            self.win,
            self.session.chips,
            self.session.spent,
            action.action_type.label(),
            action.amount
        );

        action
    }

    fn update(&mut self, msg: &Message, state: &GameState) {
        match msg {
            Message::PlayIsStarted(_) => {
                self.session.start_hand();
                self.estimator.reset();
                self.win = 0.0;
                if let Some(player) = state.own_player() {
                    self.session.chips = player.chip_count;
                }
            }
            Message::YouHaveBeenDealtCard(_) | Message::CommunityCardDealt(_) => {
                self.estimator.mark_stale();
            }
            Message::PlayerWentAllIn(_) => {
                self.session.all_in_seen = true;
            }
            Message::YouWonAmount(e) => {
                self.session.chips = e.your_chip_amount;
            }
            Message::TableIsDone(_) => {
                self.session = BotSession::new(self.starting_chips);
                self.estimator.reset();
            }
            _ => {}
        }
    }

    fn win_estimate(&self) -> Option<f64> {
        Some(self.win)
    }

    fn chips(&self) -> Option<Chips> {
        Some(self.session.chips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::tests::request;
    use phoenix_core::{
        message::*,
        poker::{Card, GamePlayer, Rank, Suit, TableId},
    };
    use rand::{SeedableRng, rngs::StdRng};

    const STREETS: [Street; 4] = [Street::PreFlop, Street::Flop, Street::Turn, Street::River];

    fn situation(street: Street, win: f64, chips: u32, spent: u32) -> Situation {
        Situation {
            street,
            win,
            session: BotSession {
                chips: Chips::new(chips),
                spent: Chips::new(spent),
                all_in_seen: false,
            },
            small_blind: Chips::new(5),
            big_blind: Chips::new(10),
        }
    }

    fn choose(s: &Situation, req: &ActionRequest) -> ActionType {
        normalize(decide(s, req), req).action_type
    }

    #[test]
    fn only_fold() {
        let req = request(&[(ActionType::Fold, 0)]);
        for street in STREETS {
            for win in [0.0, 0.5, 1.0] {
                let s = situation(street, win, 10_000, 0);
                assert_eq!(choose(&s, &req), ActionType::Fold);
            }
        }
    }

    #[test]
    fn never_fold_when_check_is_possible() {
        let req = request(&[
            (ActionType::Check, 0),
            (ActionType::Raise, 400),
            (ActionType::AllIn, 9_000),
            (ActionType::Fold, 0),
        ]);

        for street in STREETS {
            for win in (0..=10).map(|w| w as f64 / 10.0) {
                for spent in [0, 100, 1_000, 9_000] {
                    let s = situation(street, win, 10_000, spent);
                    assert_ne!(choose(&s, &req), ActionType::Fold, "{street} {win} {spent}");
                }
            }
        }
    }

    #[test]
    fn call_with_strong_hand() {
        let req = request(&[(ActionType::Call, 500), (ActionType::Fold, 0)]);
        for street in STREETS {
            let s = situation(street, 0.9, 10_000, 0);
            assert_eq!(choose(&s, &req), ActionType::Call, "{street}");
        }
    }

    #[test]
    fn check_with_weak_hand() {
        let req = request(&[(ActionType::Check, 0), (ActionType::Raise, 50)]);
        for street in STREETS {
            let s = situation(street, 0.1, 10_000, 0);
            assert_eq!(choose(&s, &req), ActionType::Check, "{street}");
        }
    }

    #[test]
    fn raise_with_very_strong_hand() {
        let req = request(&[
            (ActionType::Call, 100),
            (ActionType::Raise, 200),
            (ActionType::Fold, 0),
        ]);
        let s = situation(Street::Flop, 0.95, 10_000, 0);
        assert_eq!(choose(&s, &req), ActionType::Raise);
    }

    #[test]
    fn desperation_all_in() {
        let req = request(&[(ActionType::Check, 0), (ActionType::AllIn, 8)]);

        // Remaining chips below the big blind.
        let s = situation(Street::PreFlop, 0.1, 1_000, 992);
        assert_eq!(choose(&s, &req), ActionType::AllIn);

        let s = situation(Street::Flop, 0.3, 1_000, 992);
        assert_eq!(choose(&s, &req), ActionType::Check);

        let s = situation(Street::Flop, 0.6, 1_000, 992);
        assert_eq!(choose(&s, &req), ActionType::AllIn);

        // Remaining chips below the small blind.
        for street in STREETS {
            let s = situation(street, 0.0, 1_000, 996);
            assert_eq!(choose(&s, &req), ActionType::AllIn);
        }
    }

    #[test]
    fn overbet_guard() {
        let req = request(&[
            (ActionType::Check, 0),
            (ActionType::Call, 400),
            (ActionType::Fold, 0),
        ]);

        // Pre-flop an optimistic bot calls the overbet.
        let s = situation(Street::PreFlop, 0.8, 10_000, 100);
        assert_eq!(choose(&s, &req), ActionType::Call);

        // Post-flop the call is bounded by the spend.
        let s = situation(Street::Flop, 0.8, 10_000, 100);
        assert_eq!(choose(&s, &req), ActionType::Check);

        let s = situation(Street::PreFlop, 0.5, 10_000, 100);
        assert_eq!(choose(&s, &req), ActionType::Check);

        // Without a check the guard falls through.
        let req = request(&[(ActionType::Call, 400), (ActionType::Fold, 0)]);
        let s = situation(Street::PreFlop, 0.5, 10_000, 100);
        assert_eq!(choose(&s, &req), ActionType::Fold);
    }

    #[test]
    fn river_all_in() {
        let req = request(&[(ActionType::AllIn, 2_000), (ActionType::Fold, 0)]);

        let s = situation(Street::River, 0.75, 10_000, 1_000);
        assert_eq!(choose(&s, &req), ActionType::AllIn);

        let mut s = situation(Street::River, 0.75, 10_000, 1_000);
        s.session.all_in_seen = true;
        assert_eq!(choose(&s, &req), ActionType::Fold);

        // A large stake needs a higher bar.
        let s = situation(Street::River, 0.75, 10_000, 100);
        assert_eq!(choose(&s, &req), ActionType::Fold);

        let s = situation(Street::River, 0.95, 10_000, 100);
        assert_eq!(choose(&s, &req), ActionType::AllIn);

        // Only on the river.
        let s = situation(Street::Turn, 0.75, 10_000, 1_000);
        assert_eq!(choose(&s, &req), ActionType::Fold);
    }

    fn strategy() -> HeuristicStrategy {
        let estimator = WinEstimator::with_rng(
            EstimatorConfig {
                sample_count: 500,
                ..Default::default()
            },
            StdRng::seed_from_u64(21),
        );
        HeuristicStrategy::with_estimator(Chips::new(10_000), estimator)
    }

    /// Applies a message to both the state and the strategy.
    fn apply(state: &mut GameState, strategy: &mut HeuristicStrategy, msg: Message) {
        state.apply(&msg).unwrap();
        strategy.update(&msg, state);
    }

    fn start_hand(state: &mut GameState, strategy: &mut HeuristicStrategy, chips: u32) {
        apply(
            state,
            strategy,
            Message::from(PlayIsStarted {
                table_id: TableId::new(3),
                players: vec![
                    GamePlayer::new("Phoenix", Chips::new(chips)),
                    GamePlayer::new("Bob", Chips::new(5_000)),
                ],
                small_blind_amount: Chips::new(5),
                big_blind_amount: Chips::new(10),
                dealer: None,
            }),
        );
    }

    #[test]
    fn spend_accumulates_in_hand() {
        let mut state = GameState::new("Phoenix");
        let mut strategy = strategy();
        start_hand(&mut state, &mut strategy, 8_000);
        assert_eq!(strategy.session().chips, Chips::new(8_000));

        for card in [
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::Ace, Suit::Clubs),
        ] {
            apply(
                &mut state,
                &mut strategy,
                Message::from(YouHaveBeenDealtCard { card }),
            );
        }

        let req = request(&[
            (ActionType::Call, 10),
            (ActionType::Raise, 20),
            (ActionType::Fold, 0),
        ]);

        let action = strategy.act(&req, &state);
        assert_eq!(action.action_type, ActionType::Raise);
        assert!(strategy.win_estimate().unwrap() > 0.9);

        let action = strategy.act(&req, &state);
        assert_eq!(action.action_type, ActionType::Raise);
        assert_eq!(strategy.session().spent, Chips::new(40));

        // A new hand resets the spend and the all in flag.
        apply(
            &mut state,
            &mut strategy,
            Message::from(PlayerWentAllIn {
                player: GamePlayer::new("Bob", Chips::ZERO),
                all_in_amount: Chips::new(5_000),
            }),
        );
        assert!(strategy.session().all_in_seen);

        start_hand(&mut state, &mut strategy, 7_000);
        assert_eq!(strategy.session(), &BotSession::new(Chips::new(7_000)));
        assert_eq!(strategy.win_estimate(), Some(0.0));
    }

    #[test]
    fn chips_follow_wins_and_tables() {
        let mut state = GameState::new("Phoenix");
        let mut strategy = strategy();
        start_hand(&mut state, &mut strategy, 9_000);

        apply(
            &mut state,
            &mut strategy,
            Message::from(YouWonAmount {
                won_amount: Chips::new(500),
                your_chip_amount: Chips::new(9_500),
            }),
        );
        assert_eq!(strategy.chips(), Some(Chips::new(9_500)));

        apply(
            &mut state,
            &mut strategy,
            Message::from(TableIsDone {
                table_id: TableId::new(3),
                players: vec![],
            }),
        );
        assert_eq!(strategy.chips(), Some(Chips::new(10_000)));
    }

    #[test]
    fn estimate_error_uses_zero_win() {
        let mut state = GameState::new("Phoenix");
        let mut strategy = strategy();
        start_hand(&mut state, &mut strategy, 10_000);

        // No hole cards dealt.
        let req = request(&[(ActionType::Check, 0), (ActionType::Fold, 0)]);
        assert_eq!(strategy.act(&req, &state).action_type, ActionType::Check);
        assert_eq!(strategy.win_estimate(), Some(0.0));

        let req = request(&[(ActionType::Call, 10), (ActionType::Fold, 0)]);
        assert_eq!(strategy.act(&req, &state).action_type, ActionType::Fold);
        assert_eq!(strategy.session().spent, Chips::ZERO);
    }
}
