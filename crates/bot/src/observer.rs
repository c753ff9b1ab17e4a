// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Session observers.
use log::info;

use phoenix_core::{
    game_state::GameState,
    message::{Action, Message},
    poker::{Chips, Street, TableId},
};

use crate::Strategy;

/// A view of the session after an event or a decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// The current table.
    pub table_id: TableId,
    /// The hand index at the current table.
    pub play_index: u32,
    /// The current street.
    pub street: Street,
    /// The strategy win estimate.
    pub win_estimate: Option<f64>,
    /// The bot chips.
    pub chips: Chips,
    /// The current pot.
    pub pot: Chips,
}

impl Snapshot {
    /// Creates a snapshot of the game and strategy state.
    pub fn new(state: &GameState, strategy: &dyn Strategy) -> Self {
        let chips = strategy
            .chips()
            .or_else(|| state.own_player().map(|p| p.chip_count))
            .unwrap_or_default();

        Self {
            table_id: state.table_id(),
            play_index: state.play_index(),
            street: state.street(),
            win_estimate: strategy.win_estimate(),
            chips,
            pot: state.pot(),
        }
    }
}

/// Observes a session events and decisions.
pub trait Observer: Send {
    /// Called after an event has been applied.
    fn on_event(&mut self, _msg: &Message, _snapshot: &Snapshot) {}

    /// Called after an action has been sent.
    fn on_decision(&mut self, _action: &Action, _snapshot: &Snapshot) {}
}

/// An observer that ignores everything.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// An observer that logs decisions and finished tables.
#[derive(Debug)]
pub struct LogObserver {
    host: String,
}

impl LogObserver {
    /// Creates an observer for the given server host.
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// The server page that replays a table.
    pub fn table_url(&self, table_id: TableId) -> String {
        format!("http://{}/showgame/table/{}", self.host, table_id)
    }

    /// The replay page when `msg` ends the table in `snapshot`.
    fn replay_url(&self, msg: &Message, snapshot: &Snapshot) -> Option<String> {
        matches!(msg, Message::TableIsDone(_)).then(|| self.table_url(snapshot.table_id))
    }
}

impl Observer for LogObserver {
    fn on_event(&mut self, msg: &Message, snapshot: &Snapshot) {
        if let Message::PlayIsStarted(_) = msg {
            info!(
                "Table {} play {} started, chips {}",
                snapshot.table_id, snapshot.play_index, snapshot.chips
            );
        }

        if let Some(url) = self.replay_url(msg, snapshot) {
            info!("View at {url}");
        }
    }

    fn on_decision(&mut self, action: &Action, snapshot: &Snapshot) {
        let win = snapshot
            .win_estimate
            .map(|w| format!("{w:.2}"))
            .unwrap_or_else(|| "-".to_string());

        info!(
            "Table {} play {} {}: {} {} win {} chips {} pot {}",
            snapshot.table_id,
            snapshot.play_index,
            snapshot.street,
            action.action_type.label(),
            action.amount,
            win,
            snapshot.chips,
            snapshot.pot
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimpleStrategy;
    use phoenix_core::{
        message::{PlayIsStarted, TableIsDone},
        poker::GamePlayer,
    };

    fn started(table_id: u64) -> GameState {
        let mut state = GameState::new("Phoenix");
        state
            .apply(&Message::from(PlayIsStarted {
                table_id: TableId::new(table_id),
                players: vec![GamePlayer::new("Phoenix", Chips::new(1_234))],
                small_blind_amount: Chips::new(5),
                big_blind_amount: Chips::new(10),
                dealer: None,
            }))
            .unwrap();
        state
    }

    #[test]
    fn snapshot_falls_back_to_player_chips() {
        let state = started(5);
        let snapshot = Snapshot::new(&state, &SimpleStrategy);
        assert_eq!(snapshot.table_id, TableId::new(5));
        assert_eq!(snapshot.chips, Chips::new(1_234));
        assert_eq!(snapshot.win_estimate, None);
        assert_eq!(snapshot.street, Street::PreFlop);
    }

    #[test]
    fn table_url() {
        let observer = LogObserver::new("poker.cygni.se");
        assert_eq!(
            observer.table_url(TableId::new(42)),
            "http://poker.cygni.se/showgame/table/42"
        );
    }

    #[test]
    fn replay_url_uses_current_table() {
        let mut state = started(17);
        let done = Message::from(TableIsDone {
            table_id: TableId::NO_TABLE,
            players: vec![],
        });
        state.apply(&done).unwrap();

        let observer = LogObserver::new("poker.cygni.se");
        let snapshot = Snapshot::new(&state, &SimpleStrategy);
        assert_eq!(
            observer.replay_url(&done, &snapshot).as_deref(),
            Some("http://poker.cygni.se/showgame/table/17")
        );

        let next = Message::from(PlayIsStarted {
            table_id: TableId::new(17),
            players: vec![],
            small_blind_amount: Chips::new(5),
            big_blind_amount: Chips::new(10),
            dealer: None,
        });
        assert_eq!(observer.replay_url(&next, &snapshot), None);
    }
}
