// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Client game state types.
use log::{debug, info};
use thiserror::Error;

use crate::{
    message::Message,
    poker::{Card, Chips, GamePlayer, Street, TableId},
};

/// The server is shutting down and the session must end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("server is shutting down: {message}")]
pub struct ServerShutdown {
    /// The server shutdown message.
    pub message: String,
}

/// This client game state.
///
/// The state is built from the server events only, each event must be applied
/// once and in the order it was received.
#[derive(Debug)]
pub struct GameState {
    nickname: String,
    table_id: TableId,
    play_index: u32,
    street: Street,
    small_blind: Chips,
    big_blind: Chips,
    own_cards: Vec<Card>,
    community_cards: Vec<Card>,
    pot: Chips,
    players_at_table: Vec<GamePlayer>,
    players_in_play: Vec<GamePlayer>,
}

impl GameState {
    /// Creates a new state for the local player.
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            table_id: TableId::NO_TABLE,
            play_index: 0,
            street: Street::PreFlop,
            small_blind: Chips::ZERO,
            big_blind: Chips::ZERO,
            own_cards: Vec::with_capacity(2),
            community_cards: Vec::with_capacity(5),
            pot: Chips::ZERO,
            players_at_table: Vec::default(),
            players_in_play: Vec::default(),
        }
    }

    /// Applies a server message to this state.
    pub fn apply(&mut self, msg: &Message) -> Result<(), ServerShutdown> {
        match msg {
            Message::PlayIsStarted(e) => {
                self.own_cards.clear();
                self.community_cards.clear();
                self.pot = Chips::ZERO;
                self.street = Street::PreFlop;

                if self.table_id == e.table_id {
                    self.play_index += 1;
                } else {
                    self.play_index = 0;
                }

                self.table_id = e.table_id;
                self.players_at_table = e.players.clone();
                self.players_in_play = e.players.clone();
                self.small_blind = e.small_blind_amount;
                self.big_blind = e.big_blind_amount;

                debug!(
                    "Play {} started at table {} with {} players",
                    self.play_index,
                    self.table_id,
                    self.players_at_table.len()
                );
            }
            Message::TableChangedState(e) => {
                self.street = e.state;
            }
            Message::CommunityCardDealt(e) => {
                self.community_cards.push(e.card);
            }
            Message::YouHaveBeenDealtCard(e) => {
                self.own_cards.push(e.card);
            }
            Message::PlayerFolded(e) => self.leave_play(&e.player),
            Message::PlayerChecked(e) => self.leave_play(&e.player),
            Message::PlayerForcedFolded(e) => self.leave_play(&e.player),
            Message::PlayerQuit(e) => {
                self.leave_play(&e.player);
                self.players_at_table.retain(|p| p.name != e.player.name);
            }
            Message::PlayerBetSmallBlind(e) => self.pot += e.small_blind,
            Message::PlayerBetBigBlind(e) => self.pot += e.big_blind,
            Message::PlayerCalled(e) => self.pot += e.call_bet,
            Message::PlayerRaised(e) => self.pot += e.raise_bet,
            Message::PlayerWentAllIn(e) => self.pot += e.all_in_amount,
            Message::TableIsDone(e) => {
                info!("Table {} is done", e.table_id);
                self.players_at_table.clear();
                self.players_in_play.clear();
                self.own_cards.clear();
                self.community_cards.clear();
            }
            Message::ShowDown(e) => {
                for p in &e.players_show_down {
                    debug!(
                        "Showdown {} {} won {}",
                        p.player, p.hand.poker_hand, p.won_amount
                    );
                }
            }
            Message::YouWonAmount(e) => {
                info!(
                    "{} won {} and has {} chips",
                    self.nickname, e.won_amount, e.your_chip_amount
                );
            }
            Message::ServerIsShuttingDown(e) => {
                return Err(ServerShutdown {
                    message: e.message.clone(),
                });
            }
            Message::Unrecognized(raw) => {
                debug!("Ignoring unrecognized message {raw}");
            }
            Message::RegisterForPlay(_)
            | Message::RegisterForPlayResponse(_)
            | Message::ActionRequest(_)
            | Message::ActionResponse(_) => {}
        }

        Ok(())
    }

    fn leave_play(&mut self, player: &GamePlayer) {
        self.players_in_play.retain(|p| p.name != player.name);
    }

    /// The local player nickname.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// The current table id.
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// The index of the current hand at this table, 0 for the first hand.
    pub fn play_index(&self) -> u32 {
        self.play_index
    }

    /// The current street.
    pub fn street(&self) -> Street {
        self.street
    }

    /// The current hand small blind.
    pub fn small_blind(&self) -> Chips {
        self.small_blind
    }

    /// The current hand big blind.
    pub fn big_blind(&self) -> Chips {
        self.big_blind
    }

    /// The local player hole cards.
    pub fn own_cards(&self) -> &[Card] {
        &self.own_cards
    }

    /// The community cards.
    pub fn community_cards(&self) -> &[Card] {
        &self.community_cards
    }

    /// The chips bet in the current hand.
    pub fn pot(&self) -> Chips {
        self.pot
    }

    /// The players sitting at the table.
    pub fn players_at_table(&self) -> &[GamePlayer] {
        &self.players_at_table
    }

    /// The players still playing the current hand.
    pub fn players_in_play(&self) -> &[GamePlayer] {
        &self.players_in_play
    }

    /// The local player as reported at the start of the hand.
    pub fn own_player(&self) -> Option<&GamePlayer> {
        self.players_at_table
            .iter()
            .find(|p| p.name == self.nickname)
    }
}
