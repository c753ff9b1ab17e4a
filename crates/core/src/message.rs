// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Type definitions for messages between the client and server.
//!
//! Messages are JSON objects with camelCase field names and a `type` field that
//! holds the server class name of the message. Incoming frames are decoded in
//! two steps: the frame is parsed to a generic JSON value to read the `type`
//! tag, then the decoder registered for that tag builds the [Message] variant.
//! Frames with a tag that has no decoder become [Message::Unrecognized].
use ahash::AHashMap;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

use crate::{
    frame::DELIMITER,
    poker::{Card, Chips, GamePlayer, Street, TableId},
};

/// The field that holds a message type.
pub const TYPE_FIELD: &str = "type";

/// A frame decoding or encoding error.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The frame is not a valid JSON object.
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The frame has no type tag.
    #[error("frame has no type tag")]
    MissingType,
    /// The frame payload doesn't match the schema for its type.
    #[error("invalid {tag} payload: {source}")]
    InvalidPayload {
        /// The frame type tag.
        tag: String,
        /// The decoding error.
        source: serde_json::Error,
    },
}

/// A message payload with its wire type tag.
pub trait Payload: Serialize + DeserializeOwned {
    /// The type tag for this payload.
    const TYPE: &'static str;
}

/// Builds a message from a JSON value.
type Decoder = fn(Value) -> serde_json::Result<Message>;

/// Defines the [Message] enum, the [Payload] tags, and the decoders registry.
macro_rules! messages {
    ($($(#[$meta:meta])* $variant:ident => $kind:ident $class:literal,)*) => {
        /// Message exchanged by a client and a server.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Message {
            $($(#[$meta])* $variant($variant),)*
            /// A message with an unknown type, holds the frame text.
            Unrecognized(String),
        }

        impl Message {
            /// The type tag of this message, `None` for unrecognized messages.
            pub fn type_tag(&self) -> Option<&'static str> {
                match self {
                    $(Message::$variant(_) => Some(<$variant as Payload>::TYPE),)*
                    Message::Unrecognized(_) => None,
                }
            }

            fn payload_value(&self) -> serde_json::Result<Option<Value>> {
                match self {
                    $(Message::$variant(p) => serde_json::to_value(p).map(Some),)*
                    Message::Unrecognized(_) => Ok(None),
                }
            }
        }

        $(
            impl Payload for $variant {
                const TYPE: &'static str = concat!(
                    "se.cygni.texasholdem.communication.message.",
                    stringify!($kind),
                    ".",
                    $class
                );
            }

            impl From<$variant> for Message {
                fn from(payload: $variant) -> Self {
                    Message::$variant(payload)
                }
            }
        )*

        static REGISTRY: LazyLock<AHashMap<&'static str, Decoder>> = LazyLock::new(|| {
            let mut registry = AHashMap::<&'static str, Decoder>::default();
            $(
                registry.insert(<$variant as Payload>::TYPE, |value| {
                    serde_json::from_value::<$variant>(value).map(Message::$variant)
                });
            )*
            registry
        });
    };
}

messages! {
    /// Register this client to play in a room.
    RegisterForPlay => request "RegisterForPlayRequest",
    /// Registration confirmation.
    RegisterForPlayResponse => response "RegisterForPlayResponse",
    /// The server requests an action from this client.
    ActionRequest => request "ActionRequest",
    /// The client action.
    ActionResponse => response "ActionResponse",
    /// A new hand has started.
    PlayIsStarted => event "PlayIsStartedEvent",
    /// The table moved to a new betting round.
    TableChangedState => event "TableChangedStateEvent",
    /// A community card has been dealt.
    CommunityCardDealt => event "CommunityHasBeenDealtACardEvent",
    /// This client has been dealt a hole card.
    YouHaveBeenDealtCard => event "YouHaveBeenDealtACardEvent",
    /// A player paid the small blind.
    PlayerBetSmallBlind => event "PlayerBetSmallBlindEvent",
    /// A player paid the big blind.
    PlayerBetBigBlind => event "PlayerBetBigBlindEvent",
    /// A player called.
    PlayerCalled => event "PlayerCalledEvent",
    /// A player checked.
    PlayerChecked => event "PlayerCheckedEvent",
    /// A player folded.
    PlayerFolded => event "PlayerFoldedEvent",
    /// A player raised.
    PlayerRaised => event "PlayerRaisedEvent",
    /// A player went all in.
    PlayerWentAllIn => event "PlayerWentAllInEvent",
    /// A player left the table.
    PlayerQuit => event "PlayerQuitEvent",
    /// A player was folded by the server.
    PlayerForcedFolded => event "PlayerForcedFoldedEvent",
    /// Hands shown at the end of a hand.
    ShowDown => event "ShowDownEvent",
    /// This client won chips.
    YouWonAmount => event "YouWonAmountEvent",
    /// The table has finished playing.
    TableIsDone => event "TableIsDoneEvent",
    /// The server is shutting down.
    ServerIsShuttingDown => event "ServerIsShuttingDownEvent",
}

impl Message {
    /// Decodes a message from a frame.
    pub fn decode(frame: &[u8]) -> Result<Message, FrameError> {
        let value = serde_json::from_slice::<Value>(frame)?;

        let tag = value
            .get(TYPE_FIELD)
            .and_then(Value::as_str)
            .ok_or(FrameError::MissingType)?
            .to_string();

        match REGISTRY.get(tag.as_str()) {
            Some(decoder) => {
                decoder(value).map_err(|source| FrameError::InvalidPayload { tag, source })
            }
            None => Ok(Message::Unrecognized(
                String::from_utf8_lossy(frame).into_owned(),
            )),
        }
    }

    /// Encodes this message as JSON text, unrecognized messages are returned as
    /// they were received.
    pub fn encode(&self) -> Result<String, FrameError> {
        let (Some(tag), Some(mut value)) = (self.type_tag(), self.payload_value()?) else {
            return match self {
                Message::Unrecognized(raw) => Ok(raw.clone()),
                _ => Err(FrameError::MissingType),
            };
        };

        match value.as_object_mut() {
            Some(fields) => {
                fields.insert(TYPE_FIELD.to_string(), Value::from(tag));
            }
            None => return Err(FrameError::MissingType),
        }

        Ok(serde_json::to_string(&value)?)
    }

    /// Encodes this message followed by the frame delimiter.
    pub fn encode_frame(&self) -> Result<String, FrameError> {
        let mut frame = self.encode()?;
        frame.push_str(DELIMITER);
        Ok(frame)
    }
}

/// The kind of a player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// Call the current bet.
    Call,
    /// Check.
    Check,
    /// Raise the current bet.
    Raise,
    /// Bet all the player chips.
    AllIn,
    /// Fold the hand.
    Fold,
}

impl ActionType {
    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::Call => "CALL",
            ActionType::Check => "CHECK",
            ActionType::Raise => "RAISE",
            ActionType::AllIn => "ALL-IN",
            ActionType::Fold => "FOLD",
        }
    }
}

/// A player action with its cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// The action type.
    pub action_type: ActionType,
    /// The chips this action costs.
    #[serde(default)]
    pub amount: Chips,
}

impl Action {
    /// Creates a new action.
    pub fn new(action_type: ActionType, amount: Chips) -> Self {
        Self {
            action_type,
            amount,
        }
    }

    /// A fold action.
    pub fn fold() -> Self {
        Self::new(ActionType::Fold, Chips::ZERO)
    }
}

/// Registration request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForPlay {
    /// The player name.
    pub name: String,
    /// The room to play in.
    pub room: String,
}

/// Registration response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForPlayResponse {
    /// The session assigned by the server.
    #[serde(default)]
    pub session_id: String,
}

/// An action request with the legal actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    /// The request identifier the response must echo.
    pub request_id: String,
    /// The legal actions.
    #[serde(default)]
    pub possible_actions: Vec<Action>,
}

impl ActionRequest {
    /// Returns the legal action of the given type if any.
    pub fn action(&self, action_type: ActionType) -> Option<Action> {
        self.possible_actions
            .iter()
            .find(|a| a.action_type == action_type)
            .copied()
    }

    /// The check action if legal.
    pub fn check(&self) -> Option<Action> {
        self.action(ActionType::Check)
    }

    /// The call action if legal.
    pub fn call(&self) -> Option<Action> {
        self.action(ActionType::Call)
    }

    /// The raise action if legal.
    pub fn raise(&self) -> Option<Action> {
        self.action(ActionType::Raise)
    }

    /// The all in action if legal.
    pub fn all_in(&self) -> Option<Action> {
        self.action(ActionType::AllIn)
    }

    /// The fold action, a fold is always possible.
    pub fn fold(&self) -> Action {
        self.action(ActionType::Fold).unwrap_or_else(Action::fold)
    }

    /// Check if a check action is in the request.
    pub fn can_check(&self) -> bool {
        self.check().is_some()
    }
}

/// The action response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    /// The identifier of the request this action responds to.
    pub request_id: String,
    /// The chosen action.
    pub action: Action,
}

/// A new hand started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayIsStarted {
    /// The table id.
    pub table_id: TableId,
    /// The players in this hand.
    pub players: Vec<GamePlayer>,
    /// The small blind for this hand.
    pub small_blind_amount: Chips,
    /// The big blind for this hand.
    pub big_blind_amount: Chips,
    /// The dealer for this hand.
    #[serde(default)]
    pub dealer: Option<GamePlayer>,
}

/// The table moved to a new street.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableChangedState {
    /// The new street.
    pub state: Street,
}

/// A community card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityCardDealt {
    /// The dealt card.
    pub card: Card,
}

/// A hole card for this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouHaveBeenDealtCard {
    /// The dealt card.
    pub card: Card,
}

/// A small blind bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBetSmallBlind {
    /// The player.
    pub player: GamePlayer,
    /// The small blind.
    pub small_blind: Chips,
}

/// A big blind bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBetBigBlind {
    /// The player.
    pub player: GamePlayer,
    /// The big blind.
    pub big_blind: Chips,
}

/// A player call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCalled {
    /// The player.
    pub player: GamePlayer,
    /// The chips paid to call.
    pub call_bet: Chips,
}

/// A player check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerChecked {
    /// The player.
    pub player: GamePlayer,
}

/// A player fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFolded {
    /// The player.
    pub player: GamePlayer,
    /// The chips the player left in the pot.
    #[serde(default)]
    pub investment_in_pot: Chips,
}

/// A player raise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRaised {
    /// The player.
    pub player: GamePlayer,
    /// The chips paid to raise.
    pub raise_bet: Chips,
}

/// A player went all in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerWentAllIn {
    /// The player.
    pub player: GamePlayer,
    /// The chips paid.
    pub all_in_amount: Chips,
}

/// A player left the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerQuit {
    /// The player.
    pub player: GamePlayer,
}

/// A player was folded by the server, usually after a timeout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerForcedFolded {
    /// The player.
    pub player: GamePlayer,
    /// The chips the player left in the pot.
    #[serde(default)]
    pub investment_in_pot: Chips,
}

/// The showdown results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowDown {
    /// The players that showed their hands.
    #[serde(default)]
    pub players_show_down: Vec<PlayerShowDown>,
}

/// A player hand at showdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerShowDown {
    /// The player.
    pub player: GamePlayer,
    /// The player hand.
    pub hand: ShownHand,
    /// The chips won by the player.
    #[serde(default)]
    pub won_amount: Chips,
}

/// A hand shown at showdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShownHand {
    /// The hand best cards.
    #[serde(default)]
    pub cards: Vec<Card>,
    /// The hand name as reported by the server.
    #[serde(default)]
    pub poker_hand: String,
}

/// Chips won by this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouWonAmount {
    /// The chips won.
    pub won_amount: Chips,
    /// This client chips after the win.
    pub your_chip_amount: Chips,
}

/// The table has finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableIsDone {
    /// The table id.
    #[serde(default = "no_table")]
    pub table_id: TableId,
    /// The final players state.
    #[serde(default)]
    pub players: Vec<GamePlayer>,
}

fn no_table() -> TableId {
    TableId::NO_TABLE
}

/// The server is shutting down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerIsShuttingDown {
    /// The shutdown reason.
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poker::{Rank, Suit};

    #[test]
    fn encode_register() {
        let msg = Message::from(RegisterForPlay {
            name: "Phoenix".to_string(),
            room: "TRAINING".to_string(),
        });

        let json = msg.encode().unwrap();
        let value = serde_json::from_str::<Value>(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "se.cygni.texasholdem.communication.message.request.RegisterForPlayRequest",
                "name": "Phoenix",
                "room": "TRAINING",
            })
        );
    }

    #[test]
    fn encode_action_response() {
        let msg = Message::from(ActionResponse {
            request_id: "42".to_string(),
            action: Action::new(ActionType::AllIn, Chips::new(900)),
        });

        let value = serde_json::from_str::<Value>(&msg.encode().unwrap()).unwrap();
        assert_eq!(value["requestId"], "42");
        assert_eq!(value["action"]["actionType"], "ALL_IN");
        assert_eq!(value["action"]["amount"], 900);
        assert_eq!(
            value["type"],
            "se.cygni.texasholdem.communication.message.response.ActionResponse"
        );
    }

    #[test]
    fn decode_action_request() {
        let frame = br#"{
            "type": "se.cygni.texasholdem.communication.message.request.ActionRequest",
            "requestId": "abc",
            "possibleActions": [
                {"actionType": "CALL", "amount": 100},
                {"actionType": "RAISE", "amount": 200},
                {"actionType": "FOLD", "amount": 0},
                {"actionType": "ALL_IN", "amount": 5000}
            ]
        }"#;

        let Message::ActionRequest(req) = Message::decode(frame).unwrap() else {
            panic!("expected an action request");
        };

        assert_eq!(req.request_id, "abc");
        assert_eq!(req.call(), Some(Action::new(ActionType::Call, Chips::new(100))));
        assert_eq!(req.raise().map(|a| a.amount), Some(Chips::new(200)));
        assert_eq!(req.all_in().map(|a| a.amount), Some(Chips::new(5000)));
        assert!(req.check().is_none());
        assert!(!req.can_check());
    }

    #[test]
    fn decode_events() {
        let frame = br#"{
            "type": "se.cygni.texasholdem.communication.message.event.PlayIsStartedEvent",
            "tableId": 12,
            "players": [{"name": "A", "chipCount": 1000}, {"name": "B", "chipCount": 500}],
            "smallBlindAmount": 5,
            "bigBlindAmount": 10,
            "dealer": {"name": "B", "chipCount": 500}
        }"#;

        let Message::PlayIsStarted(e) = Message::decode(frame).unwrap() else {
            panic!("expected play started");
        };
        assert_eq!(e.table_id, TableId::new(12));
        assert_eq!(e.players.len(), 2);
        assert_eq!(e.players[1].chip_count, Chips::new(500));
        assert_eq!(e.big_blind_amount, Chips::new(10));

        let frame = br#"{
            "type": "se.cygni.texasholdem.communication.message.event.CommunityHasBeenDealtACardEvent",
            "card": {"rank": "QUEEN", "suit": "HEARTS"}
        }"#;
        assert_eq!(
            Message::decode(frame).unwrap(),
            Message::CommunityCardDealt(CommunityCardDealt {
                card: Card::new(Rank::Queen, Suit::Hearts)
            })
        );

        let frame = br#"{
            "type": "se.cygni.texasholdem.communication.message.event.TableChangedStateEvent",
            "state": "TURN"
        }"#;
        assert_eq!(
            Message::decode(frame).unwrap(),
            Message::TableChangedState(TableChangedState { state: Street::Turn })
        );
    }

    #[test]
    fn decode_unknown_type() {
        let frame = r#"{"type":"se.cygni.texasholdem.communication.message.event.NewEvent","x":1}"#;
        let msg = Message::decode(frame.as_bytes()).unwrap();
        assert_eq!(msg, Message::Unrecognized(frame.to_string()));
        assert_eq!(msg.type_tag(), None);
        assert_eq!(msg.encode().unwrap(), frame);
    }

    #[test]
    fn decode_errors() {
        assert!(matches!(
            Message::decode(b"not json"),
            Err(FrameError::Malformed(_))
        ));

        assert!(matches!(
            Message::decode(br#"{"requestId": "1"}"#),
            Err(FrameError::MissingType)
        ));

        let frame = br#"{
            "type": "se.cygni.texasholdem.communication.message.event.YouHaveBeenDealtACardEvent",
            "card": {"rank": "ELEVEN", "suit": "HEARTS"}
        }"#;
        assert!(matches!(
            Message::decode(frame),
            Err(FrameError::InvalidPayload { tag, .. }) if tag.ends_with("YouHaveBeenDealtACardEvent")
        ));
    }

    #[test]
    fn encode_decode_event() {
        let msg = Message::from(PlayerRaised {
            player: GamePlayer::new("Bob", Chips::new(900)),
            raise_bet: Chips::new(100),
        });

        let json = msg.encode().unwrap();
        assert_eq!(Message::decode(json.as_bytes()).unwrap(), msg);
    }
}
