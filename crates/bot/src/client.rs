// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Automated poker client.
use anyhow::Result;
use log::{info, warn};
use tokio::io::{AsyncRead, AsyncWrite};

use phoenix_core::{
    connection::Connection,
    game_state::{GameState, ServerShutdown},
    message::{ActionResponse, FrameError, Message, RegisterForPlay},
};

use crate::{
    Strategy,
    observer::{Observer, Snapshot},
};

/// The reason a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    /// The server closed the connection.
    ConnectionClosed,
    /// The server is shutting down.
    ServerShutdown(String),
    /// The session was interrupted by the user.
    Interrupted,
}

/// Poker client.
pub struct Client<S> {
    conn: Connection<S>,
    state: GameState,
    room: String,
    strategy: Box<dyn Strategy>,
    observer: Box<dyn Observer>,
}

impl<S> Client<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new client that plays as `name` in the given room.
    pub fn new(
        conn: Connection<S>,
        name: &str,
        room: &str,
        strategy: Box<dyn Strategy>,
        observer: Box<dyn Observer>,
    ) -> Self {
        Self {
            conn,
            state: GameState::new(name),
            room: room.to_string(),
            strategy,
            observer,
        }
    }

    /// Registers for play and runs the client message loop.
    pub async fn run(&mut self) -> Result<Exit> {
        info!("Entering {}, waiting for play to start...", self.room);
        let register = RegisterForPlay {
            name: self.state.nickname().to_string(),
            room: self.room.clone(),
        };
        self.conn.send(&Message::from(register)).await?;

        loop {
            let msg = match self.conn.recv().await {
                Some(Ok(msg)) => msg,
                Some(Err(err)) if err.downcast_ref::<FrameError>().is_some() => {
                    warn!("Discarding frame: {err}");
                    continue;
                }
                Some(Err(err)) => return Err(err),
                None => return Ok(Exit::ConnectionClosed),
            };

            match msg {
                Message::ActionRequest(req) => {
                    let action = self.strategy.act(&req, &self.state);
                    let response = ActionResponse {
                        request_id: req.request_id,
                        action,
                    };
                    self.conn.send(&Message::from(response)).await?;

                    let snapshot = Snapshot::new(&self.state, self.strategy.as_ref());
                    self.observer.on_decision(&action, &snapshot);
                }
                Message::RegisterForPlayResponse(res) => {
                    info!("Registered for play, session {}", res.session_id);
                }
                msg => {
                    if let Err(ServerShutdown { message }) = self.state.apply(&msg) {
                        return Ok(Exit::ServerShutdown(message));
                    }

                    self.strategy.update(&msg, &self.state);

                    let snapshot = Snapshot::new(&self.state, self.strategy.as_ref());
                    self.observer.on_event(&msg, &snapshot);
                }
            }
        }
    }

    /// Closes the client connection.
    pub async fn close(&mut self) {
        self.conn.close().await;
    }
}
