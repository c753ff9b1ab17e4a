// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Framed message connection.
use anyhow::{Result, anyhow};
use log::warn;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    net::TcpStream,
};

use crate::{frame::Framer, message::Message};

/// Read buffer reserve size.
const READ_RESERVE: usize = 4096;

/// A connection that exchanges [Message]s over a byte stream.
///
/// Receive errors caused by a bad frame are returned as a
/// [FrameError](crate::message::FrameError) that callers can find with
/// [anyhow::Error::downcast_ref], the connection can be used after a bad frame.
pub struct Connection<S> {
    stream: S,
    framer: Framer,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new connection.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            framer: Framer::new(),
        }
    }

    /// Sends a [Message].
    pub async fn send(&mut self, msg: &Message) -> Result<()> {
        let frame = msg.encode_frame()?;
        self.stream.write_all(frame.as_bytes()).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Waits for a [Message], returns `None` when the stream is closed.
    pub async fn recv(&mut self) -> Option<Result<Message>> {
        loop {
            if let Some(frame) = self.framer.next_frame() {
                return Some(Message::decode(&frame).map_err(anyhow::Error::from));
            }

            let buf = self.framer.buffer_mut();
            buf.reserve(READ_RESERVE);

            match self.stream.read_buf(buf).await {
                Ok(0) => {
                    if self.framer.pending() > 0 {
                        warn!(
                            "Connection closed with {} bytes of incomplete frame",
                            self.framer.pending()
                        );
                    }

                    return None;
                }
                Ok(_) => continue,
                Err(e) => return Some(Err(anyhow!("Connection error: {e}"))),
            }
        }
    }

    /// Closes this connection.
    pub async fn close(&mut self) {
        let _ = self.stream.shutdown().await;
    }
}

/// Connects to a server.
pub async fn connect(host: &str, port: u16) -> Result<Connection<TcpStream>> {
    let stream = TcpStream::connect((host, port)).await?;
    stream.set_nodelay(true)?;
    Ok(Connection::new(stream))
}
