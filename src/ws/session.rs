//! WebSocket session loop
//!
//! After a successful upgrade the connection speaks fragments. A
//! [`WsSession`] wraps the transport session with a role flag (clients
//! mask outgoing fragments, servers do not) and drives the receive loop:
//! Close ends the session, Ping is answered with a Pong before anything
//! else happens, and data fragments are handed to the caller.

use super::codec::serialize_fragment;
use super::frame::{Fragment, FragmentData};
use super::{parse_fragment, Result};
use crate::net::{Session, Transport};

/// Receive and scratch buffer size for fragment I/O.
const WS_BUFFER_SIZE: usize = 128 * 1024;

/// An owned outbound message a receive-loop handler may queue in response
/// to a data fragment.
#[derive(Debug)]
pub enum Message {
    Text(Vec<u8>),
    Binary(Vec<u8>),
    Close,
}

/// A WebSocket session over an upgraded connection.
pub struct WsSession<'s, T: Transport> {
    session: &'s mut Session<T>,
    mask_outgoing: bool,
    recv_buf: Vec<u8>,
    send_buf: Vec<u8>,
}

impl<'s, T: Transport> WsSession<'s, T> {
    /// A server-side session: outgoing fragments are not masked.
    pub fn server(session: &'s mut Session<T>) -> Self {
        Self::with_role(session, false)
    }

    /// A client-side session: outgoing fragments are masked with a fresh
    /// random key each.
    pub fn client(session: &'s mut Session<T>) -> Self {
        Self::with_role(session, true)
    }

    fn with_role(session: &'s mut Session<T>, mask_outgoing: bool) -> Self {
        WsSession {
            session,
            mask_outgoing,
            recv_buf: vec![0; WS_BUFFER_SIZE],
            send_buf: vec![0; WS_BUFFER_SIZE],
        }
    }

    /// Serialize one fragment into the scratch buffer and send it whole.
    pub fn send(&mut self, fragment: &mut Fragment<'_>) -> Result<()> {
        let wire = serialize_fragment(&mut self.send_buf, fragment)?;
        self.session.write_all(wire)?;
        Ok(())
    }

    /// Send a final text fragment.
    pub fn send_text(&mut self, text: &str) -> Result<()> {
        let mut payload = text.as_bytes().to_vec();
        self.send_data(|p| FragmentData::Text(p), &mut payload)
    }

    /// Send a final binary fragment.
    pub fn send_binary(&mut self, data: &[u8]) -> Result<()> {
        let mut payload = data.to_vec();
        self.send_data(|p| FragmentData::Binary(p), &mut payload)
    }

    /// Send an empty close fragment.
    pub fn send_close(&mut self) -> Result<()> {
        self.send_data(|p| FragmentData::Close(p), &mut [])
    }

    /// Send an empty ping fragment.
    pub fn send_ping(&mut self) -> Result<()> {
        self.send_data(|p| FragmentData::Ping(p), &mut [])
    }

    fn send_data(
        &mut self,
        make: for<'p> fn(&'p mut [u8]) -> FragmentData<'p>,
        payload: &mut [u8],
    ) -> Result<()> {
        let mut fragment = Fragment {
            data: make(payload),
            fin: true,
            mask: self.mask_outgoing,
            mask_key: if self.mask_outgoing {
                rand::random()
            } else {
                [0; 4]
            },
        };
        let wire = serialize_fragment(&mut self.send_buf, &mut fragment)?;
        self.session.write_all(wire)?;
        Ok(())
    }

    /// Read one fragment, unmasking it in place in the receive buffer.
    /// Returns `None` when the peer has closed the connection.
    ///
    /// The fragment borrows the receive buffer and must be dropped before
    /// the next send or receive.
    pub fn recv(&mut self) -> Result<Option<Fragment<'_>>> {
        let n = self.session.read(&mut self.recv_buf)?;
        if n == 0 {
            return Ok(None);
        }
        let (fragment, _) = parse_fragment(&mut self.recv_buf[..n])?;
        Ok(Some(fragment))
    }

    /// Run the receive loop until the peer closes.
    ///
    /// One fragment is parsed per read. Close fragments and 0-byte reads
    /// end the loop; Ping is answered with a Pong carrying the same
    /// payload (masked when this is the client side) before the next
    /// read; Pong is ignored. Every other fragment goes to `handler`,
    /// which may queue one outbound message. `Message::Close` is sent and
    /// then ends the loop.
    pub fn run<F>(&mut self, mut handler: F) -> Result<()>
    where
        F: FnMut(&Fragment<'_>) -> Result<Option<Message>>,
    {
        loop {
            let n = self.session.read(&mut self.recv_buf)?;
            if n == 0 {
                log::debug!("websocket peer closed the connection");
                return Ok(());
            }

            let reply = {
                let (fragment, _) = parse_fragment(&mut self.recv_buf[..n])?;
                let fin = fragment.fin;
                let mask = fragment.mask;
                let mask_key = fragment.mask_key;
                match fragment.data {
                    FragmentData::Close(_) => {
                        log::debug!("websocket close fragment received");
                        return Ok(());
                    }
                    FragmentData::Ping(payload) => Some(Reply::Pong(payload.to_vec())),
                    FragmentData::Pong(_) => None,
                    data => {
                        let fragment = Fragment {
                            data,
                            fin,
                            mask,
                            mask_key,
                        };
                        handler(&fragment)?.map(Reply::from)
                    }
                }
            };

            match reply {
                None => {}
                Some(Reply::Pong(mut payload)) => {
                    self.send_data(|p| FragmentData::Pong(p), &mut payload)?;
                }
                Some(Reply::Text(mut payload)) => {
                    self.send_data(|p| FragmentData::Text(p), &mut payload)?;
                }
                Some(Reply::Binary(mut payload)) => {
                    self.send_data(|p| FragmentData::Binary(p), &mut payload)?;
                }
                Some(Reply::Close) => {
                    self.send_close()?;
                    return Ok(());
                }
            }
        }
    }
}

/// Outbound work queued while the receive buffer was still borrowed.
enum Reply {
    Pong(Vec<u8>),
    Text(Vec<u8>),
    Binary(Vec<u8>),
    Close,
}

impl From<Message> for Reply {
    fn from(message: Message) -> Self {
        match message {
            Message::Text(payload) => Reply::Text(payload),
            Message::Binary(payload) => Reply::Binary(payload),
            Message::Close => Reply::Close,
        }
    }
}
