//! Transport abstraction
//!
//! The HTTP and WebSocket layers are written against a small transport
//! trait so the same code drives any byte-stream transport. The trait
//! defaults to plain TCP; readiness is checked with `poll(2)` so an
//! optional deadline can be applied to every read and write.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::os::fd::AsRawFd;
use std::time::Duration;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, Error>;

/// Transport errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Timeout")]
    Timeout,

    #[error("Connection closed")]
    ConnectionClosed,
}

/// Readiness events for [`Transport::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEvents {
    Read,
    Write,
}

/// Operations a byte-stream transport must provide.
pub trait Transport {
    /// Wait until the transport is ready for `events`, or until `timeout`
    /// elapses. `None` waits indefinitely. Returns whether it became ready.
    fn poll(&self, events: PollEvents, timeout: Option<Duration>) -> Result<bool>;

    /// Read into `buf`, returning the number of bytes read. Zero means the
    /// peer closed the connection.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Write from `buf`, returning the number of bytes written.
    fn write(&mut self, buf: &[u8]) -> Result<usize>;

    /// Shut the transport down.
    fn close(&mut self) -> Result<()>;
}

/// Plain TCP transport.
pub struct TcpTransport {
    stream: TcpStream,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        TcpTransport { stream }
    }

    /// The underlying stream.
    pub fn stream(&self) -> &TcpStream {
        &self.stream
    }
}

impl Transport for TcpTransport {
    fn poll(&self, events: PollEvents, timeout: Option<Duration>) -> Result<bool> {
        use libc::{poll, pollfd, POLLIN, POLLOUT};

        let mut pfd = pollfd {
            fd: self.stream.as_raw_fd(),
            events: match events {
                PollEvents::Read => POLLIN,
                PollEvents::Write => POLLOUT,
            },
            revents: 0,
        };

        // -1 waits indefinitely
        let timeout_ms = timeout.map(|d| d.as_millis() as i32).unwrap_or(-1);

        let ready = unsafe { poll(&mut pfd as *mut pollfd, 1, timeout_ms) };
        if ready < 0 {
            return Err(Error::Io(io::Error::last_os_error()));
        }
        Ok(ready > 0)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.stream.read(buf).map_err(Error::from)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.stream.write(buf).map_err(Error::from)
    }

    fn close(&mut self) -> Result<()> {
        self.stream.shutdown(Shutdown::Both).map_err(Error::from)
    }
}

/// A transport paired with an optional per-operation deadline.
///
/// All reads and writes go through the deadline check; `write_all` retries
/// short writes until the buffer is flushed or the peer goes away.
pub struct Session<T: Transport> {
    transport: T,
    timeout: Option<Duration>,
}

impl<T: Transport> Session<T> {
    /// Create a session with no deadline: reads and writes block until the
    /// transport is ready.
    pub fn new(transport: T) -> Self {
        Session {
            transport,
            timeout: None,
        }
    }

    /// Set the deadline applied to each read and write.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Read once, returning the number of bytes read (zero on peer close).
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.transport.poll(PollEvents::Read, self.timeout)? {
            return Err(Error::Timeout);
        }
        self.transport.read(buf)
    }

    /// Write the whole buffer.
    pub fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        let mut written = 0;
        while written < buf.len() {
            if !self.transport.poll(PollEvents::Write, self.timeout)? {
                return Err(Error::Timeout);
            }
            let n = self.transport.write(&buf[written..])?;
            if n == 0 {
                return Err(Error::ConnectionClosed);
            }
            written += n;
        }
        Ok(())
    }

    /// Shut the transport down.
    pub fn close(&mut self) -> Result<()> {
        self.transport.close()
    }

    pub fn get_ref(&self) -> &T {
        &self.transport
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
