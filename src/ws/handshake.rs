//! WebSocket opening handshake
//!
//! Server side: validate the upgrade preconditions on a parsed request
//! and answer with the byte-exact `101 Switching Protocols` response.
//! Client side: generate the 16-byte nonce and build the upgrade request.

use crate::http::{self, host_from_url, path_from_url, Headers, Method, Request};
use crate::net::{Session, Transport};
use bytes::Bytes;
use data_encoding::BASE64;
use sha1::{Digest, Sha1};

/// RFC 6455 magic GUID appended to the client key before hashing.
pub const WS_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// Derive the `Sec-WebSocket-Accept` value from a `Sec-WebSocket-Key`.
pub fn accept_key(key: &str) -> String {
    let mut sha1 = Sha1::new();
    sha1.update(key.as_bytes());
    sha1.update(WS_GUID.as_bytes());
    BASE64.encode(&sha1.finalize())
}

/// Check the upgrade preconditions on a request: `Sec-WebSocket-Key`,
/// `Connection: Upgrade`, `Upgrade: websocket`, `Sec-WebSocket-Version:
/// 13`, and a `Host` header. Returns the client key when they all hold.
pub fn check_upgrade<'r>(request: &'r Request<'_>) -> Option<&'r str> {
    let key = request.headers.get("Sec-WebSocket-Key")?;
    if request.headers.get("Connection") != Some("Upgrade") {
        return None;
    }
    if request.headers.get("Upgrade") != Some("websocket") {
        return None;
    }
    if request.headers.get("Sec-WebSocket-Version") != Some("13") {
        return None;
    }
    if !request.headers.contains("Host") {
        return None;
    }
    Some(key)
}

/// The `101 Switching Protocols` response for a computed accept value.
pub fn handshake_response(accept: &str) -> Bytes {
    Bytes::from(format!(
        "HTTP/1.1 101 Switching Protocols\r\n\
         Upgrade: websocket\r\n\
         Connection: Upgrade\r\n\
         Sec-WebSocket-Accept: {}\r\n\
         \r\n",
        accept
    ))
}

/// Answer an upgrade request: the byte-exact 101 with the computed
/// accept value when the preconditions hold (returning `true`), or an
/// empty `400 Bad Request` when they do not.
///
/// On `true` the connection now speaks fragments; wrap it with
/// [`WsSession::server`](crate::ws::WsSession::server).
pub fn upgrade<T: Transport>(
    session: &mut Session<T>,
    request: &Request<'_>,
) -> http::Result<bool> {
    match check_upgrade(request) {
        Some(key) => {
            let response = handshake_response(&accept_key(key));
            session.write_all(&response)?;
            Ok(true)
        }
        None => {
            http::server::respond_empty(session, 400)?;
            Ok(false)
        }
    }
}

/// A fresh `Sec-WebSocket-Key`: 16 random bytes, base64-encoded.
pub fn client_key() -> String {
    let nonce: [u8; 16] = rand::random();
    BASE64.encode(&nonce)
}

/// Build the client upgrade request for `url`.
///
/// The required upgrade headers are added first; caller-supplied headers
/// follow and may override them. A caller-supplied `Host` wins over the
/// one derived from the URL.
pub fn upgrade_request<'a>(
    url: &'a str,
    key: &str,
    extra_headers: &Headers<'_>,
) -> Request<'a> {
    let mut headers = Headers::new();
    if !extra_headers.contains("Host") {
        headers.insert("Host", host_from_url(url));
    }
    headers.insert("Upgrade", "websocket");
    headers.insert("Connection", "Upgrade");
    headers.insert("Sec-WebSocket-Version", "13");
    headers.insert("Sec-WebSocket-Key", key.to_string());
    for (name, value) in extra_headers.iter() {
        headers.insert(name.to_string(), value.to_string());
    }

    Request {
        method: Method::Get,
        path: path_from_url(url),
        protocol: "HTTP/1.1",
        headers,
    }
}
