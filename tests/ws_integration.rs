//! Integration tests for the WebSocket layer
//!
//! A real dispatcher serving an echo endpoint, driven by the client-side
//! upgrade path over loopback TCP.

use minnow::http::server::{Flow, Server};
use minnow::http::{Error, Headers, HttpClient};
use minnow::ws::{self, FragmentData, Message, WsSession};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

/// A dispatcher with a WebSocket echo endpoint on `/ws`.
fn spawn_echo_server() -> std::net::SocketAddr {
    let mut server = Server::new().pool_size(2);
    server.register(
        Box::new(|request| request.path == "/ws"),
        Box::new(|session, request| {
            if !ws::upgrade(session, request)? {
                return Ok(Flow::Continue);
            }
            WsSession::server(session)
                .run(|fragment| match &fragment.data {
                    FragmentData::Text(_) => {
                        Ok(Some(Message::Text(fragment.data.payload().to_vec())))
                    }
                    FragmentData::Binary(_) => {
                        Ok(Some(Message::Binary(fragment.data.payload().to_vec())))
                    }
                    _ => Ok(None),
                })
                .map_err(|err| Error::Protocol(err.to_string()))?;
            Ok(Flow::Close)
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let _ = server.serve(listener);
    });
    addr
}

fn connect_upgraded(addr: std::net::SocketAddr) -> HttpClient<minnow::net::TcpTransport> {
    let mut client = HttpClient::connect(addr).unwrap();
    client.set_timeout(Duration::from_secs(5));
    let url = format!("ws://{}/ws", addr);
    client.upgrade(&url, &Headers::new()).unwrap();
    client
}

#[test]
fn test_upgrade_and_text_echo() {
    let addr = spawn_echo_server();
    let mut client = connect_upgraded(addr);

    let mut ws = WsSession::client(client.session_mut());
    ws.send_text("hello over websocket").unwrap();

    let fragment = ws.recv().unwrap().expect("echo expected");
    assert!(matches!(fragment.data, FragmentData::Text(_)));
    assert_eq!(fragment.data.payload(), b"hello over websocket");
    assert!(fragment.fin);
    // Server-to-client fragments are unmasked
    assert!(!fragment.mask);
}

#[test]
fn test_binary_echo() {
    let addr = spawn_echo_server();
    let mut client = connect_upgraded(addr);

    let mut ws = WsSession::client(client.session_mut());
    let payload: Vec<u8> = (0..=255).collect();
    ws.send_binary(&payload).unwrap();

    let fragment = ws.recv().unwrap().expect("echo expected");
    assert!(matches!(fragment.data, FragmentData::Binary(_)));
    assert_eq!(fragment.data.payload(), &payload[..]);
}

#[test]
fn test_ping_is_answered_with_pong() {
    let addr = spawn_echo_server();
    let mut client = connect_upgraded(addr);

    let mut ws = WsSession::client(client.session_mut());
    ws.send_ping().unwrap();

    let fragment = ws.recv().unwrap().expect("pong expected");
    assert!(matches!(fragment.data, FragmentData::Pong(_)));
}

#[test]
fn test_close_ends_the_session() {
    let addr = spawn_echo_server();
    let mut client = connect_upgraded(addr);

    let mut ws = WsSession::client(client.session_mut());
    ws.send_close().unwrap();

    // The server exits its loop and closes the connection
    assert!(matches!(ws.recv(), Ok(None) | Err(_)));
}

#[test]
fn test_upgrade_preconditions_enforced() {
    let addr = spawn_echo_server();

    // A plain GET to the endpoint is refused with an empty 400
    let mut client = HttpClient::connect(addr).unwrap();
    client.set_timeout(Duration::from_secs(5));
    let response = client.get("localhost", "/ws").unwrap();
    assert_eq!(response.status, 400);
    assert_eq!(response.body, b"");
}

#[test]
fn test_caller_supplied_host_is_preserved() {
    let addr = spawn_echo_server();

    let mut client = HttpClient::connect(addr).unwrap();
    client.set_timeout(Duration::from_secs(5));

    let mut extra = Headers::new();
    extra.insert("Host", "custom.example");
    let url = format!("ws://{}/ws", addr);
    client.upgrade(&url, &extra).unwrap();
}
