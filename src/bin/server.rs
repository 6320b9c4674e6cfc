//! Sample server
//!
//! Serves a hello page on `/`, echoes WebSocket text and binary messages
//! on `/ws`, and answers everything else with 404.
//!
//! Usage: `server <port>`

use minnow::http::server::{respond, Flow, Server};
use minnow::http::Error;
use minnow::ws::{self, FragmentData, Message, WsSession};
use std::net::TcpListener;
use std::process;

fn main() {
    env_logger::init();

    let port = match std::env::args().nth(1).map(|arg| arg.parse::<u16>()) {
        Some(Ok(port)) => port,
        Some(Err(_)) => {
            eprintln!("invalid port");
            process::exit(1);
        }
        None => {
            eprintln!("usage: server <port>");
            process::exit(1);
        }
    };

    let listener = match TcpListener::bind(("0.0.0.0", port)) {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("bind to port {} failed: {}", port, err);
            process::exit(1);
        }
    };

    let mut server = Server::new();

    server.register(
        Box::new(|request| request.path == "/"),
        Box::new(|session, _| {
            respond(
                session,
                200,
                "text/html",
                b"<html><body>minnow is up</body></html>",
            )?;
            Ok(Flow::Continue)
        }),
    );

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

    if let Err(err) = server.serve(listener) {
        eprintln!("server failed: {}", err);
        process::exit(1);
    }
}
