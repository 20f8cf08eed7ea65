//! Core connection handling.
//!
//! This module owns only networking concerns:
//! - accepting TCP connections,
//! - the single read that captures a request,
//! - writing the response bytes back.
//!
//! HTTP semantics live elsewhere: parsing is delegated to
//! [`http::parser`](crate::http::parser) and route dispatch to
//! [`handler::router`](crate::handler::router).
//!
//! The server is fully asynchronous on `async-std`, with one spawned task
//! per accepted connection. Nothing bounds how many tasks run at once; the
//! accept loop in [`Server::run`] is the single place a limit would slot in.
//!
//! ## Connection lifecycle
//!
//! 1. Accept a TCP connection
//! 2. Read once, up to `buffer_size` bytes; whatever arrived is the whole
//!    request (no keep-alive, no second read)
//! 3. Parse the text into an [`HttpRequest`]
//!    (delegated to [`http::parser::parse`](crate::http::parser::parse))
//! 4. Look up the handler and produce an [`HttpResponse`]
//! 5. Serialize, write, flush, close
//!
//! A read of zero bytes means the peer closed without sending anything and
//! ends the task silently. Bytes that fail to decode or parse are answered
//! with `400 Bad Request`. Both socket directions run under the configured
//! timeouts, so a stalled peer cannot hold a task open forever.

use std::net::SocketAddr;
use std::sync::Arc;

use async_std::io::timeout;
use async_std::net::{TcpListener, TcpStream};
use async_std::prelude::*;
use async_std::task;
use log::{info, warn};

use crate::config::config;
use crate::handler::router::Router;
use crate::http::parser::{self, ParseError};
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use crate::http::status::HttpStatus;

pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
}

/// Errors that can occur while reading a request off the stream,
/// used to interrupt the flow and pick the right response (or none).
enum ReadError {
    Io(std::io::Error),
    ConnectionClosed,
    NotUtf8,
    Parse(ParseError),
}

impl Server {
    /// Bind to the configured address and port. The router is frozen here;
    /// every connection task shares it read-only.
    pub async fn bind(router: Router) -> std::io::Result<Server> {
        let listener = TcpListener::bind((config().address, config().port)).await?;
        Ok(Server {
            listener,
            router: Arc::new(router),
        })
    }

    /// The address actually bound, which differs from the configured one
    /// when the configured port is 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections forever, spawning a task per client.
    /// A failed accept is logged and the loop keeps going.
    pub async fn run(self) -> std::io::Result<()> {
        info!("listening on {}", self.local_addr()?);

        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    let router = Arc::clone(&self.router);
                    task::spawn(async move {
                        if let Err(err) = Self::handle_client(stream, &router).await {
                            warn!("connection from {}: {}", peer, err);
                        }
                    });
                }
                Err(err) => warn!("accept failed: {}", err),
            }
        }
    }

    /// One timed read, then decode and parse. There is no read loop:
    /// a request larger than the buffer truncates, and the truncated text
    /// is parsed as-is.
    async fn read_request(stream: &mut TcpStream) -> Result<HttpRequest, ReadError> {
        let mut buffer = vec![0; config().buffer_size];

        let n = match timeout(config().read_timeout, stream.read(&mut buffer)).await {
            Ok(0) => return Err(ReadError::ConnectionClosed),
            Ok(n) => n,
            Err(err) => return Err(ReadError::Io(err)),
        };

        let text = std::str::from_utf8(&buffer[..n]).map_err(|_| ReadError::NotUtf8)?;
        parser::parse(text).map_err(ReadError::Parse)
    }

    /// Writes the serialized response back to the TCP stream under the
    /// configured write timeout.
    async fn write_response(
        stream: &mut TcpStream,
        response: &HttpResponse,
    ) -> std::io::Result<()> {
        let bytes = response.to_bytes();
        timeout(config().write_timeout, async {
            stream.write_all(&bytes).await?;
            stream.flush().await
        })
        .await
    }

    /// Handles a single client connection.
    /// Reads the request, routes it, and writes back the response.
    async fn handle_client(mut stream: TcpStream, router: &Router) -> std::io::Result<()> {
        let response = match Self::read_request(&mut stream).await {
            Ok(req) => {
                let response = router.route(&req);
                info!("{} {} -> {}", req.method, req.path, response.status());
                response
            }
            Err(ReadError::ConnectionClosed) => return Ok(()),
            Err(ReadError::Io(err)) => {
                warn!("I/O error while reading request: {}", err);
                return Ok(());
            }
            Err(ReadError::NotUtf8) => {
                warn!("request is not valid UTF-8");
                HttpResponse::new(HttpStatus::BadRequest)
            }
            Err(ReadError::Parse(err)) => {
                warn!("malformed request: {}", err);
                HttpResponse::new(HttpStatus::BadRequest)
            }
        };

        Self::write_response(&mut stream, &response).await
    }
}
