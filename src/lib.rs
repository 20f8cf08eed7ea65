//! A deliberately small HTTP/1.1 server: one read per connection, plain
//! text parsing, ordered prefix routing, exact-byte responses, then close.
//!
//! Module map:
//! - [`http`]: wire types, the parser and the response serializer
//! - [`handler`]: the route table and the built-in handlers
//! - [`net`]: listener and per-connection tasks
//! - [`config`]: process-wide [`ServerConfig`](config::ServerConfig)
//! - [`logger`]: terminal logger setup

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod net;
