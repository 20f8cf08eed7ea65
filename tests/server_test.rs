//! Black-box tests: bind a real listener on an ephemeral port and talk to
//! it over raw TCP, asserting on the exact bytes that come back.

use std::fs;
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::path::PathBuf;
use std::sync::Once;
use std::thread;
use std::time::Duration;

use async_std::task;

use minnow::config::{self, ServerConfig};
use minnow::handler::router::Router;
use minnow::handler::{files, routes};
use minnow::net::server::Server;

static INIT: Once = Once::new();

fn files_root() -> PathBuf {
    std::env::temp_dir().join(format!("minnow-itest-{}", std::process::id()))
}

fn setup() {
    INIT.call_once(|| {
        fs::create_dir_all(files_root()).expect("create files root");
        config::init(ServerConfig {
            port: 0,
            files_root: files_root().to_string_lossy().into_owned(),
            ..ServerConfig::default()
        });
    });
}

/// The stock route table, registered in the same order as `main`.
fn stock_router() -> Router {
    let mut router = Router::new(routes::not_found);
    router.get("/", routes::root);
    router.get("/echo", routes::echo);
    router.get("/user-agent", routes::user_agent);
    router.get("/files", files::get_file);
    router.post("/files", files::post_file);
    router
}

fn start_server() -> SocketAddr {
    setup();
    let server = task::block_on(Server::bind(stock_router())).expect("bind server");
    let addr = server.local_addr().expect("local addr");
    task::spawn(server.run());
    addr
}

/// Send raw bytes, half-close, and read until the server closes.
fn send(addr: SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("set read timeout");
    stream
        .set_write_timeout(Some(Duration::from_secs(5)))
        .expect("set write timeout");

    stream.write_all(request).expect("write request");
    stream.shutdown(Shutdown::Write).expect("shutdown write");

    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read response");
    String::from_utf8(response).expect("response is valid UTF-8")
}

#[test]
fn root_answers_a_bare_status_line() {
    let addr = start_server();
    assert_eq!(send(addr, b"GET / HTTP/1.1\r\n\r\n"), "HTTP/1.1 200 OK\r\n\r\n");
}

#[test]
fn echo_reflects_the_path_value() {
    let addr = start_server();
    assert_eq!(
        send(addr, b"GET /echo/banana HTTP/1.1\r\n\r\n"),
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 6\r\n\r\nbanana\r\n\r\n"
    );
}

#[test]
fn user_agent_is_reflected() {
    let addr = start_server();
    assert_eq!(
        send(
            addr,
            b"GET /user-agent HTTP/1.1\r\nHost: localhost\r\nUser-Agent: test-client/1.0\r\n\r\n"
        ),
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 15\r\n\r\ntest-client/1.0\r\n\r\n"
    );
}

#[test]
fn missing_user_agent_is_a_bad_request() {
    let addr = start_server();
    assert_eq!(
        send(addr, b"GET /user-agent HTTP/1.1\r\n\r\n"),
        "HTTP/1.1 400 Bad Request\r\n\r\n"
    );
}

#[test]
fn unknown_path_is_not_found() {
    let addr = start_server();
    assert_eq!(
        send(addr, b"GET /unknown HTTP/1.1\r\n\r\n"),
        "HTTP/1.1 404 Not Found\r\n\r\n"
    );
}

#[test]
fn unrouted_method_hits_the_default_handler() {
    let addr = start_server();
    assert_eq!(
        send(addr, b"DELETE / HTTP/1.1\r\n\r\n"),
        "HTTP/1.1 404 Not Found\r\n\r\n"
    );
}

#[test]
fn files_round_trip_over_the_wire() {
    let addr = start_server();
    assert_eq!(
        send(
            addr,
            b"POST /files/wire-round-trip.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello"
        ),
        "HTTP/1.1 201 Created\r\n\r\n"
    );
    assert_eq!(
        send(addr, b"GET /files/wire-round-trip.txt HTTP/1.1\r\n\r\n"),
        "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: 5\r\n\r\nhello\r\n\r\n"
    );
}

#[test]
fn missing_file_is_not_found() {
    let addr = start_server();
    assert_eq!(
        send(addr, b"GET /files/wire-missing.txt HTTP/1.1\r\n\r\n"),
        "HTTP/1.1 404 Not Found\r\n\r\n"
    );
}

#[test]
fn content_length_header_does_not_limit_the_body() {
    let addr = start_server();
    assert_eq!(
        send(
            addr,
            b"POST /files/wire-cl-mismatch.txt HTTP/1.1\r\nContent-Length: 999\r\n\r\nhi"
        ),
        "HTTP/1.1 201 Created\r\n\r\n"
    );
    assert_eq!(
        send(addr, b"GET /files/wire-cl-mismatch.txt HTTP/1.1\r\n\r\n"),
        "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: 2\r\n\r\nhi\r\n\r\n"
    );
}

#[test]
fn malformed_request_line_is_a_bad_request() {
    let addr = start_server();
    assert_eq!(
        send(addr, b"garbage\r\n\r\n"),
        "HTTP/1.1 400 Bad Request\r\n\r\n"
    );
    assert_eq!(
        send(addr, b"GET / HTTP/1.1 extra\r\n\r\n"),
        "HTTP/1.1 400 Bad Request\r\n\r\n"
    );
}

#[test]
fn hundred_concurrent_requests_each_get_their_answer() {
    let addr = start_server();

    let clients: Vec<_> = (0..100)
        .map(|_| thread::spawn(move || send(addr, b"GET / HTTP/1.1\r\n\r\n")))
        .collect();

    for client in clients {
        assert_eq!(client.join().expect("client thread"), "HTTP/1.1 200 OK\r\n\r\n");
    }
}
