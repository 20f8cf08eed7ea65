use std::net::IpAddr;

use async_std::task;
use clap::Parser;
use log::error;

use minnow::config::{self, ServerConfig};
use minnow::handler::router::Router;
use minnow::handler::{files, routes};
use minnow::logger;
use minnow::net::server::Server;

/// Minimal HTTP/1.1 server: one request per connection, parsed, routed,
/// answered, closed.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Listening address, overrides the configuration file
    #[arg(long)]
    address: Option<IpAddr>,

    /// Listening port, overrides the configuration file
    #[arg(long)]
    port: Option<u16>,

    /// Directory served by the /files routes, overrides the configuration file
    #[arg(long)]
    directory: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => ServerConfig::from_file(path),
        None => ServerConfig::default(),
    };
    if let Some(address) = args.address {
        cfg.address = address;
    }
    if let Some(port) = args.port {
        cfg.port = port;
    }
    if let Some(directory) = args.directory {
        cfg.files_root = directory;
    }

    logger::init(&cfg.log_level);
    config::init(cfg);

    let mut router = Router::new(routes::not_found);
    router.get("/", routes::root);
    router.get("/echo", routes::echo);
    router.get("/user-agent", routes::user_agent);
    router.get("/files", files::get_file);
    router.post("/files", files::post_file);

    task::block_on(async {
        let server = Server::bind(router).await.map_err(|err| {
            let cfg = config::config();
            error!("failed to bind {}:{}: {}", cfg.address, cfg.port, err);
            err
        })?;
        server.run().await
    })
}
