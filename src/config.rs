use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

static CONFIG: OnceCell<ServerConfig> = OnceCell::new();

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,

    /// One read of this many bytes per connection; whatever fits is the
    /// whole request.
    pub buffer_size: usize,

    #[serde(deserialize_with = "deserialize_duration")]
    pub read_timeout: Duration,

    #[serde(deserialize_with = "deserialize_duration")]
    pub write_timeout: Duration,

    /// Base directory for the `/files` routes.
    pub files_root: String,

    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 4221,
            buffer_size: 1024,

            read_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(5),

            files_root: "./files".to_string(),

            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                eprintln!("Fail to read {}: {err}", path);
                eprintln!("Fall back to default config");
                return ServerConfig::default();
            }
        };

        match toml::from_str::<ServerConfig>(content.as_str()) {
            Ok(server_config) => server_config,
            Err(err) => {
                eprintln!("Fail to deserialize config file {}: {err}", path);
                eprintln!("Fall back to default config");
                ServerConfig::default()
            }
        }
    }
}

pub fn init(cfg: ServerConfig) {
    CONFIG.set(cfg).expect("Config already set");
}

pub fn config() -> &'static ServerConfig {
    CONFIG.get().expect("Config not initialized")
}

/// Install a config pointing `files_root` at a per-process temp directory.
/// First caller wins; later callers get the same instance.
#[cfg(test)]
pub(crate) fn init_for_tests() -> &'static ServerConfig {
    CONFIG.get_or_init(|| {
        let root = std::env::temp_dir().join(format!("minnow-test-{}", std::process::id()));
        std::fs::create_dir_all(&root).expect("create test files root");
        ServerConfig {
            files_root: root.to_string_lossy().into_owned(),
            ..ServerConfig::default()
        }
    })
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Ok(Duration::from_secs_f64(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_stock_server() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.address, IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)));
        assert_eq!(cfg.port, 4221);
        assert_eq!(cfg.buffer_size, 1024);
        assert_eq!(cfg.read_timeout, Duration::from_secs(5));
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = ServerConfig::from_file("/nonexistent/minnow.toml");
        assert_eq!(cfg.port, 4221);
        assert_eq!(cfg.files_root, "./files");
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let cfg: ServerConfig =
            toml::from_str("port = 9000\nread_timeout = 2.5\n").unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.read_timeout, Duration::from_secs_f64(2.5));
        assert_eq!(cfg.buffer_size, 1024);
        assert_eq!(cfg.files_root, "./files");
    }
}
