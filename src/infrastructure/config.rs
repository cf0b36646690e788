use crate::domain::board::DEFAULT_CAPACITY;
use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub board_name: String,
    pub board_title: String,
    pub board_description: String,
    pub board_capacity: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Defaults, then `config/highscores.*` if present, then environment
/// variables (`PORT`, `DATA_DIR`, `BOARD_NAME`, ...).
pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    load_from(config::Environment::default().try_parsing(true))
}

fn load_from(environment: config::Environment) -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .set_default("port", 8080)?
        .set_default("data_dir", ".")?
        .set_default("board_name", "first")?
        .set_default("board_title", "Balloon Game Highscores")?
        .set_default("board_description", "simple highscores example")?
        .set_default("board_capacity", DEFAULT_CAPACITY as u64)?
        .add_source(config::File::with_name("config/highscores").required(false))
        .add_source(environment)
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::default()
            .try_parsing(true)
            .source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let config = load_from(env(&[])).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.board_name, "first");
        assert_eq!(config.board_title, "Balloon Game Highscores");
        assert_eq!(config.board_capacity, 20);
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_environment_overrides() {
        let config = load_from(env(&[
            ("PORT", "9090"),
            ("BOARD_NAME", "second"),
            ("BOARD_CAPACITY", "5"),
            ("DATA_DIR", "/var/lib/highscores"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.board_name, "second");
        assert_eq!(config.board_capacity, 5);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/highscores"));
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        assert!(load_from(env(&[("PORT", "not-a-port")])).is_err());
    }
}
