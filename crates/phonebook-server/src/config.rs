use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Server settings, loadable from a TOML file.
///
/// Every field has a default, so a file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// JSON document backing the directory. `None` keeps entries in memory.
    pub data_path: Option<PathBuf>,
    /// Load the sample directory when the store starts empty.
    pub seed: bool,
    /// Answer cross-origin requests from browser frontends.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            data_path: None,
            seed: false,
            cors: true,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Replace the bind port with `port` (the value of `PORT`, typically).
    pub fn with_port_override(mut self, port: Option<&str>) -> ServerResult<Self> {
        if let Some(raw) = port {
            let port: u16 = raw
                .trim()
                .parse()
                .map_err(|_| ServerError::Config(format!("invalid PORT value {raw:?}")))?;
            self.bind_addr.set_port(port);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:3001".parse::<SocketAddr>().unwrap());
        assert!(c.data_path.is_none());
        assert!(!c.seed);
        assert!(c.cors);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str(
            r#"
            data_path = "/var/lib/phonebook/entries.json"
            seed = true
            "#,
        )
        .unwrap();
        assert_eq!(c.data_path, Some(PathBuf::from("/var/lib/phonebook/entries.json")));
        assert!(c.seed);
        assert_eq!(c.bind_addr.port(), 3001);
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 7").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phonebook.toml");
        std::fs::write(&path, "bind_addr = \"0.0.0.0:8080\"\ncors = false\n").unwrap();
        let c = ServerConfig::load(&path).unwrap();
        assert_eq!(c.bind_addr.port(), 8080);
        assert!(!c.cors);
    }

    #[test]
    fn port_override() {
        let c = ServerConfig::default().with_port_override(Some("4000")).unwrap();
        assert_eq!(c.bind_addr, "127.0.0.1:4000".parse::<SocketAddr>().unwrap());

        let unchanged = ServerConfig::default().with_port_override(None).unwrap();
        assert_eq!(unchanged.bind_addr.port(), 3001);

        assert!(ServerConfig::default().with_port_override(Some("http")).is_err());
    }
}
