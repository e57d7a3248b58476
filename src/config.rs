//! Runtime configuration, read from environment variables at startup.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DATA_DIR: &str = "data";
pub const TEMPLATE_DIR: &str = "tmpl";
pub const LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding one `<title>.txt` file per page.
    pub data_dir: PathBuf,
    /// Directory holding `edit.html` and `view.html`.
    pub template_dir: PathBuf,
    pub addr: SocketAddr,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid WIKI_ADDR {value:?}: {source}")]
pub struct ConfigError {
    value: String,
    source: std::net::AddrParseError,
}

impl Config {
    /// Read `WIKI_DATA_DIR`, `WIKI_TEMPLATE_DIR` and `WIKI_ADDR`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("WIKI_DATA_DIR").unwrap_or_else(|| DATA_DIR.to_string());
        let template_dir = lookup("WIKI_TEMPLATE_DIR").unwrap_or_else(|| TEMPLATE_DIR.to_string());
        let addr = lookup("WIKI_ADDR").unwrap_or_else(|| LISTEN_ADDR.to_string());
        let addr: SocketAddr = addr
            .parse()
            .map_err(|source| ConfigError { value: addr.clone(), source })?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            template_dir: PathBuf::from(template_dir),
            addr,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR),
            template_dir: PathBuf::from(TEMPLATE_DIR),
            addr: LISTEN_ADDR.parse().expect("default listen address is valid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.addr.port(), 8080);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("WIKI_DATA_DIR", "/srv/wiki/pages"),
            ("WIKI_TEMPLATE_DIR", "/srv/wiki/tmpl"),
            ("WIKI_ADDR", "0.0.0.0:9000"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/wiki/pages"));
        assert_eq!(config.template_dir, PathBuf::from("/srv/wiki/tmpl"));
        assert_eq!(config.addr.to_string(), "0.0.0.0:9000");
    }

    #[test]
    fn test_bad_addr() {
        let err = Config::from_lookup(lookup(&[("WIKI_ADDR", ":8080")])).unwrap_err();
        assert!(err.to_string().contains(":8080"));
    }
}
