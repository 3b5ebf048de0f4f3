use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

use doodle_codec::Edge;

/// Server settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub edge: Edge,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("DOODLE_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("DOODLE_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("DOODLE_PORT must be a port number")?;
        let db_path: PathBuf = lookup("DOODLE_DB_PATH")
            .unwrap_or_else(|| "doodles.db".into())
            .into();
        let edge = match lookup("DOODLE_EDGE") {
            Some(v) => v.parse().context("DOODLE_EDGE must be a positive multiple of 4")?,
            None => Edge::DEFAULT,
        };

        Ok(Self {
            host,
            port,
            db_path,
            edge,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.edge, Edge::DEFAULT);
        assert_eq!(cfg.db_path, PathBuf::from("doodles.db"));
        assert_eq!(cfg.addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn overrides() {
        let cfg = config(&[("DOODLE_EDGE", "16"), ("DOODLE_PORT", "8080"), ("DOODLE_HOST", "127.0.0.1")]).unwrap();
        assert_eq!(cfg.edge.packed_len(), 16);
        assert_eq!(cfg.addr().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config(&[("DOODLE_EDGE", "10")]).is_err());
        assert!(config(&[("DOODLE_PORT", "http")]).is_err());
        assert!(config(&[("DOODLE_HOST", "not a host")]).unwrap().addr().is_err());
    }
}
