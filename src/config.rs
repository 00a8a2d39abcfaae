//! Runtime configuration, read from the environment.
//!
//! | Variable | Default | |
//! |---|---|---|
//! | `POSTBOX_ADDR` | `0.0.0.0:5002` | socket address to bind |
//! | `POSTBOX_SEED` | `true` | start with the two seed posts |
//!
//! Log filtering is `RUST_LOG`, handled by the subscriber in `main`.

use std::net::SocketAddr;

use crate::error::Error;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub seed: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let addr = match lookup("POSTBOX_ADDR") {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|_| Error::Config { key: "POSTBOX_ADDR", value: raw })?,
            None => default_addr(),
        };

        let seed = match lookup("POSTBOX_SEED") {
            Some(raw) => parse_bool(&raw).ok_or(Error::Config { key: "POSTBOX_SEED", value: raw })?,
            None => true,
        };

        Ok(Self { addr, seed })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { addr: default_addr(), seed: true }
    }
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5002))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on"  => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _                            => None,
    }
}
