//! Server configuration
//!
//! Read once at start-up from environment variables:
//! - `HOST` (default `0.0.0.0`)
//! - `PORT` (default `5001`)
//! - `YIELD_FIXED_JITTER`: pin the yield jitter to a constant offset in ±0.1
//!
//! Unparsable values fall back to the default with a warning.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::estimator::{JitterMode, JITTER_SPAN};

pub const DEFAULT_PORT: u16 = 5001;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub jitter: JitterMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            jitter: JitterMode::Random,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, test map)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = parse_or_default(lookup("HOST"), "HOST", defaults.host);
        let port = parse_or_default(lookup("PORT"), "PORT", defaults.port);

        let jitter = match lookup("YIELD_FIXED_JITTER") {
            None => defaults.jitter,
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(offset) if offset.is_finite() && offset.abs() <= JITTER_SPAN => {
                    JitterMode::Fixed(offset)
                }
                _ => {
                    tracing::warn!(
                        "Ignoring YIELD_FIXED_JITTER={:?}: expected a number in [-{}, {}]",
                        raw,
                        JITTER_SPAN,
                        JITTER_SPAN
                    );
                    defaults.jitter
                }
            },
        };

        Self { host, port, jitter }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or_default<T: std::str::FromStr>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring {}={:?}: not a valid value", key, value);
            default
        }),
    }
}
