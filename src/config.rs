//! Compiled-in service defaults.
//!
//! The demo exposes no configuration surface: the listen address is fixed and
//! only `RUST_LOG` is consulted, by the logging layer.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen: SocketAddr,
    /// Tag injected in front of every log line.
    pub app_name: &'static str,
    /// How often the default process metrics are refreshed.
    pub sample_interval: Duration,
    /// Filter used when `RUST_LOG` is unset or invalid.
    pub default_log_filter: &'static str,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            app_name: "minikube-metrics-demo",
            sample_interval: Duration::from_secs(5),
            default_log_filter: "info",
        }
    }
}
