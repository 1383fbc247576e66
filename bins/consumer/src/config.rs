use std::time::Duration;

use clap::Args;
use serde::Deserialize;

use crate::error::ConsumerError;

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_PRODUCER_HOST: &str = "producer:8080";
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 30;

// ═══════════════════════════════════════════════════════════════
//  Config file (TOML)
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub port: Option<u16>,
    pub producer_host: Option<String>,
    /// Секунды; значения <= 0 игнорируются.
    pub connection_check_interval: Option<i64>,
}

pub fn load_config(path: &str) -> Result<Config, ConsumerError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConsumerError::Config {
        context: "read",
        detail: format!("'{path}': {e}"),
    })?;
    toml::from_str(&content).map_err(|e| ConsumerError::Config {
        context: "parse",
        detail: format!("'{path}': {e}"),
    })
}

// ═══════════════════════════════════════════════════════════════
//  CLI args
// ═══════════════════════════════════════════════════════════════

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// Path to an optional TOML config file
    #[arg(long, default_value = "consumer.toml", env = "CONSUMER_CONFIG")]
    pub config: String,

    /// HTTP listen port
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Producer address as host:port
    #[arg(long, env = "PRODUCER_HOST")]
    pub producer_host: Option<String>,

    /// Seconds between producer health checks; non-positive or unparsable values are ignored
    #[arg(long, env = "CONNECTION_CHECK_INTERVAL")]
    pub connection_check_interval: Option<String>,
}

// ═══════════════════════════════════════════════════════════════
//  Effective: merged config
// ═══════════════════════════════════════════════════════════════

/// Итоговая конфигурация: default < config file < env/CLI.
#[derive(Debug)]
pub struct Effective {
    pub port: u16,
    pub producer_host: String,
    pub check_interval: Duration,
}

impl Effective {
    pub fn new(args: &ServeArgs) -> Result<Self, ConsumerError> {
        let cfg = match load_config(&args.config) {
            Ok(c) => c,
            Err(e) => {
                if std::path::Path::new(&args.config).exists() {
                    return Err(e);
                }
                Config::default()
            }
        };
        Ok(Self::merge(args, cfg))
    }

    fn merge(args: &ServeArgs, cfg: Config) -> Self {
        let from_args = args.connection_check_interval.as_deref().and_then(|raw| {
            let secs = parse_interval_secs(raw);
            if secs.is_none() {
                tracing::warn!(value = %raw, "ignoring invalid connection check interval");
            }
            secs
        });
        let from_file = cfg
            .connection_check_interval
            .and_then(|secs| u64::try_from(secs).ok())
            .filter(|secs| *secs > 0);
        let interval_secs = from_args.or(from_file).unwrap_or(DEFAULT_CHECK_INTERVAL_SECS);

        Self {
            port: args.port.or(cfg.port).unwrap_or(DEFAULT_PORT),
            producer_host: args
                .producer_host
                .clone()
                .filter(|h| !h.is_empty())
                .or(cfg.producer_host)
                .unwrap_or_else(|| DEFAULT_PRODUCER_HOST.into()),
            check_interval: Duration::from_secs(interval_secs),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Положительное целое число секунд; иначе `None`.
pub fn parse_interval_secs(raw: &str) -> Option<u64> {
    raw.parse::<i64>().ok().filter(|v| *v > 0).map(|v| v as u64)
}
