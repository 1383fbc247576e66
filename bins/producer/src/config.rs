use clap::Args;
use serde::Deserialize;

use crate::error::ProducerError;

pub const DEFAULT_PORT: u16 = 8080;

// ═══════════════════════════════════════════════════════════════
//  Config file (TOML)
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub port: Option<u16>,
}

pub fn load_config(path: &str) -> Result<Config, ProducerError> {
    let content = std::fs::read_to_string(path).map_err(|e| ProducerError::Config {
        context: "read",
        detail: format!("'{path}': {e}"),
    })?;
    toml::from_str(&content).map_err(|e| ProducerError::Config {
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
    #[arg(long, default_value = "producer.toml", env = "PRODUCER_CONFIG")]
    pub config: String,

    /// HTTP listen port
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
}

// ═══════════════════════════════════════════════════════════════
//  Effective: merged config
// ═══════════════════════════════════════════════════════════════

/// Итоговая конфигурация: default < config file < env/CLI.
#[derive(Debug)]
pub struct Effective {
    pub port: u16,
}

impl Effective {
    pub fn new(args: &ServeArgs) -> Result<Self, ProducerError> {
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
        Self {
            port: args.port.or(cfg.port).unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
