//! Exchange configuration (SPEC_FULL.md §8.2): listen address, intake
//! channel capacity, and the seed asset list, loaded via `clap` with
//! environment-variable fallback.

use clap::Parser;

use crate::ids::Shares;

/// One `{symbol, name}` pair from the `--asset` flag, formatted
/// `SYMBOL:Name` (e.g. `ACME:Acme Corp`).
#[derive(Debug, Clone)]
pub struct SeedAsset {
    pub symbol: String,
    pub name: String,
}

impl std::str::FromStr for SeedAsset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (symbol, name) = s
            .split_once(':')
            .ok_or_else(|| format!("expected SYMBOL:Name, got {s:?}"))?;
        Ok(SeedAsset {
            symbol: symbol.to_string(),
            name: name.to_string(),
        })
    }
}

/// Runtime configuration for the exchange process.
#[derive(Debug, Parser)]
#[command(name = "exchange-engine", about = "Single-venue matching engine")]
pub struct ExchangeConfig {
    /// Address the HTTP server binds to (spec.md §6: "TCP port 8080 by default").
    #[arg(long, env = "EXCHANGE_LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// Per-book intake channel capacity (spec.md §3 `intake`, "capacity
    /// 30 is a reasonable default").
    #[arg(long, env = "EXCHANGE_INTAKE_CAPACITY", default_value_t = 30)]
    pub intake_capacity: usize,

    /// Assets to create at startup, each `SYMBOL:Name` (repeatable).
    #[arg(long = "asset", env = "EXCHANGE_ASSETS", value_delimiter = ',', default_value = "ACME:Acme Corp,GLBX:Globex Corp,INTL:Initech")]
    pub seed_assets: Vec<SeedAsset>,

    /// Mid price used when seeding each book's initial random depth.
    #[arg(long, default_value_t = 100)]
    pub seed_mid_price: Shares,

    /// Maximum accepted request body size, in bytes (spec.md §6: 1 MiB cap).
    #[arg(long, default_value_t = 1024 * 1024)]
    pub max_body_bytes: usize,
}

impl ExchangeConfig {
    pub fn parse_args() -> Self {
        ExchangeConfig::parse()
    }
}
