//! Engine settings: optional TOML file, then environment overrides.

use std::path::Path;

use anyhow::Context;

use pantry_allocation::{EngineConfig, UrgencyPolicy};

pub const UTILIZATION_RATE_ENV: &str = "PANTRY_UTILIZATION_RATE";
pub const URGENCY_POLICY_ENV: &str = "PANTRY_URGENCY_POLICY";

/// Load the engine config from `path` (if any) and the process environment.
pub fn load(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            from_toml(&text).with_context(|| format!("invalid config file {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    apply_overrides(config, |key| std::env::var(key).ok())
}

pub fn from_toml(text: &str) -> anyhow::Result<EngineConfig> {
    Ok(toml::from_str(text)?)
}

/// Apply `PANTRY_*` overrides read through `lookup`.
pub fn apply_overrides(
    mut config: EngineConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<EngineConfig> {
    if let Some(raw) = lookup(UTILIZATION_RATE_ENV) {
        let rate: f64 = raw
            .trim()
            .parse()
            .with_context(|| format!("{UTILIZATION_RATE_ENV} is not a number: {raw}"))?;
        config = config.with_utilization_rate(rate);
    }
    if let Some(raw) = lookup(URGENCY_POLICY_ENV) {
        let policy: UrgencyPolicy = raw.parse().map_err(anyhow::Error::msg)?;
        config = config.with_urgency_policy(policy);
    }
    Ok(config)
}
