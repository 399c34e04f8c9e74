use crate::config::Config;
use crate::error::PromptError;
use std::env;
use std::time::Duration;

pub const TIMEOUT_ENV: &str = "POWERLINE_PROMPT_TIMEOUT";

/// Build the run configuration with priority: CLI args > env vars > defaults
pub fn load_config(timeout_arg: Option<String>, segments: Vec<String>) -> Result<Config, PromptError> {
    let mut config = Config {
        segments,
        ..Config::default()
    };

    apply_env_overrides(&mut config)?;

    if let Some(timeout) = timeout_arg {
        config.timeout = parse_duration(&timeout)?;
    }

    Ok(config)
}

fn apply_env_overrides(config: &mut Config) -> Result<(), PromptError> {
    if let Ok(timeout) = env::var(TIMEOUT_ENV) {
        if !timeout.trim().is_empty() {
            config.timeout = parse_duration(&timeout)?;
        }
    }
    Ok(())
}

/// Parse durations like `500ms`, `1s`, `1.5s`, `2m` or `1m30s`.
///
/// A bare number is taken as seconds.
pub fn parse_duration(input: &str) -> Result<Duration, PromptError> {
    let invalid = || PromptError::InvalidDuration(input.to_string());
    let text = input.trim();
    if text.is_empty() {
        return Err(invalid());
    }

    if let Ok(secs) = text.parse::<f64>() {
        return scaled(secs, NANOS_PER_SEC).ok_or_else(invalid);
    }

    let mut total = Duration::ZERO;
    let mut rest = text;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        if number_len == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..number_len].parse().map_err(|_| invalid())?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let nanos_per_unit = match &rest[..unit_len] {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3600 * NANOS_PER_SEC,
            _ => return Err(invalid()),
        };
        rest = &rest[unit_len..];

        total += scaled(value, nanos_per_unit).ok_or_else(invalid)?;
    }

    Ok(total)
}

const NANOS_PER_SEC: u64 = 1_000_000_000;

fn scaled(value: f64, nanos_per_unit: u64) -> Option<Duration> {
    let nanos = (value * nanos_per_unit as f64).round();
    (nanos.is_finite() && nanos >= 0.0 && nanos < u64::MAX as f64).then(|| Duration::from_nanos(nanos as u64))
}
