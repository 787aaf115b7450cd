use crate::app_config::{AppConfig, Environment};
use crate::geo::MAX_GEOHASH_PRECISION;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let value = or_default(var, default)
            .parse::<i64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value < 0 {
            return Err(invalid(var, format!("{value} must not be negative")));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("SHOPGEO_ENV", "development"))?;
    let bind_addr = parse_addr("SHOPGEO_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHOPGEO_LOG_LEVEL", "info");
    let data_path = PathBuf::from(or_default("SHOPGEO_DATA_PATH", "./data"));

    let geohash_precision = or_default("SHOPGEO_GEOHASH_PRECISION", "4")
        .parse::<usize>()
        .map_err(|e| invalid("SHOPGEO_GEOHASH_PRECISION", e.to_string()))?;
    if !(1..=MAX_GEOHASH_PRECISION).contains(&geohash_precision) {
        return Err(invalid(
            "SHOPGEO_GEOHASH_PRECISION",
            format!("{geohash_precision} is outside 1..={MAX_GEOHASH_PRECISION}"),
        ));
    }

    let default_radius_m = or_default("SHOPGEO_DEFAULT_RADIUS_M", "1000")
        .parse::<f64>()
        .map_err(|e| invalid("SHOPGEO_DEFAULT_RADIUS_M", e.to_string()))?;
    if !default_radius_m.is_finite() || default_radius_m < 0.0 {
        return Err(invalid(
            "SHOPGEO_DEFAULT_RADIUS_M",
            format!("{default_radius_m} must be a finite, non-negative number"),
        ));
    }

    let default_limit = parse_i64("SHOPGEO_DEFAULT_LIMIT", "50")?;
    let max_limit = parse_i64("SHOPGEO_MAX_LIMIT", "5000")?;
    if default_limit > max_limit {
        return Err(invalid(
            "SHOPGEO_DEFAULT_LIMIT",
            format!("{default_limit} exceeds SHOPGEO_MAX_LIMIT ({max_limit})"),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        data_path,
        geohash_precision,
        default_radius_m,
        default_limit,
        max_limit,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPGEO_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
