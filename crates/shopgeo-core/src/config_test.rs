use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn with_var<'a>(key: &'a str, value: &'a str) -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert(key, value);
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SHOPGEO_ENV"));
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults are valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.data_path.to_str(), Some("./data"));
    assert_eq!(cfg.geohash_precision, 4);
    assert!((cfg.default_radius_m - 1000.0).abs() < f64::EPSILON);
    assert_eq!(cfg.default_limit, 50);
    assert_eq!(cfg.max_limit, 5000);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let map = with_var("SHOPGEO_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPGEO_BIND_ADDR"),
        "expected InvalidEnvVar(SHOPGEO_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn geohash_precision_override() {
    let map = with_var("SHOPGEO_GEOHASH_PRECISION", "6");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.geohash_precision, 6);
}

#[test]
fn geohash_precision_zero_is_rejected() {
    let map = with_var("SHOPGEO_GEOHASH_PRECISION", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPGEO_GEOHASH_PRECISION"),
        "got: {result:?}"
    );
}

#[test]
fn geohash_precision_above_twelve_is_rejected() {
    let map = with_var("SHOPGEO_GEOHASH_PRECISION", "13");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn geohash_precision_not_a_number_is_rejected() {
    let map = with_var("SHOPGEO_GEOHASH_PRECISION", "fine");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn default_radius_override() {
    let map = with_var("SHOPGEO_DEFAULT_RADIUS_M", "250.5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!((cfg.default_radius_m - 250.5).abs() < f64::EPSILON);
}

#[test]
fn default_radius_negative_is_rejected() {
    let map = with_var("SHOPGEO_DEFAULT_RADIUS_M", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPGEO_DEFAULT_RADIUS_M"),
        "got: {result:?}"
    );
}

#[test]
fn default_limit_above_max_is_rejected() {
    let mut map = with_var("SHOPGEO_DEFAULT_LIMIT", "100");
    map.insert("SHOPGEO_MAX_LIMIT", "10");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPGEO_DEFAULT_LIMIT"),
        "got: {result:?}"
    );
}

#[test]
fn max_limit_negative_is_rejected() {
    let map = with_var("SHOPGEO_MAX_LIMIT", "-1");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn production_environment_is_parsed() {
    let map = with_var("SHOPGEO_ENV", "production");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.env.to_string(), "production");
}
