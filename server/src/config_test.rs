use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_run_demo_mode_on_3000() {
    let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.port, 3000);
    assert_eq!(config.upstream, None);
    assert_eq!(config.proxy_timeout, Duration::from_secs(30));
    assert!(config.is_demo());
}

#[test]
fn upstream_trailing_slash_is_trimmed() {
    let config = ServerConfig::from_lookup(lookup(&[("IAM_API_URL", "https://iam.internal/v1/"), ("PORT", "8080")])).unwrap();
    assert_eq!(config.upstream.as_deref(), Some("https://iam.internal/v1"));
    assert_eq!(config.port, 8080);
    assert!(!config.is_demo());
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let config = ServerConfig::from_lookup(lookup(&[("IAM_API_URL", "  "), ("PORT", ""), ("IAM_PROXY_TIMEOUT_SECS", " ")])).unwrap();
    assert!(config.is_demo());
    assert_eq!(config.port, DEFAULT_PORT);
}

#[test]
fn malformed_values_are_rejected() {
    assert_eq!(
        ServerConfig::from_lookup(lookup(&[("PORT", "http")])),
        Err(ConfigError::InvalidPort("http".to_owned()))
    );
    assert_eq!(
        ServerConfig::from_lookup(lookup(&[("IAM_PROXY_TIMEOUT_SECS", "0")])),
        Err(ConfigError::InvalidTimeout("0".to_owned()))
    );
    assert!(matches!(
        ServerConfig::from_lookup(lookup(&[("IAM_API_URL", "iam.internal")])),
        Err(ConfigError::InvalidUpstream(_))
    ));
}
