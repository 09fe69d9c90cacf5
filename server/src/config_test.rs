use std::collections::HashMap;

use super::*;

fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_without_proxy() {
    let cfg = config_from(&[]).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.site_root, PathBuf::from(DEFAULT_SITE_ROOT));
    assert_eq!(cfg.proxy, None);
}

#[test]
fn blank_target_leaves_proxy_disabled() {
    let cfg = config_from(&[("API_PROXY_TARGET", "   ")]).unwrap();
    assert_eq!(cfg.proxy, None);
}

#[test]
fn target_enables_proxy_with_dev_defaults() {
    let cfg = config_from(&[("API_PROXY_TARGET", "http://localhost:8000")]).unwrap();
    let proxy = cfg.proxy.expect("proxy configured");
    assert_eq!(proxy.prefix, "/api");
    assert_eq!(proxy.target.as_str(), "http://localhost:8000/");
    assert!(proxy.change_origin);
    assert!(!proxy.secure);
    assert!(proxy.ws);
}

#[test]
fn overrides_are_parsed() {
    let cfg = config_from(&[
        ("PORT", "5173"),
        ("SITE_ROOT", "dist"),
        ("API_PROXY_TARGET", "https://jobs-backend.example.com"),
        ("API_PROXY_PREFIX", "/backend/"),
        ("API_PROXY_CHANGE_ORIGIN", "false"),
        ("API_PROXY_SECURE", "yes"),
        ("API_PROXY_WS", "0"),
    ])
    .unwrap();
    assert_eq!(cfg.port, 5173);
    assert_eq!(cfg.site_root, PathBuf::from("dist"));
    let proxy = cfg.proxy.expect("proxy configured");
    assert_eq!(proxy.prefix, "/backend");
    assert_eq!(proxy.target.host_str(), Some("jobs-backend.example.com"));
    assert!(!proxy.change_origin);
    assert!(proxy.secure);
    assert!(!proxy.ws);
}

#[test]
fn invalid_port_errors() {
    let err = config_from(&[("PORT", "eighty")]).unwrap_err();
    assert_eq!(err, ConfigError::InvalidPort("eighty".to_owned()));
    assert!(config_from(&[("PORT", "70000")]).is_err());
}

#[test]
fn invalid_bool_errors_with_variable_name() {
    let err = config_from(&[("API_PROXY_TARGET", "http://localhost:8000"), ("API_PROXY_WS", "maybe")]).unwrap_err();
    assert!(err.to_string().contains("API_PROXY_WS"));
}

#[test]
fn bool_flags_are_ignored_without_target() {
    let cfg = config_from(&[("API_PROXY_WS", "maybe")]).unwrap();
    assert_eq!(cfg.proxy, None);
}

#[test]
fn non_http_target_errors() {
    let err = config_from(&[("API_PROXY_TARGET", "ftp://files.example.com")]).unwrap_err();
    assert!(err.to_string().contains("unsupported scheme"));
}

#[test]
fn unparsable_target_errors() {
    assert!(matches!(
        config_from(&[("API_PROXY_TARGET", "not a url")]),
        Err(ConfigError::InvalidTarget { .. })
    ));
}

#[test]
fn prefix_must_be_absolute() {
    assert_eq!(
        config_from(&[("API_PROXY_TARGET", "http://localhost:8000"), ("API_PROXY_PREFIX", "api")]).unwrap_err(),
        ConfigError::InvalidPrefix("api".to_owned())
    );
    assert!(config_from(&[("API_PROXY_TARGET", "http://localhost:8000"), ("API_PROXY_PREFIX", "/")]).is_err());
}
