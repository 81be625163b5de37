use super::*;
use crate::gemini::SafetyThreshold;
use serial_test::serial;
use std::env;
use std::net::IpAddr;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_aurora_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("AURORA_PORT");
        env::remove_var("AURORA_BIND_ADDR");
        env::remove_var("AURORA_PROJECT_ID");
        env::remove_var("AURORA_BQ_DATASET");
        env::remove_var("AURORA_BQ_TABLE");
        env::remove_var("AURORA_EMBEDDING_MODEL");
        env::remove_var("AURORA_BIGQUERY_URL");
        env::remove_var("AURORA_BQ_ACCESS_TOKEN");
        env::remove_var("GEMINI_API_KEY");
        env::remove_var("AURORA_GEMINI_URL");
        env::remove_var("AURORA_RESPONDER_MODEL");
        env::remove_var("AURORA_VALIDATOR_MODEL");
        env::remove_var("AURORA_SAFETY_THRESHOLD");
        env::remove_var("AURORA_ENVIRONMENT");
        env::remove_var("AURORA_EVAL_URL");
        env::remove_var("AURORA_EVAL_LOCATION");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.dataset, "alaska_faq");
    assert_eq!(config.table, "faq_embeddings");
    assert_eq!(config.bigquery_url, DEFAULT_BIGQUERY_URL);
    assert_eq!(config.gemini_url, DEFAULT_GEMINI_URL);
    assert_eq!(config.responder_model, "gemini-1.5-pro");
    assert_eq!(config.validator_model, "gemini-1.5-flash");
    assert_eq!(
        config.safety_threshold,
        SafetyThreshold::BlockMediumAndAbove
    );
    assert!(config.eval_url.is_none());
    assert!(!config.api_key_set());
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_aurora_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(config.dataset, "alaska_faq");
    assert!(config.bigquery_token.is_none());
}

#[test]
#[serial]
fn test_from_env_custom_values() {
    clear_aurora_env();

    with_env_vars(
        &[
            ("AURORA_PORT", "3000"),
            ("AURORA_BIND_ADDR", "0.0.0.0"),
            ("AURORA_PROJECT_ID", "winter-ops"),
            ("AURORA_BQ_DATASET", "faq_ds"),
            ("GEMINI_API_KEY", "test-key"),
            ("AURORA_SAFETY_THRESHOLD", "BLOCK_ONLY_HIGH"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.port, 3000);
            assert_eq!(
                config.bind_addr,
                IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0))
            );
            assert_eq!(config.project_id, "winter-ops");
            assert_eq!(config.dataset, "faq_ds");
            assert_eq!(config.gemini_api_key, "test-key");
            assert_eq!(config.safety_threshold, SafetyThreshold::BlockOnlyHigh);
            assert!(config.api_key_set());
        },
    );
}

#[test]
#[serial]
fn test_from_env_invalid_port() {
    clear_aurora_env();

    with_env_vars(&[("AURORA_PORT", "not-a-port")], || {
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::PortParseError { .. })
        ));
    });
}

#[test]
#[serial]
fn test_from_env_port_zero() {
    clear_aurora_env();

    with_env_vars(&[("AURORA_PORT", "0")], || {
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
    });
}

#[test]
#[serial]
fn test_from_env_invalid_bind_addr() {
    clear_aurora_env();

    with_env_vars(&[("AURORA_BIND_ADDR", "not-an-ip")], || {
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidBindAddr { .. })));
    });
}

#[test]
#[serial]
fn test_from_env_invalid_safety_threshold() {
    clear_aurora_env();

    with_env_vars(&[("AURORA_SAFETY_THRESHOLD", "BLOCK_EVERYTHING")], || {
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSafetyThreshold { .. })
        ));
    });
}

#[test]
#[serial]
fn test_from_env_blank_token_is_none() {
    clear_aurora_env();

    with_env_vars(&[("AURORA_BQ_ACCESS_TOKEN", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.bigquery_token.is_none());
    });
}

#[test]
fn test_validate_requires_project_and_key() {
    let mut config = Config::default();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MissingEnvVar {
            name: "AURORA_PROJECT_ID"
        })
    ));

    config.project_id = "winter-ops".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MissingEnvVar {
            name: "GEMINI_API_KEY"
        })
    ));

    config.gemini_api_key = "test-key".to_string();
    assert!(config.validate().is_ok());
}
