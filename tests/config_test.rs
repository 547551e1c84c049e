//! Tests for loading configuration from the environment

use keygate::config::ServerConfig;
use std::env;
use std::time::Duration;

const VARS: [&str; 7] = [
    "KEYGATE_JWT_SECRET",
    "JWT_SECRET",
    "KEYGATE_HOST",
    "KEYGATE_PORT",
    "KEYGATE_TOKEN_TTL_HOURS",
    "KEYGATE_MAX_BODY_BYTES",
    "KEYGATE_AUTH_MIN_MILLIS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

// Environment variables are process-wide, so every case runs in one test
#[test]
fn test_from_env() {
    clear_env();

    // Secret is mandatory
    let error = ServerConfig::from_env().unwrap_err();
    assert!(error.to_string().contains("JWT_SECRET"));

    // Fallback name is honoured and defaults apply
    env::set_var("JWT_SECRET", "fallback_jwt_k3y_with_32_characters_9x7z");
    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.token_ttl.num_hours(), 72);
    assert_eq!(config.auth_min_duration, Duration::from_millis(100));

    // Prefixed name wins and overrides are read
    env::set_var("KEYGATE_JWT_SECRET", "primary_jwt_k3y_with_32_characters_4q8w");
    env::set_var("KEYGATE_HOST", "127.0.0.1");
    env::set_var("KEYGATE_PORT", "9099");
    env::set_var("KEYGATE_TOKEN_TTL_HOURS", "1");
    env::set_var("KEYGATE_MAX_BODY_BYTES", "512");
    env::set_var("KEYGATE_AUTH_MIN_MILLIS", "250");
    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.jwt_secret, "primary_jwt_k3y_with_32_characters_4q8w");
    assert_eq!(config.bind_address(), "127.0.0.1:9099");
    assert_eq!(config.token_ttl.num_hours(), 1);
    assert_eq!(config.max_body_bytes, 512);
    assert_eq!(config.auth_min_duration, Duration::from_millis(250));

    // Lifetimes outside one hour to five years are refused
    for ttl in ["0", "-5", "43801", "1000000000000", "9223372036854775807"] {
        env::set_var("KEYGATE_TOKEN_TTL_HOURS", ttl);
        assert!(ServerConfig::from_env().is_err(), "accepted token ttl {}", ttl);
    }
    env::set_var("KEYGATE_TOKEN_TTL_HOURS", "43800");
    assert_eq!(ServerConfig::from_env().unwrap().token_ttl.num_hours(), 43800);
    env::remove_var("KEYGATE_TOKEN_TTL_HOURS");

    // Insecure secrets are refused
    for insecure in ["short", "your-secret-key-your-secret-key-42", "password_password_password_password_1"] {
        env::set_var("KEYGATE_JWT_SECRET", insecure);
        assert!(ServerConfig::from_env().is_err(), "accepted insecure secret {}", insecure);
    }

    clear_env();
}
