use crate::config::{Config, PredictorMode};
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::OnceLock;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const KEYS: &[&str] = &[
    "MODE",
    "PORT",
    "CORS_ORIGINS",
    "MODEL_PATH",
    "SEED_PATH",
    "OBSERVABILITY_ENABLED",
    "MODEL_ACCURACY",
];

fn clear_env() {
    for key in KEYS {
        // SAFETY: callers hold ENV_LOCK
        unsafe { env::remove_var(key) };
    }
}

#[test]
fn test_config_from_env_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.server.port, 5000);
    assert!(config.server.cors_origins.is_empty());
    assert_eq!(config.model.mode, PredictorMode::Onnx);
    assert_eq!(
        config.model.seed_path,
        PathBuf::from("data/last_60_prices.csv")
    );
    assert_eq!(config.model.model_type, "LSTM");
    assert_eq!(config.model.last_training_date, "2023-08-17");
    assert_eq!(config.model.accuracy, "~96%");
    assert!(config.observability.enabled);
}

#[test]
fn test_config_overrides() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    // SAFETY: ENV_LOCK held
    unsafe {
        env::set_var("MODE", "mock");
        env::set_var("PORT", "8081");
        env::set_var("CORS_ORIGINS", "http://localhost:5173, http://127.0.0.1:3000,");
        env::set_var("MODEL_PATH", "/srv/models/lstm.onnx");
        env::set_var("OBSERVABILITY_ENABLED", "false");
        env::set_var("MODEL_ACCURACY", "~97%");
    }

    let config = Config::from_env().unwrap();

    assert_eq!(config.model.mode, PredictorMode::Mock);
    assert_eq!(config.server.port, 8081);
    assert_eq!(
        config.server.cors_origins,
        vec!["http://localhost:5173", "http://127.0.0.1:3000"]
    );
    assert_eq!(config.model.model_path, PathBuf::from("/srv/models/lstm.onnx"));
    assert!(!config.observability.enabled);
    assert_eq!(config.model.accuracy, "~97%");

    clear_env();
}

#[test]
fn test_config_rejects_invalid_values() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    unsafe { env::set_var("PORT", "not-a-port") };
    assert!(Config::from_env().is_err());

    clear_env();
    unsafe { env::set_var("MODE", "tensorflow") };
    assert!(Config::from_env().is_err());

    clear_env();
}
