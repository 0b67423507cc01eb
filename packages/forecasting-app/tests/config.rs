use std::sync::Arc;

use forecasting_app::{args::CliArgs, config::Config, test_utils::app::TestApp};
use utils::config::{CliEnvExt, ConfigExt};

// other tests in this file set these, holding the temp_env lock keeps them out
fn with_clean_env<R>(f: impl FnOnce() -> R) -> R {
    temp_env::with_vars_unset(
        [
            format!("{}_PORT", CliArgs::ENV_VAR_PREFIX),
            format!("{}_CORS_ALLOWED_ORIGINS", CliArgs::ENV_VAR_PREFIX),
        ],
        f,
    )
}

// port is *not* set anywhere for the test app
#[test]
fn config_default() {
    let app = with_clean_env(TestApp::new);

    assert_eq!(app.config.port, Config::default().port);
    assert_eq!(app.config.host, Config::default().host);
    assert!(app.config.cors_allowed_origins.is_empty());
}

#[test]
fn config_env_override() {
    let config = temp_env::with_vars(
        [
            (format!("{}_PORT", CliArgs::ENV_VAR_PREFIX), Some("9123")),
            (
                format!("{}_CORS_ALLOWED_ORIGINS", CliArgs::ENV_VAR_PREFIX),
                Some("http://localhost:3000, https://*.grafana.net"),
            ),
        ],
        || TestApp::new().config,
    );

    assert_eq!(config.port, 9123);
    assert_eq!(
        config.cors_allowed_origins,
        ["http://localhost:3000", "https://*.grafana.net"]
    );
}

#[test]
fn config_cli_beats_env() {
    let temp_home = Arc::new(tempfile::tempdir().unwrap());
    let mut cli_args = TestApp::zeroed_cli_args(&temp_home);
    cli_args.port = Some(9200);

    let config = temp_env::with_var(
        format!("{}_PORT", CliArgs::ENV_VAR_PREFIX),
        Some("9100"),
        || TestApp::new_with_args(cli_args, temp_home).config,
    );

    assert_eq!(config.port, 9200);
}

#[test]
fn config_file_sections() {
    let temp_home = Arc::new(tempfile::tempdir().unwrap());
    std::fs::write(
        temp_home.path().join(Config::FILENAME),
        r#"
[default]
log_level = ["info"]
host = "0.0.0.0"

[forecasting-app]
log_level = "debug, forecasting_app=trace"
port = 9300
"#,
    )
    .unwrap();

    let cli_args = TestApp::zeroed_cli_args(&temp_home);
    let config = with_clean_env(|| TestApp::new_with_args(cli_args, temp_home).config);

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 9300);
    assert_eq!(config.log_level, ["debug", "forecasting_app=trace"]);
    assert!(config.tracing_env_filter().is_ok());
}
