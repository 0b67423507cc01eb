use serde::{Deserialize, Serialize};
use utils::env::{env_as_bool, env_or_default};

pub const FORECASTING_SERVER_ENV: &str = "GF_PLUGINS_FORECASTING_SERVER";
pub const ENABLE_ALPHA_ENV: &str = "GF_PLUGINS_ENABLE_ALPHA";
pub const APP_TLS_SKIP_VERIFY_INSECURE_ENV: &str = "GF_PLUGINS_APP_TLS_SKIP_VERIFY_INSECURE";

/// Reported when the host hasn't configured a forecasting server
pub const FORECASTING_SERVER_DEFAULT: &str = "none";

/// Plugin instance settings, as handed to us by the host through its environment
///
/// Never cached: the host may change the environment between requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSettings {
    pub forecasting_server: String,
    pub enable_alpha: bool,
    pub app_tls_skip_verify_insecure: bool,
}

impl PluginSettings {
    pub fn from_env() -> Self {
        Self {
            forecasting_server: env_or_default(FORECASTING_SERVER_ENV, FORECASTING_SERVER_DEFAULT),
            enable_alpha: env_as_bool(ENABLE_ALPHA_ENV, false),
            app_tls_skip_verify_insecure: env_as_bool(APP_TLS_SKIP_VERIFY_INSECURE_ENV, false),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn settings_defaults() {
        let settings = temp_env::with_vars_unset(
            [
                FORECASTING_SERVER_ENV,
                ENABLE_ALPHA_ENV,
                APP_TLS_SKIP_VERIFY_INSECURE_ENV,
            ],
            PluginSettings::from_env,
        );

        assert_eq!(
            settings,
            PluginSettings {
                forecasting_server: "none".to_string(),
                enable_alpha: false,
                app_tls_skip_verify_insecure: false,
            }
        );
    }

    #[test]
    fn settings_from_env() {
        let settings = temp_env::with_vars(
            [
                (FORECASTING_SERVER_ENV, Some("https://example.com")),
                (ENABLE_ALPHA_ENV, Some("True")),
                (APP_TLS_SKIP_VERIFY_INSECURE_ENV, Some("1")),
            ],
            PluginSettings::from_env,
        );

        assert_eq!(settings.forecasting_server, "https://example.com");
        assert!(settings.enable_alpha);
        assert!(settings.app_tls_skip_verify_insecure);
    }

    #[test]
    fn settings_unrecognized_flags_fall_back() {
        let settings = temp_env::with_vars(
            [
                (ENABLE_ALPHA_ENV, Some("yes")),
                (APP_TLS_SKIP_VERIFY_INSECURE_ENV, Some("on")),
            ],
            PluginSettings::from_env,
        );

        assert!(!settings.enable_alpha);
        assert!(!settings.app_tls_skip_verify_insecure);
    }
}
