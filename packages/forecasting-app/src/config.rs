use serde::{Deserialize, Serialize};
use utils::{config::ConfigExt, serde::deserialize_vec_string};

/// The fully parsed and validated config struct we use in the application
/// this is built up from the ConfigBuilder which can load from multiple sources (in order of preference):
///
/// 1. cli args
/// 2. environment variables
/// 3. config file
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// The port to bind the server to.
    /// Default is `8003`
    pub port: u32,
    /// The log-level to use, in the format of [tracing directives](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives).
    /// Default is `["info"]`
    #[serde(deserialize_with = "deserialize_vec_string")]
    pub log_level: Vec<String>,
    /// The host to bind the server to
    /// Default is `localhost`
    pub host: String,
    /// The allowed cors origins, wildcards are allowed (e.g. `http://*.grafana.net`)
    /// Default is empty, which disables the cors layer
    #[serde(deserialize_with = "deserialize_vec_string")]
    pub cors_allowed_origins: Vec<String>,
}

/// Default values for the config struct
/// these are only used to fill in holes after all the parsing and loading is done
impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8003,
            log_level: vec!["info".to_string()],
            host: "localhost".to_string(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ConfigExt for Config {
    const FILENAME: &'static str = "forecasting-app.toml";
    const DIRNAME: &'static str = "forecasting-app";

    fn log_levels(&self) -> impl Iterator<Item = &str> {
        self.log_level.iter().map(|s| s.as_str())
    }
}
