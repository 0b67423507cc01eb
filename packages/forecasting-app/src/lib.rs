pub mod apis;
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod resource;
pub mod settings;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use std::sync::Arc;

use config::Config;
use resource::ForecastingResources;
use utils::context::AppContext;

/// Entry point to start up the server
/// Blocks until the kill switch fires (ctrl-c)
pub fn run_server(ctx: AppContext, config: Config) -> anyhow::Result<()> {
    ctrlc::set_handler({
        let ctx = ctx.clone();
        move || {
            ctx.kill();
        }
    })?;

    http::server::start(ctx, config, Arc::new(ForecastingResources))
}
