use clap::Parser;
use forecasting_app::{args::CliArgs, config::Config, run_server, settings::PluginSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utils::{
    config::{ConfigBuilder, ConfigExt},
    context::AppContext,
};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let config: Config = ConfigBuilder::new(args).build()?;

    let ctx = AppContext::new()?;

    // setup tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false),
        )
        .with(config.tracing_env_filter()?)
        .try_init()?;

    // read once here for visibility, the resource handler re-reads per request
    let settings = PluginSettings::from_env();
    tracing::info!(
        forecasting_server = %settings.forecasting_server,
        enable_alpha = settings.enable_alpha,
        app_tls_skip_verify_insecure = settings.app_tls_skip_verify_insecure,
        "Plugin settings loaded"
    );

    if let Err(err) = run_server(ctx, config) {
        tracing::error!("Failed to start plugin: {err:?}");
        return Err(err);
    }

    Ok(())
}
