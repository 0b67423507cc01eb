use crate::{apis::resource::CallResourceHandler, config::Config};
use axum::routing::{any, get};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utils::context::AppContext;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use wildmatch::WildMatch;

use super::{
    handlers::{
        handle_health, handle_not_found, handle_resource, handle_resource_root, openapi::ApiDoc,
    },
    state::HttpState,
};

// this is called from main, blocks until the kill switch fires
pub fn start(
    ctx: AppContext,
    config: Config,
    resources: Arc<dyn CallResourceHandler>,
) -> anyhow::Result<()> {
    ctx.rt.clone().block_on(async move {
        let (host, port) = (config.host.clone(), config.port);

        let mut shutdown_signal = ctx.get_kill_receiver();

        let router = make_router(config, resources)?;

        let listener = tokio::net::TcpListener::bind(&format!("{}:{}", host, port)).await?;

        tracing::info!("Http server starting on: {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_signal.recv().await.ok();

                tracing::debug!("Http server shutting down");
            })
            .await?;

        anyhow::Ok(())
    })?;

    Ok(())
}

// this is called from main and tests
pub fn make_router(
    config: Config,
    resources: Arc<dyn CallResourceHandler>,
) -> anyhow::Result<axum::Router> {
    let state = HttpState::new(resources);

    let mut router = axum::Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/resources", any(handle_resource_root))
        .route("/resources/", any(handle_resource_root))
        .route("/resources/{*path}", any(handle_resource))
        .route("/health", get(handle_health))
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if let Some(cors) = cors_layer(&config) {
        router = router.layer(cors);
    }

    Ok(router)
}

fn cors_layer(config: &Config) -> Option<CorsLayer> {
    if config.cors_allowed_origins.is_empty() {
        None
    } else {
        let allowed_origins: Vec<WildMatch> = config
            .cors_allowed_origins
            .iter()
            .map(|s| WildMatch::new(s))
            .collect();

        Some(
            CorsLayer::new()
                // a predicate, so origins can use wildcard patterns
                .allow_origin(tower_http::cors::AllowOrigin::predicate(
                    move |origin, _parts| {
                        origin
                            .to_str()
                            .map(|origin| {
                                allowed_origins
                                    .iter()
                                    .any(|allowed_origin| allowed_origin.matches(origin))
                            })
                            .unwrap_or(false)
                    },
                ))
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
    }
}
