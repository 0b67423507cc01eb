use super::*;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(resource::handle_resource, health::handle_health),
    info(
        title = "Forecasting App API",
        description = "Resource endpoints of the forecasting app plugin backend"
    )
)]
pub struct ApiDoc;
