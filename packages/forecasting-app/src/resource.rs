//! The plugin's resource-request dispatcher

use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::{
    apis::resource::{
        CallResourceHandler, CallResourceRequest, CallResourceResponse,
        CallResourceResponseSender,
    },
    error::ResourceResult,
    settings::PluginSettings,
};

pub const CONFIG_PATH: &str = "config";

pub const NOT_FOUND_BODY: &str = "Resource not found";
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// Body of the `config` resource
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ConfigResponse {
    /// URL of the forecasting server, `none` when the host didn't set one
    pub forecasting_server: String,
}

/// The plugin's resource endpoints
///
/// Stateless, every request reads the environment afresh
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastingResources;

impl CallResourceHandler for ForecastingResources {
    #[instrument(
        level = "debug",
        skip(self, req, sender),
        fields(path = %req.path, method = %req.method)
    )]
    fn call_resource(
        &self,
        req: &CallResourceRequest,
        sender: &mut dyn CallResourceResponseSender,
    ) -> ResourceResult<()> {
        match req.path.as_str() {
            CONFIG_PATH => sender.send(config_response()),
            _ => {
                tracing::debug!("Resource not found");
                sender.send(CallResourceResponse::new(404, NOT_FOUND_BODY))
            }
        }
    }
}

fn config_response() -> CallResourceResponse {
    let settings = PluginSettings::from_env();

    json_response(&ConfigResponse {
        forecasting_server: settings.forecasting_server,
    })
}

// a fixed 500 body on encoding failure, the error detail only goes to the logs
pub(crate) fn json_response<T: Serialize>(body: &T) -> CallResourceResponse {
    match serde_json::to_vec(body) {
        Ok(bytes) => {
            CallResourceResponse::new(200, bytes).with_header("Content-Type", "application/json")
        }
        Err(err) => {
            tracing::error!("Failed to encode resource response: {err}");
            CallResourceResponse::new(500, INTERNAL_ERROR_BODY)
        }
    }
}
