use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ResourceError;

pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("not found")]
    NotFound,

    #[error("resource handler: {0}")]
    Resource(#[from] ResourceError),

    #[error("resource handler finished without sending a response")]
    NoResponse,

    #[error("resource handler sent an invalid status code: {0}")]
    InvalidStatus(u16),

    #[error("{0:?}")]
    Other(#[from] anyhow::Error),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::NotFound => StatusCode::NOT_FOUND,
            HttpError::Resource(_)
            | HttpError::NoResponse
            | HttpError::InvalidStatus(_)
            | HttpError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("{self}");
        }

        (
            status,
            Json(ErrorMessage {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub message: String,
}
