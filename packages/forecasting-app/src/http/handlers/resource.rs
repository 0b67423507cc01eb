use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{HeaderMap, Method, Response, StatusCode, Uri},
    response::IntoResponse,
};

use crate::{
    apis::resource::{
        CallResourceRequest, CallResourceResponse, ResourceHeaders, ResponseCollector,
    },
    http::{
        error::{HttpError, HttpResult},
        state::HttpState,
    },
};

#[utoipa::path(
    method(get, post, put, patch, delete),
    path = "/resources/{path}",
    params(
        ("path" = String, Path, description = "Resource path relative to the plugin's resource root, e.g. `config`")
    ),
    request_body(
        content = Vec<u8>,
        content_type = "application/octet-stream",
        description = "Raw request body, forwarded as-is"
    ),
    responses(
        (status = 200, description = "Plugin configuration", body = crate::resource::ConfigResponse),
        (status = 404, description = "Resource not found", body = String),
        (status = 500, description = "Internal Server Error", body = String)
    ),
    description = "Dispatches a resource request to the plugin, whatever the method. Only `config` is served."
)]
#[axum::debug_handler]
pub async fn handle_resource(
    State(state): State<HttpState>,
    Path(path): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let req = into_resource_request(path, method, uri, headers, body);

    match dispatch(&state, req) {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

// `/resources` and `/resources/` carry no path, the wildcard route doesn't match them
#[axum::debug_handler]
pub async fn handle_resource_root(
    State(state): State<HttpState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let req = into_resource_request(String::new(), method, uri, headers, body);

    match dispatch(&state, req) {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

fn dispatch(state: &HttpState, req: CallResourceRequest) -> HttpResult<Response<Body>> {
    let mut collector = ResponseCollector::new();

    state.resources.call_resource(&req, &mut collector)?;

    let response = collector.into_response().ok_or(HttpError::NoResponse)?;

    into_http_response(response)
}

fn into_resource_request(
    path: String,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> CallResourceRequest {
    let mut resource_headers = ResourceHeaders::new();
    for (name, value) in headers.iter() {
        // non-visible-ascii header values can't be represented, drop them
        if let Ok(value) = value.to_str() {
            resource_headers
                .entry(name.as_str().to_string())
                .or_default()
                .push(value.to_string());
        }
    }

    CallResourceRequest {
        path,
        method: method.to_string(),
        url: uri.to_string(),
        headers: resource_headers,
        body: body.to_vec(),
    }
}

fn into_http_response(response: CallResourceResponse) -> HttpResult<Response<Body>> {
    let status = StatusCode::from_u16(response.status)
        .map_err(|_| HttpError::InvalidStatus(response.status))?;

    let mut builder = Response::builder().status(status);
    for (name, values) in &response.headers {
        for value in values {
            builder = builder.header(name.as_str(), value.as_str());
        }
    }

    builder
        .body(Body::from(response.body))
        .map_err(|err| HttpError::Other(err.into()))
}
