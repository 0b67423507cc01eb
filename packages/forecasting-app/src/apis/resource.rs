use std::collections::BTreeMap;

use crate::error::{ResourceError, ResourceResult};

/// Header name to all of its values, in the host's multi-value shape
pub type ResourceHeaders = BTreeMap<String, Vec<String>>;

/// A request the host routed to one of the plugin's custom resource endpoints
///
/// `path` is relative to the plugin's resource root, without a leading slash
/// (e.g. `config`, not `/resources/config`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallResourceRequest {
    pub path: String,
    pub method: String,
    pub url: String,
    pub headers: ResourceHeaders,
    pub body: Vec<u8>,
}

impl CallResourceRequest {
    /// A bodiless GET, with `url` shaped the way the HTTP transport fills it
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();

        Self {
            url: format!("/resources/{path}"),
            path,
            method: "GET".to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallResourceResponse {
    pub status: u16,
    pub headers: ResourceHeaders,
    pub body: Vec<u8>,
}

impl CallResourceResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: ResourceHeaders::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }
}

/// The sink a handler answers through
pub trait CallResourceResponseSender {
    fn send(&mut self, response: CallResourceResponse) -> ResourceResult<()>;
}

/// Handles resource requests. Implementations are shared across concurrent requests.
pub trait CallResourceHandler: Send + Sync {
    fn call_resource(
        &self,
        req: &CallResourceRequest,
        sender: &mut dyn CallResourceResponseSender,
    ) -> ResourceResult<()>;
}

/// A sender that holds on to exactly one response
#[derive(Debug, Default)]
pub struct ResponseCollector {
    response: Option<CallResourceResponse>,
}

impl ResponseCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_response(self) -> Option<CallResourceResponse> {
        self.response
    }
}

impl CallResourceResponseSender for ResponseCollector {
    fn send(&mut self, response: CallResourceResponse) -> ResourceResult<()> {
        if self.response.is_some() {
            return Err(ResourceError::AlreadySent);
        }

        self.response = Some(response);
        Ok(())
    }
}
