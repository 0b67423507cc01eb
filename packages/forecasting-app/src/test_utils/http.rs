use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, Response},
};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::{apis::resource::CallResourceHandler, resource::ForecastingResources};

use super::app::TestApp;

#[derive(Clone)]
pub struct TestHttpApp {
    pub inner: TestApp,
    http_router: axum::Router,
}

impl Default for TestHttpApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHttpApp {
    pub fn new() -> Self {
        Self::new_with_app(TestApp::new())
    }

    pub fn new_with_app(inner: TestApp) -> Self {
        Self::new_with_resources(inner, Arc::new(ForecastingResources))
    }

    pub fn new_with_resources(inner: TestApp, resources: Arc<dyn CallResourceHandler>) -> Self {
        let http_router =
            crate::http::server::make_router(inner.config.as_ref().clone(), resources).unwrap();

        Self { inner, http_router }
    }

    pub async fn call(&self, req: Request<Body>) -> Response<Body> {
        self.http_router.clone().oneshot(req).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.call(req).await
    }
}

pub async fn response_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn map_response<T: DeserializeOwned>(response: Response<Body>) -> T {
    serde_json::from_slice(&response_bytes(response).await).unwrap()
}
