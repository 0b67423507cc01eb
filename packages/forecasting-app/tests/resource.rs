use forecasting_app::{
    apis::resource::{
        CallResourceHandler, CallResourceRequest, CallResourceResponse, ResponseCollector,
    },
    error::ResourceError,
    resource::{ConfigResponse, ForecastingResources, NOT_FOUND_BODY},
    settings::FORECASTING_SERVER_ENV,
};

fn call(path: &str) -> CallResourceResponse {
    let mut collector = ResponseCollector::new();

    ForecastingResources
        .call_resource(&CallResourceRequest::new(path), &mut collector)
        .unwrap();

    collector.into_response().unwrap()
}

fn decode_config(response: &CallResourceResponse) -> ConfigResponse {
    serde_json::from_slice(&response.body).unwrap()
}

#[test]
fn config_default_server() {
    let response = temp_env::with_var_unset(FORECASTING_SERVER_ENV, || call("config"));

    assert_eq!(response.status, 200);
    assert_eq!(
        decode_config(&response),
        ConfigResponse {
            forecasting_server: "none".to_string()
        }
    );
}

#[cfg(unix)]
#[test]
fn config_server_not_unicode() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let response = temp_env::with_var(
        FORECASTING_SERVER_ENV,
        Some(OsStr::from_bytes(b"http://h\xff:5000")),
        || call("config"),
    );

    assert_eq!(response.status, 200);
    assert_eq!(
        decode_config(&response),
        ConfigResponse {
            forecasting_server: "http://h\u{FFFD}:5000".to_string()
        }
    );
}

#[test]
fn config_server_from_env() {
    let response = temp_env::with_var(
        FORECASTING_SERVER_ENV,
        Some("https://example.com"),
        || call("config"),
    );

    assert_eq!(response.status, 200);
    assert_eq!(response.headers["Content-Type"], ["application/json"]);

    // exactly one key
    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"forecasting_server": "https://example.com"})
    );
}

#[test]
fn config_reads_env_per_request() {
    let first = temp_env::with_var(FORECASTING_SERVER_ENV, Some("http://a:5000"), || {
        call("config")
    });
    let second = temp_env::with_var(FORECASTING_SERVER_ENV, Some("http://b:5000"), || {
        call("config")
    });

    assert_eq!(decode_config(&first).forecasting_server, "http://a:5000");
    assert_eq!(decode_config(&second).forecasting_server, "http://b:5000");
}

#[test]
fn config_ignores_method() {
    let mut req = CallResourceRequest::new("config");
    req.method = "POST".to_string();

    let mut collector = ResponseCollector::new();
    temp_env::with_var_unset(FORECASTING_SERVER_ENV, || {
        ForecastingResources
            .call_resource(&req, &mut collector)
            .unwrap()
    });

    assert_eq!(collector.into_response().unwrap().status, 200);
}

#[test]
fn unknown_paths_not_found() {
    for path in ["health", "", "config/extra", "/config", "Config", "config "] {
        let response = call(path);

        assert_eq!(response.status, 404, "path {path:?}");
        assert_eq!(response.body, NOT_FOUND_BODY.as_bytes(), "path {path:?}");
    }
}

#[test]
fn repeated_calls_are_identical() {
    temp_env::with_var(FORECASTING_SERVER_ENV, Some("https://example.com"), || {
        let first = call("config");
        for _ in 0..5 {
            assert_eq!(call("config"), first);
        }
    });

    let first = call("missing");
    assert_eq!(call("missing"), first);
}

#[test]
fn sender_errors_propagate() {
    let mut collector = ResponseCollector::new();
    let req = CallResourceRequest::new("health");

    ForecastingResources
        .call_resource(&req, &mut collector)
        .unwrap();

    // the collector only takes one response
    assert_eq!(
        ForecastingResources.call_resource(&req, &mut collector),
        Err(ResourceError::AlreadySent)
    );
}
