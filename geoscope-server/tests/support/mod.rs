use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use geoscope_config::{
    AuthConfig, Config, ConfigMetadata, DatasetConfig, ServerConfig,
};
use geoscope_server::{AppState, create_app, infra::startup::bootstrap_state};

pub const TOKEN: &str = "dGhlc2VjcmV0dG9rZW4=";
pub const PUBLIC_BASE_URL: &str = "http://127.0.0.1:8080";

#[allow(unused)]
pub const ORIGIN: &str = "ed354fef-31d3-44a9-b92f-4a3bd7eb0408";
#[allow(unused)]
pub const FAR_AWAY: &str = "17f4ceee-8270-4119-87c0-9c1ef946695e";
#[allow(unused)]
pub const FIXTURE_RECORDS: usize = 9;

// Code is used by test modules, but not in this scope
#[allow(unused)]
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

#[allow(unused)]
pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/addresses.json")
}

#[allow(unused)]
pub fn test_config(dataset: PathBuf) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            public_base_url: Some(PUBLIC_BASE_URL.parse().unwrap()),
            trust_proxy_headers: false,
        },
        dataset: DatasetConfig {
            path: dataset,
            stream_chunk_bytes: 256,
        },
        auth: AuthConfig {
            access_token: TOKEN.into(),
        },
        metadata: ConfigMetadata::default(),
    }
}

#[allow(unused)]
pub fn server_for(state: AppState) -> TestServer {
    TestServer::new(create_app(state)).expect("failed to build test server")
}

#[allow(unused)]
pub async fn build_test_app() -> TestApp {
    build_test_app_with_config(test_config(fixture_path())).await
}

#[allow(unused)]
pub async fn build_test_app_with_config(config: Config) -> TestApp {
    let state = bootstrap_state(Arc::new(config))
        .await
        .expect("fixture dataset should load");
    TestApp {
        server: server_for(state.clone()),
        state,
    }
}

/// Path component of an absolute `resultsUrl`.
#[allow(unused)]
pub fn poll_path(results_url: &str) -> &str {
    results_url
        .strip_prefix(PUBLIC_BASE_URL)
        .expect("results url should use the configured base")
}

/// Polls until the job stops answering `202`.
#[allow(unused)]
pub async fn poll_until_settled(server: &TestServer, path: &str) -> TestResponse {
    for _ in 0..200 {
        let response = server.get(path).authorization_bearer(TOKEN).await;
        if response.status_code() != StatusCode::ACCEPTED {
            return response;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job at {path} never settled");
}
