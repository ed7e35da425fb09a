#![allow(dead_code)]

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use fcm_batch::{Config, FileStore, HttpClient, Result, models::response::HttpResponse};
use reqwest::{StatusCode, header::HeaderMap};

pub const SERVICE_ACCOUNT_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/service_account.json");

pub const SERVICE_ACCOUNT_JSON: &str = include_str!("fixtures/service_account.json");

pub const PUBLIC_KEY_PEM: &str = include_str!("fixtures/public_key.pem");

pub const PKCS8_SERVICE_ACCOUNT_JSON: &str = include_str!("fixtures/service_account_pkcs8.json");

pub const PKCS8_PUBLIC_KEY_PEM: &str = include_str!("fixtures/public_key_pkcs8.pem");

pub const CLIENT_EMAIL: &str = "fcm-sender@fcm-batch-test.iam.gserviceaccount.com";

pub const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Config pointing both endpoints at a mock server and storage at a scratch dir.
pub fn test_config(server_uri: &str, storage_root: &Path) -> Config {
    let mut config = Config::with_credentials(SERVICE_ACCOUNT_PATH);
    config.storage_root = storage_root.to_string_lossy().into_owned();
    config.token_url = format!("{}/token", server_uri);
    config.batch_url = format!("{}/batch", server_uri);
    config.request_timeout_seconds = 5;
    config
}

/// Config for tests that must never reach the network.
pub fn offline_config() -> Config {
    let mut config = Config::with_credentials(SERVICE_ACCOUNT_PATH);
    config.sound = "chime.wav".to_string();
    config.token_url = "http://127.0.0.1:9/token".to_string();
    config.batch_url = "http://127.0.0.1:9/batch".to_string();
    config
}

/// In-memory store; clones share the same files so tests can inspect them after `send`.
#[derive(Default, Clone)]
pub struct MemoryFileStore {
    pub files: Arc<Mutex<HashMap<PathBuf, String>>>,
    pub operations: Arc<Mutex<Vec<String>>>,
}

impl MemoryFileStore {
    pub fn operation_count(&self) -> usize {
        self.operations.lock().unwrap().len()
    }
}

impl FileStore for MemoryFileStore {
    async fn append(&self, path: &Path, contents: &str) -> Result<()> {
        self.operations
            .lock()
            .unwrap()
            .push(format!("append {}", path.display()));

        let mut files = self.files.lock().unwrap();
        let file = files.entry(path.to_path_buf()).or_default();
        file.push_str(contents);
        file.push('\n');

        Ok(())
    }

    async fn read_all(&self, path: &Path) -> Result<String> {
        self.operations
            .lock()
            .unwrap()
            .push(format!("read {}", path.display()));

        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such batch file").into())
    }

    async fn delete(&self, path: &Path) -> Result<()> {
        self.operations
            .lock()
            .unwrap()
            .push(format!("delete {}", path.display()));

        self.files.lock().unwrap().remove(path);

        Ok(())
    }
}

/// Answers every request with 200 and remembers the URLs it was asked for.
#[derive(Default, Clone)]
pub struct RecordingHttpClient {
    pub urls: Arc<Mutex<Vec<String>>>,
    pub bodies: Arc<Mutex<Vec<String>>>,
}

impl RecordingHttpClient {
    pub fn call_count(&self) -> usize {
        self.urls.lock().unwrap().len()
    }
}

impl HttpClient for RecordingHttpClient {
    async fn post_form(&self, url: &str, _form: &[(&str, &str)]) -> Result<HttpResponse> {
        self.urls.lock().unwrap().push(url.to_string());

        Ok(HttpResponse::new(
            StatusCode::OK,
            HeaderMap::new(),
            r#"{"access_token":"recorded-token"}"#,
        ))
    }

    async fn post_multipart(
        &self,
        url: &str,
        _bearer_token: &str,
        _boundary: &str,
        body: String,
    ) -> Result<HttpResponse> {
        self.urls.lock().unwrap().push(url.to_string());
        self.bodies.lock().unwrap().push(body);

        Ok(HttpResponse::new(StatusCode::OK, HeaderMap::new(), ""))
    }
}
