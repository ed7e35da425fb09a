use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    clients::{
        http::{HttpClient, ReqwestHttpClient},
        oauth::{self, MAX_JWT_PERIOD_SECONDS},
        storage::{FileStore, LocalFileStore},
    },
    config::Config,
    error::{FcmBatchError, Result},
    models::{
        credentials::ServiceAccountKey,
        fcm::{FcmRequest, Payload},
        response::HttpResponse,
        validation::validate_custom_payload,
    },
    utils::{MAX_PAYLOAD, SUBREQUEST_BOUNDARY, batch_file_name, write_batch_body},
};

/// Collects messages for one FCM batch call and sends them together.
///
/// Queue order is preserved all the way to the wire, so FCM's sub-responses
/// line up with the order payloads were added in. `send` consumes the sender;
/// build a new one for the next batch.
pub struct BatchSender<H = ReqwestHttpClient, S = LocalFileStore> {
    config: Config,
    http_client: H,
    file_store: S,
    batch_file_name: String,
    payloads: Vec<Payload>,
}

impl BatchSender<ReqwestHttpClient, LocalFileStore> {
    /// Sender backed by reqwest and the local storage root from `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let http_client = ReqwestHttpClient::new(&config)?;
        let file_store = LocalFileStore::new(&config.storage_root);

        Ok(Self::new(config, http_client, file_store))
    }
}

impl<H: HttpClient, S: FileStore> BatchSender<H, S> {
    pub fn new(config: Config, http_client: H, file_store: S) -> Self {
        let batch_file_name = batch_file_name();

        info!(
            batch_file = %batch_file_name,
            credential_path = %config.service_json_base_path,
            "FCM batch sender initialized"
        );

        Self {
            config,
            http_client,
            file_store,
            batch_file_name,
            payloads: Vec::new(),
        }
    }

    /// Queues a notification for one device.
    ///
    /// Android messages carry the configured sound; iOS messages are sent
    /// without a platform block.
    pub fn add_payload(
        &mut self,
        token: &str,
        title: &str,
        body: &str,
        data: Option<HashMap<String, String>>,
        is_ios: bool,
    ) -> &mut Self {
        let request = if is_ios {
            FcmRequest::ios(token, title, body, data)
        } else {
            FcmRequest::android(token, title, body, data, &self.config.sound)
        };

        self.payloads.push(Payload::Message(request));
        self
    }

    /// Queues a hand-built message document as-is.
    ///
    /// See <https://firebase.google.com/docs/reference/fcm/rest/v1/projects.messages>.
    pub fn add_custom_payload(&mut self, payload: Value) -> Result<&mut Self> {
        validate_custom_payload(&payload)?;

        self.payloads.push(Payload::Custom(payload));
        Ok(self)
    }

    /// Queues every message of a JSON array document, in array order.
    ///
    /// Nothing is queued unless every entry passes validation.
    pub fn add_custom_payloads_from_json(&mut self, document: &str) -> Result<&mut Self> {
        let parsed: Value = serde_json::from_str(document)?;

        let entries = match parsed {
            Value::Array(entries) => entries,
            _ => {
                return Err(FcmBatchError::Validation(
                    "Payload document must be a JSON array".to_string(),
                ));
            }
        };

        for entry in &entries {
            validate_custom_payload(entry)?;
        }

        debug!(payload_count = entries.len(), "Custom payloads parsed");

        self.payloads.extend(entries.into_iter().map(Payload::Custom));
        Ok(self)
    }

    pub fn payloads(&self) -> &[Payload] {
        &self.payloads
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    pub fn batch_file_name(&self) -> &str {
        &self.batch_file_name
    }

    /// Where the request body is staged, relative to the file store root.
    pub fn batch_file_path(&self) -> PathBuf {
        self.config.temp_file_path(&self.batch_file_name)
    }

    pub async fn create_jwt_token(&self, period_seconds: i64) -> Result<String> {
        oauth::create_jwt_token(self.config.credential_path(), period_seconds).await
    }

    pub async fn get_access_token(&self) -> Result<String> {
        let assertion = self.create_jwt_token(MAX_JWT_PERIOD_SECONDS).await?;

        oauth::exchange_assertion(&self.http_client, &self.config.token_url, &assertion).await
    }

    /// Sends every queued payload in one batch request.
    ///
    /// The raw batch response comes back untouched, including non-success
    /// statuses; reading the per-message results is up to the caller. The
    /// staged body file is removed whether or not the request went through.
    pub async fn send(self) -> Result<HttpResponse> {
        if self.payloads.len() > MAX_PAYLOAD {
            return Err(FcmBatchError::Validation(format!(
                "Total Payload per API call cannot exceed {} messages",
                MAX_PAYLOAD
            )));
        }

        let key = ServiceAccountKey::from_file(self.config.credential_path()).await?;
        let project_id = self.resolve_project_id(&key)?;
        let path = self.batch_file_path();

        let outcome = self.deliver(&key, &project_id, &path).await;

        if let Err(e) = self.file_store.delete(&path).await {
            warn!(
                batch_file = %path.display(),
                error = %e,
                "Failed to remove batch request file"
            );
        }

        outcome
    }

    async fn deliver(
        &self,
        key: &ServiceAccountKey,
        project_id: &str,
        path: &Path,
    ) -> Result<HttpResponse> {
        write_batch_body(&self.file_store, path, project_id, &self.payloads).await?;

        debug!(
            payload_count = self.payloads.len(),
            batch_file = %path.display(),
            "Batch body written"
        );

        let assertion =
            oauth::sign_assertion(key, Utc::now().timestamp(), MAX_JWT_PERIOD_SECONDS)?;
        let access_token =
            oauth::exchange_assertion(&self.http_client, &self.config.token_url, &assertion)
                .await?;

        let body = self.file_store.read_all(path).await?;

        let response = self
            .http_client
            .post_multipart(&self.config.batch_url, &access_token, SUBREQUEST_BOUNDARY, body)
            .await?;

        info!(
            payload_count = self.payloads.len(),
            status = %response.status,
            "FCM batch request completed"
        );

        Ok(response)
    }

    fn resolve_project_id(&self, key: &ServiceAccountKey) -> Result<String> {
        self.config
            .project_id
            .clone()
            .or_else(|| key.project_id.clone())
            .ok_or_else(|| {
                FcmBatchError::Config(
                    "No FCM project id configured and none found in the service account file"
                        .to_string(),
                )
            })
    }
}
