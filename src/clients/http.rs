use std::{future::Future, time::Duration};

use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE},
};
use tracing::{debug, info};

use crate::{config::Config, error::Result, models::response::HttpResponse};

/// The two kinds of request a batch sender makes.
pub trait HttpClient: Send + Sync {
    /// Form-encoded POST expecting a JSON answer.
    fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> impl Future<Output = Result<HttpResponse>> + Send;

    /// Bearer-authenticated POST of a `multipart/mixed` body.
    fn post_multipart(
        &self,
        url: &str,
        bearer_token: &str,
        boundary: &str,
        body: String,
    ) -> impl Future<Output = Result<HttpResponse>> + Send;
}

#[derive(Clone)]
pub struct ReqwestHttpClient {
    http_client: Client,
}

impl ReqwestHttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        info!(
            timeout_seconds = config.request_timeout_seconds,
            "HTTP client initialized"
        );

        Ok(Self { http_client })
    }
}

impl HttpClient for ReqwestHttpClient {
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse> {
        debug!(url, "Posting form request");

        let response = self
            .http_client
            .post(url)
            .header(ACCEPT, "application/json")
            .form(form)
            .send()
            .await?;

        HttpResponse::from_reqwest(response).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        bearer_token: &str,
        boundary: &str,
        body: String,
    ) -> Result<HttpResponse> {
        debug!(url, body_bytes = body.len(), "Posting multipart request");

        let response = self
            .http_client
            .post(url)
            .bearer_auth(bearer_token)
            .header(CONTENT_TYPE, format!("multipart/mixed; boundary=\"{}\"", boundary))
            .body(body)
            .send()
            .await?;

        HttpResponse::from_reqwest(response).await
    }
}
