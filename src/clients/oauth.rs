use std::path::Path;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use tracing::{debug, warn};

use crate::{
    clients::http::HttpClient,
    error::{FcmBatchError, Result},
    models::credentials::{
        AssertionClaims, FIREBASE_MESSAGING_SCOPE, JWT_BEARER_GRANT_TYPE, ServiceAccountKey,
        TokenResponse,
    },
};

/// Google refuses service-account assertions valid for longer than an hour.
pub const MAX_JWT_PERIOD_SECONDS: i64 = 3600;

fn check_period(period_seconds: i64) -> Result<()> {
    if period_seconds > MAX_JWT_PERIOD_SECONDS {
        return Err(FcmBatchError::Config(
            "JWT validity period cannot exceed 1 hour".to_string(),
        ));
    }

    if period_seconds <= 0 {
        return Err(FcmBatchError::Config(
            "JWT period must be a positive number of seconds".to_string(),
        ));
    }

    Ok(())
}

/// Signs the service-account assertion for a given issue time.
///
/// RS256 signatures are deterministic, so the same key, `iat` and period
/// always yield the same token.
pub fn sign_assertion(key: &ServiceAccountKey, iat: i64, period_seconds: i64) -> Result<String> {
    check_period(period_seconds)?;

    let claims = AssertionClaims {
        iss: key.client_email.clone(),
        aud: key.token_uri.clone(),
        scope: FIREBASE_MESSAGING_SCOPE.to_string(),
        iat,
        exp: iat + period_seconds,
    };

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;

    Ok(encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)?)
}

/// Reads the credential file and signs an assertion issued now.
pub async fn create_jwt_token(credential_path: &Path, period_seconds: i64) -> Result<String> {
    check_period(period_seconds)?;

    let key = ServiceAccountKey::from_file(credential_path).await?;

    sign_assertion(&key, Utc::now().timestamp(), period_seconds)
}

/// Trades a signed assertion for a bearer access token.
pub async fn exchange_assertion<H: HttpClient>(
    http_client: &H,
    token_url: &str,
    assertion: &str,
) -> Result<String> {
    debug!(token_url, "Exchanging service account assertion");

    let response = http_client
        .post_form(
            token_url,
            &[("grant_type", JWT_BEARER_GRANT_TYPE), ("assertion", assertion)],
        )
        .await?;

    if !response.is_success() {
        warn!(status = %response.status, "Token endpoint rejected assertion");

        return Err(FcmBatchError::Auth {
            status: response.status.as_u16(),
            body: response.text().into_owned(),
        });
    }

    let token_response: TokenResponse = response.json()?;

    match token_response.access_token {
        // Google sometimes pads the token with trailing dots.
        Some(token) => {
            debug!(expires_in = ?token_response.expires_in, "Access token issued");
            Ok(token.trim_end_matches('.').to_string())
        }
        None => Err(FcmBatchError::Auth {
            status: response.status.as_u16(),
            body: response.text().into_owned(),
        }),
    }
}
