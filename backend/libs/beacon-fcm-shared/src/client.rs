use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::sync::{Arc, Mutex};

use crate::errors::FcmError;
use crate::models::*;

const FCM_SEND_ENDPOINT: &str = "https://fcm.googleapis.com/v1/projects";
const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

/// Firebase Cloud Messaging client.
///
/// Exchanges a service-account assertion for an OAuth2 bearer token and
/// submits data-only messages through the HTTP v1 API. Bearer tokens are
/// cached in-process and refreshed shortly before expiry.
pub struct FcmClient {
    credentials: Arc<ServiceAccountKey>,
    token_cache: Arc<Mutex<Option<TokenCache>>>,
    http_client: reqwest::Client,
}

impl FcmClient {
    /// Create a new FCM client from a service account key.
    pub fn new(credentials: ServiceAccountKey) -> Self {
        Self {
            credentials: Arc::new(credentials),
            token_cache: Arc::new(Mutex::new(None)),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.credentials.project_id
    }

    /// Exchange the service-account credential for a bearer token.
    ///
    /// A cached token is reused while it remains valid for at least another
    /// 60 seconds.
    pub async fn get_access_token(&self) -> Result<String, FcmError> {
        {
            let cache = self.token_cache.lock().expect("token cache lock poisoned");
            if let Some(cached) = cache.as_ref() {
                if cached.expires_at > Utc::now().timestamp() + 60 {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        let now = Utc::now();
        let claims = AssertionClaims {
            iss: self.credentials.client_email.clone(),
            sub: self.credentials.client_email.clone(),
            scope: FCM_SCOPE.to_string(),
            aud: self.credentials.token_uri.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())
            .map_err(|e| FcmError::Assertion(format!("invalid private key: {e}")))?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| FcmError::Assertion(e.to_string()))?;

        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", assertion.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.credentials.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| FcmError::TokenExchange(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FcmError::TokenExchange(format!(
                "status {}",
                response.status()
            )));
        }

        let token_response: GoogleTokenResponse = response
            .json()
            .await
            .map_err(|e| FcmError::TokenExchange(format!("malformed response: {e}")))?;

        let expires_at = Utc::now().timestamp() + token_response.expires_in;
        {
            let mut cache = self.token_cache.lock().expect("token cache lock poisoned");
            *cache = Some(TokenCache {
                access_token: token_response.access_token.clone(),
                expires_at,
            });
        }

        Ok(token_response.access_token)
    }

    /// Submit a data-only message addressed to a single device token.
    ///
    /// Returns the gateway's raw JSON body without interpreting delivery
    /// status; callers that care must inspect it themselves.
    pub async fn send(
        &self,
        device_token: &str,
        data: serde_json::Value,
    ) -> Result<serde_json::Value, FcmError> {
        let access_token = self.get_access_token().await?;

        let message = FcmMessage {
            message: FcmMessageBody {
                token: device_token.to_string(),
                data,
            },
        };

        let url = format!(
            "{FCM_SEND_ENDPOINT}/{}/messages:send",
            self.credentials.project_id
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&access_token)
            .json(&message)
            .send()
            .await
            .map_err(|e| FcmError::Send(e.to_string()))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FcmError::Response(e.to_string()))?;

        tracing::debug!(%status, project = %self.credentials.project_id, "fcm gateway response");
        Ok(body)
    }
}
