use serde::Deserialize;

use crate::{config::TwilioConfig, error::AppError};

const API_BASE: &str = "https://api.twilio.com/2010-04-01";

#[derive(Debug, Deserialize)]
struct CallResource {
    sid: String,
}

/// Thin client for the telephony platform's REST API. Holds the shared HTTP
/// client and the account credentials; safe to share across requests.
#[derive(Clone)]
pub struct TwilioClient {
    http_client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    caller_number: String,
    voice_url: String,
}

impl TwilioClient {
    pub fn new(cfg: &TwilioConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            account_sid: cfg.account_sid.clone(),
            auth_token: cfg.auth_token.clone(),
            caller_number: cfg.caller_number.clone(),
            voice_url: cfg.voice_url.clone(),
        }
    }

    /// Place an outbound call from the configured caller number to `to`,
    /// driven by the fixed call-instruction document. Returns the
    /// platform-assigned call SID.
    pub async fn create_call(&self, to: &str) -> Result<String, AppError> {
        let url = format!("{API_BASE}/Accounts/{}/Calls.json", self.account_sid);
        let params = [
            ("To", to),
            ("From", self.caller_number.as_str()),
            ("Url", self.voice_url.as_str()),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("call request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(AppError::Internal(format!(
                "call API error: {status} - {body}"
            )));
        }

        let call: CallResource = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("failed to parse call response: {e}")))?;

        Ok(call.sid)
    }
}
