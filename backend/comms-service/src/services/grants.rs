//! Scoped access tokens for the real-time communications platform.
//!
//! The platform consumes JWTs in its own access-token format: content type
//! `twilio-fpa;v=1`, issued by an API key on behalf of the account, with a
//! `grants` claim naming the identity and the granted capability.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::TwilioConfig, error::AppError};

/// Grant lifetime (the platform default).
const GRANT_TTL_SECS: i64 = 3600;
const ACCESS_TOKEN_CTY: &str = "twilio-fpa;v=1";

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub jti: String,
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub grants: Grants,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Grants {
    pub identity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatGrant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceGrant>,
}

/// Access to the fixed conversations service.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatGrant {
    pub service_sid: String,
}

/// Outgoing calls through the TwiML application; incoming calls allowed.
#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceGrant {
    pub outgoing: OutgoingVoice,
    pub incoming: IncomingVoice,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OutgoingVoice {
    pub application_sid: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IncomingVoice {
    pub allow: bool,
}

/// Issue a grant scoped to the conversations service, bound to `identity`.
pub fn issue_chat_grant(cfg: &TwilioConfig, identity: &str) -> Result<String, AppError> {
    sign(
        cfg,
        Grants {
            identity: identity.to_string(),
            chat: Some(ChatGrant {
                service_sid: cfg.conversations_service_sid.clone(),
            }),
            voice: None,
        },
    )
}

/// Issue a grant allowing outgoing calls through the configured application
/// and incoming calls to `identity`.
pub fn issue_voice_grant(cfg: &TwilioConfig, identity: &str) -> Result<String, AppError> {
    sign(
        cfg,
        Grants {
            identity: identity.to_string(),
            chat: None,
            voice: Some(VoiceGrant {
                outgoing: OutgoingVoice {
                    application_sid: cfg.twiml_app_sid.clone(),
                },
                incoming: IncomingVoice { allow: true },
            }),
        },
    )
}

fn sign(cfg: &TwilioConfig, grants: Grants) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = AccessTokenClaims {
        jti: format!("{}-{}", cfg.api_key, Uuid::new_v4().simple()),
        iss: cfg.api_key.clone(),
        sub: cfg.account_sid.clone(),
        iat: now,
        exp: now + GRANT_TTL_SECS,
        grants,
    };

    let header = Header {
        cty: Some(ACCESS_TOKEN_CTY.to_string()),
        ..Header::default()
    };

    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(cfg.api_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("grant signing failed: {e}")))
}
