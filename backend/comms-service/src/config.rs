use dotenvy::dotenv;
use std::env;

use crate::error::AppError;

/// Telephony platform credentials and the fixed routing identifiers the
/// service signs grants against.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub api_key: String,
    pub api_secret: String,
    pub conversations_service_sid: String,
    pub twiml_app_sid: String,
    /// Caller id used as `From` for outbound calls.
    pub caller_number: String,
    /// Fixed call-instruction document for outbound calls.
    pub voice_url: String,
}

#[derive(Debug, Clone)]
pub struct FcmConfig {
    pub service_account_path: String,
}

/// Immutable process configuration, built once in `main` and passed
/// explicitly into every component.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub twilio: TwilioConfig,
    pub fcm: Option<FcmConfig>,
}

fn require(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Config(format!("{name} missing")))
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);
        let database_url = require("DATABASE_URL")?;
        let jwt_secret = require("JWT_SECRET")?;

        let twilio = TwilioConfig {
            account_sid: require("TWILIO_ACCOUNT_SID")?,
            auth_token: require("TWILIO_AUTH_TOKEN")?,
            api_key: require("TWILIO_API_KEY")?,
            api_secret: require("TWILIO_API_SECRET")?,
            conversations_service_sid: require("TWILIO_CONVERSATIONS_SERVICE_SID")?,
            twiml_app_sid: require("TWIML_APP_SID")?,
            caller_number: require("TWILIO_CALLER_NUMBER")?,
            voice_url: env::var("TWILIO_VOICE_URL")
                .unwrap_or_else(|_| "http://demo.twilio.com/docs/voice.xml".into()),
        };

        let fcm = match env::var("FCM_SERVICE_ACCOUNT_PATH") {
            Ok(path) if !path.trim().is_empty() => Some(FcmConfig {
                service_account_path: path,
            }),
            _ => None,
        };

        Ok(Self {
            port,
            database_url,
            jwt_secret,
            twilio,
            fcm,
        })
    }

    #[cfg(test)]
    pub fn test_defaults() -> Self {
        Self {
            port: 3000,
            database_url: "postgres://localhost/test".into(),
            jwt_secret: "test-session-secret".into(),
            twilio: TwilioConfig::test_defaults(),
            fcm: None,
        }
    }
}

#[cfg(test)]
impl TwilioConfig {
    pub fn test_defaults() -> Self {
        Self {
            account_sid: "ACxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx".into(),
            auth_token: "auth-token".into(),
            api_key: "SKxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx".into(),
            api_secret: "api-secret".into(),
            conversations_service_sid: "ISxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx".into(),
            twiml_app_sid: "APxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx".into(),
            caller_number: "+15550100".into(),
            voice_url: "http://demo.twilio.com/docs/voice.xml".into(),
        }
    }
}
