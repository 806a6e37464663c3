use thiserror::Error;

/// FCM client error types.
#[derive(Error, Debug)]
pub enum FcmError {
    #[error("failed to read service account key: {0}")]
    KeyFile(String),

    #[error("failed to parse service account key: {0}")]
    KeyParse(String),

    #[error("failed to sign service-account assertion: {0}")]
    Assertion(String),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("push request failed: {0}")]
    Send(String),

    #[error("failed to parse gateway response: {0}")]
    Response(String),
}
