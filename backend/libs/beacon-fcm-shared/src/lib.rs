/// Beacon FCM Shared Library
///
/// Firebase Cloud Messaging (HTTP v1) client used by Beacon services to
/// deliver data-only push messages to registered devices.
///
/// It handles:
/// - OAuth2 bearer token generation from a Google service account
/// - Token caching with refresh shortly before expiry
/// - Data-only message delivery to a single device token

pub mod client;
pub mod errors;
pub mod models;

pub use client::FcmClient;
pub use errors::FcmError;
pub use models::ServiceAccountKey;
