use crate::{config::Config, services::twilio::TwilioClient};
use beacon_fcm_shared::FcmClient;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub twilio: Arc<TwilioClient>,
    /// Push relay; `None` when no service-account key is configured, in
    /// which case call routing skips the notify step.
    pub fcm: Option<Arc<FcmClient>>,
}
