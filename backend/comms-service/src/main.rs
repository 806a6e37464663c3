use std::sync::Arc;

use beacon_fcm_shared::{FcmClient, ServiceAccountKey};
use comms_service::{config::Config, db, routes, services::twilio::TwilioClient, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "comms_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let pool = db::init_pool(&config.database_url).await?;
    tracing::info!("database connection pool established");

    db::run_migrations(&pool).await?;
    tracing::info!("database migrations completed");

    let fcm = match config.fcm.as_ref() {
        Some(fcm_cfg) => match ServiceAccountKey::from_file(&fcm_cfg.service_account_path) {
            Ok(key) => Some(Arc::new(FcmClient::new(key))),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load FCM credentials; push delivery disabled");
                None
            }
        },
        None => None,
    };

    let twilio = Arc::new(TwilioClient::new(&config.twilio));

    let state = AppState {
        db: pool,
        config: config.clone(),
        twilio,
        fcm,
    };
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(%addr, "starting comms-service");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
