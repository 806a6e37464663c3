use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub mod auth;
pub mod devices;
pub mod messages;
pub mod tokens;
pub mod users;
pub mod voice;

/// Build the full HTTP surface.
///
/// The signaling endpoints (`/voice`, `/call`) take no session token: the
/// telephony platform posting the webhook cannot present one. Outbound
/// dialing is likewise open.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/voice", post(voice::voice_webhook))
        .route("/call", post(voice::create_call));

    let protected = Router::new()
        .route("/token", post(tokens::chat_token))
        .route("/voice-token", post(tokens::voice_token))
        .route("/users", get(users::list_users))
        .route("/messages", post(messages::send_message))
        .route("/messages/:conversation_sid", get(messages::get_messages))
        .route("/save-fcm-token", post(devices::save_fcm_token))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::auth_middleware,
        ));

    crate::middleware::with_defaults(public.merge(protected)).with_state(state)
}
