/// Voice-call signaling: the platform webhook and outbound call initiation
use axum::{
    extract::{Form, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{db::user_repo, error::AppError, services::twiml, state::AppState};

/// Form fields the telephony platform posts on an inbound signaling event.
/// Field names are capitalized on the wire.
#[derive(Debug, Deserialize)]
pub struct VoiceWebhookForm {
    #[serde(rename = "To")]
    pub to: Option<String>,
    #[serde(rename = "From")]
    pub from: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCallRequest {
    #[serde(default)]
    pub to: String,
}

/// POST /voice — inbound signaling webhook.
///
/// With a target, emits a connect-to-client instruction and (best effort)
/// wakes the target's device through the push relay; without one, speaks a
/// rejection. The response is always a call-control XML document.
pub async fn voice_webhook(
    State(state): State<AppState>,
    Form(form): Form<VoiceWebhookForm>,
) -> Result<Response, AppError> {
    let target = form.to.as_deref().filter(|to| !to.is_empty());

    let document = match target {
        None => twiml::say("No recipient specified"),
        Some(to) => {
            notify_target(&state, to, form.from.as_deref());
            twiml::dial_client(to)
        }
    };

    Ok(([(header::CONTENT_TYPE, "text/xml")], document).into_response())
}

/// Fire-and-forget push to the target's registered device, if any.
///
/// Runs on a detached task: the connect instruction above is never held up,
/// ordered against, or rolled back by the push outcome. Failures only log.
fn notify_target(state: &AppState, to: &str, from: Option<&str>) {
    let Some(fcm) = state.fcm.clone() else {
        return;
    };
    let db = state.db.clone();
    let to = to.to_string();
    let from = from.unwrap_or_default().to_string();

    tokio::spawn(async move {
        let user = match user_repo::find_by_username(&db, &to).await {
            Ok(Some(user)) => user,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, target = %to, "push target lookup failed");
                return;
            }
        };
        let Some(device_token) = user.fcm_token else {
            return;
        };

        let payload = json!({
            "twi_message_type": "twilio.voice.call",
            "from": from,
            "to": to,
        });
        match fcm.send(&device_token, payload).await {
            Ok(response) => {
                tracing::debug!(target = %to, %response, "voice-call push submitted")
            }
            Err(e) => tracing::warn!(error = %e, target = %to, "voice-call push failed"),
        }
    });
}

/// POST /call — place an outbound call through the telephony platform from
/// the configured caller number. Returns the platform-assigned call SID.
pub async fn create_call(
    State(state): State<AppState>,
    Json(payload): Json<CreateCallRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if payload.to.is_empty() {
        return Err(AppError::BadRequest(
            "missing destination number".to_string(),
        ));
    }

    let sid = state.twilio.create_call(&payload.to).await?;
    Ok(Json(json!({ "callSid": sid })))
}
