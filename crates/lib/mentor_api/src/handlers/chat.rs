//! Chat endpoints: text and image chat through the relay.

use axum::Json;
use axum::extract::multipart::{Field, Multipart, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use mentor_core::history::{HistoryInput, decode_history};
use mentor_core::models::{ChatResult, ConversationTurn, ImageAttachment};
use mentor_core::relay::{RelayError, preview};
use mentor_core::upload::UploadPolicy;
use tracing::{debug, info};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::TextChatRequest;

/// Fields collected from the image chat form.
#[derive(Debug, Default)]
struct ImageChatForm {
    message: Option<String>,
    history: Vec<ConversationTurn>,
    image: Option<ImageAttachment>,
}

fn relay_failure(state: &AppState, e: RelayError) -> AppError {
    AppError::from_relay(e, state.config.environment.exposes_details())
}

/// `POST /api/chat`: text chat with optional history.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<TextChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResult>> {
    let Json(body) = payload?;
    let history = body
        .conversation_history
        .map(HistoryInput::into_turns)
        .unwrap_or_default();
    let message = body.message.filter(|m| !m.is_empty());

    info!(
        message = %preview(message.as_deref().unwrap_or_default(), 50),
        history_len = history.len(),
        "received chat request"
    );

    let Some(message) = message else {
        return Err(AppError::Validation("Message is required".into()));
    };

    let result = state
        .relay
        .converse(Some(&message), &history, None)
        .await
        .map_err(|e| relay_failure(&state, e))?;
    Ok(Json(result))
}

/// `POST /api/chat/image`: multipart chat with an optional image.
///
/// Form fields: `message` (text), `conversationHistory` (JSON-encoded text),
/// `image` (file). Unknown fields are ignored.
pub async fn image_chat_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<ChatResult>> {
    let mut multipart = multipart?;
    let form = read_image_form(&mut multipart, &state.upload_policy).await?;

    info!(
        message = %preview(form.message.as_deref().unwrap_or_default(), 50),
        history_len = form.history.len(),
        has_image = form.image.is_some(),
        "received image chat request"
    );

    let result = state
        .relay
        .converse(form.message.as_deref(), &form.history, form.image.as_ref())
        .await
        .map_err(|e| relay_failure(&state, e))?;
    Ok(Json(result))
}

async fn read_image_form(
    multipart: &mut Multipart,
    policy: &UploadPolicy,
) -> AppResult<ImageChatForm> {
    let mut form = ImageChatForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "message" => {
                let text = field.text().await?;
                form.message = Some(text).filter(|m| !m.is_empty());
            }
            "conversationHistory" => {
                form.history = decode_history(&field.text().await?);
            }
            // Browsers send an empty, unnamed file part when nothing was picked.
            "image" if field.file_name() == Some("") => {
                debug!("skipping empty image field");
            }
            "image" => {
                form.image = Some(read_image(field, policy).await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Stream an image field, rejecting it as soon as it exceeds the size limit.
async fn read_image(mut field: Field<'_>, policy: &UploadPolicy) -> AppResult<ImageAttachment> {
    let mime_type = policy.check_mime(field.content_type())?;
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        policy.check_size(data.len() + chunk.len())?;
        data.extend_from_slice(&chunk);
    }
    Ok(ImageAttachment { mime_type, data })
}
