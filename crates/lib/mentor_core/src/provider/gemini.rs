//! Google Gemini completion provider.
//!
//! Calls `POST {base}/v1beta/models/{model}:generateContent` with the API key
//! in the `x-goog-api-key` header. One attempt per call; no retry.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{CompletionError, CompletionRequest, CompletionService, Part};
use crate::config::GeminiConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: &'a [Part],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    status: Option<String>,
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

/// HTTP client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Build a client for the configured model. Does not contact the service.
    pub fn new(config: &GeminiConfig) -> Result<Self, CompletionError> {
        let raw = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );
        let endpoint = Url::parse(&raw)
            .map_err(|e| CompletionError::InvalidEndpoint(format!("{raw}: {e}")))?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;

        let resp = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateContentRequest {
                contents: [Content {
                    role: "user",
                    parts: &request.parts,
                }],
            })
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(api_error(status.as_u16(), &body));
        }

        let data: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))?;

        extract_text(data)
    }
}

/// Turn a non-2xx response into an error that keeps the provider's wording.
fn api_error(status: u16, body: &str) -> CompletionError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let mut reasons: Vec<String> = envelope.error.status.into_iter().collect();
            reasons.extend(
                envelope
                    .error
                    .details
                    .iter()
                    .filter_map(|d| d.get("reason").and_then(|r| r.as_str()))
                    .map(str::to_string),
            );
            CompletionError::Api {
                status,
                message: envelope.error.message,
                reasons,
            }
        }
        Err(_) => CompletionError::Api {
            status,
            message: body.trim().to_string(),
            reasons: Vec::new(),
        },
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(data: GenerateContentResponse) -> Result<String, CompletionError> {
    let block_reason = data.prompt_feedback.and_then(|f| f.block_reason);
    let Some(candidate) = data.candidates.into_iter().next() else {
        return Err(CompletionError::EmptyResponse(block_reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        debug!(finish_reason = ?candidate.finish_reason, "candidate had no text");
        return Err(CompletionError::EmptyResponse(
            block_reason.or(candidate.finish_reason),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Json;
    use axum::Router;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use serde_json::{Value, json};

    use super::*;
    use crate::models::ImageAttachment;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{addr}")
    }

    fn config(base_url: String, api_key: Option<&str>) -> GeminiConfig {
        GeminiConfig {
            api_key: api_key.map(str::to_string),
            model: "test-model".to_string(),
            base_url,
            request_timeout: Duration::from_secs(5),
        }
    }

    fn canned(status: StatusCode, body: Value) -> Router {
        Router::new().route(
            "/v1beta/models/{call}",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        )
    }

    #[test]
    fn endpoint_includes_model_and_method() {
        let client = GeminiClient::new(&config("https://example.com/".into(), Some("k")))
            .expect("client");
        assert_eq!(
            client.endpoint().as_str(),
            "https://example.com/v1beta/models/test-model:generateContent"
        );
    }

    #[test]
    fn invalid_base_url_rejected() {
        let err = GeminiClient::new(&config("not a url".into(), Some("k"))).unwrap_err();
        assert!(matches!(err, CompletionError::InvalidEndpoint(_)));
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = GeminiClient::new(&config("http://127.0.0.1:9".into(), None)).expect("client");
        assert!(!client.is_configured());
        let err = client
            .complete(&CompletionRequest::text("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::MissingApiKey));
        assert!(err.to_string().contains("API_KEY"));
    }

    #[tokio::test]
    async fn sends_key_and_parts_and_joins_text() {
        let app = Router::new().route(
            "/v1beta/models/{call}",
            post(
                |Path(call): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    assert_eq!(call, "test-model:generateContent");
                    assert_eq!(
                        headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()),
                        Some("secret")
                    );
                    let parts = &body["contents"][0]["parts"];
                    assert_eq!(body["contents"][0]["role"], "user");
                    assert_eq!(parts[0]["text"], "describe this");
                    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
                    assert_eq!(parts[1]["inlineData"]["data"], "AQID");
                    Json(json!({
                        "candidates": [{
                            "content": { "parts": [{ "text": "Hello" }, { "text": " world" }] },
                            "finishReason": "STOP"
                        }]
                    }))
                },
            ),
        );
        let base = spawn(app).await;
        let client = GeminiClient::new(&config(base, Some("secret"))).expect("client");

        let attachment = ImageAttachment {
            mime_type: "image/png".to_string(),
            data: vec![1, 2, 3],
        };
        let text = client
            .complete(&CompletionRequest::with_image("describe this", &attachment))
            .await
            .expect("complete");
        assert_eq!(text, "Hello world");
    }

    #[tokio::test]
    async fn invalid_key_error_keeps_reason() {
        let base = spawn(canned(
            StatusCode::BAD_REQUEST,
            json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT",
                    "details": [{
                        "@type": "type.googleapis.com/google.rpc.ErrorInfo",
                        "reason": "API_KEY_INVALID"
                    }]
                }
            }),
        ))
        .await;
        let client = GeminiClient::new(&config(base, Some("bad"))).expect("client");

        let err = client
            .complete(&CompletionRequest::text("hi"))
            .await
            .unwrap_err();
        match &err {
            CompletionError::Api {
                status, reasons, ..
            } => {
                assert_eq!(*status, 400);
                assert_eq!(reasons, &vec!["INVALID_ARGUMENT".to_string(), "API_KEY_INVALID".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("API_KEY"));
    }

    #[tokio::test]
    async fn quota_error_keeps_message() {
        let base = spawn(canned(
            StatusCode::TOO_MANY_REQUESTS,
            json!({
                "error": {
                    "code": 429,
                    "message": "You exceeded your current quota, please check your plan and billing details.",
                    "status": "RESOURCE_EXHAUSTED"
                }
            }),
        ))
        .await;
        let client = GeminiClient::new(&config(base, Some("k"))).expect("client");

        let err = client
            .complete(&CompletionRequest::text("hi"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("quota"), "{err}");
        assert!(err.to_string().starts_with("[429]"));
    }

    #[tokio::test]
    async fn blocked_prompt_reports_reason() {
        let base = spawn(canned(
            StatusCode::OK,
            json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
        ))
        .await;
        let client = GeminiClient::new(&config(base, Some("k"))).expect("client");

        let err = client
            .complete(&CompletionRequest::text("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::EmptyResponse(Some(ref r)) if r == "SAFETY"));
    }

    #[test]
    fn non_json_error_body_is_kept_verbatim() {
        let err = api_error(503, "  upstream connect error  ");
        assert_eq!(err.to_string(), "[503] upstream connect error");
    }
}
