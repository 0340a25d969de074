use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::{
    answer::{
        dtos::{AnswerRequest, AnswerResponse},
        prompt::{build_structured_prompt, format_reply},
    },
    app_state::AppState,
    completion::{ChatMessage, ChatRequest},
    fetcher::collect_reference_text,
};

const FALLBACK_REPLY: &str = "Sorry, there was a problem!";

/// POST /v1/answer: scrape the configured reference sites, wrap the user's
/// question in the structured prompt and relay the model's first completion.
pub async fn generate_answer(
    State(state): State<AppState>,
    Json(payload): Json<AnswerRequest>,
) -> Response {
    if payload.prompt.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AnswerResponse {
                text: "Please send your prompt".to_string(),
            }),
        )
            .into_response();
    }

    info!(chars = payload.prompt.chars().count(), "received prompt");

    let reference_text = collect_reference_text(&state.fetcher, &state.sources).await;
    let structured_prompt = build_structured_prompt(&reference_text, &payload.prompt);

    let request = ChatRequest::new(
        state.model.clone(),
        vec![ChatMessage::user(structured_prompt)],
    );

    match state.completions.complete(&request).await {
        Ok(response) => {
            let raw = response.first_text().unwrap_or(FALLBACK_REPLY);
            (
                StatusCode::OK,
                Json(AnswerResponse {
                    text: format_reply(raw),
                }),
            )
                .into_response()
        }
        Err(err) => {
            error!(error = %err, "completion request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AnswerResponse {
                    text: format!("Sorry, there was a problem fetching the response. Error: {err}"),
                }),
            )
                .into_response()
        }
    }
}
