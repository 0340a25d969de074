use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    pub prompt: String,
}

/// Every reply, including error replies, is a `{ "text": ... }` body; the
/// front end renders whatever arrives in `text`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub text: String,
}
