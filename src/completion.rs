/// Chat-completion client that turns one sentence into one flashcard

use crate::config::{COMPLETION_MODEL, COMPLETIONS_URL, SYSTEM_PROMPT};
use crate::error::{ClipperError, Result};
use crate::flashcard::Flashcard;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Anything that can produce a flashcard from a sentence
#[allow(async_fn_in_trait)]
pub trait CompletionApi {
    async fn flashcard_for(&self, sentence: &str) -> Result<Flashcard>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionAnswer {
    question: Option<String>,
    answer: Option<String>,
}

fn build_request(sentence: &str) -> ChatRequest<'_> {
    ChatRequest {
        model: COMPLETION_MODEL,
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT,
            },
            ChatMessage {
                role: "user",
                content: sentence,
            },
        ],
    }
}

/// Parse a chat-completion body into a flashcard
///
/// The first choice's message content must itself be a JSON object with
/// non-empty `question` and `answer` strings.
pub fn parse_completion(body: &str) -> Result<Flashcard> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ClipperError::UpstreamApi(format!("malformed response body: {}", e)))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| {
            ClipperError::UpstreamApi("Invalid response format from OpenAI API".to_string())
        })?;

    let pair: QuestionAnswer = serde_json::from_str(&content)
        .map_err(|e| ClipperError::UpstreamApi(format!("unparsable flashcard payload: {}", e)))?;

    match (pair.question, pair.answer) {
        (Some(q), Some(a)) if !q.trim().is_empty() && !a.trim().is_empty() => {
            Ok(Flashcard::new(q, a))
        }
        _ => Err(ClipperError::UpstreamApi(
            "Invalid flashcard format returned from API".to_string(),
        )),
    }
}

/// OpenAI chat-completions over HTTPS with a bearer token
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        OpenAiClient {
            http: Client::new(),
            api_key,
            endpoint: COMPLETIONS_URL.to_string(),
        }
    }
}

impl CompletionApi for OpenAiClient {
    async fn flashcard_for(&self, sentence: &str) -> Result<Flashcard> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&build_request(sentence))
            .send()
            .await
            .map_err(|e| ClipperError::UpstreamApi(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClipperError::UpstreamApi(status.as_u16().to_string()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClipperError::UpstreamApi(e.to_string()))?;

        let card = parse_completion(&body)?;
        log::debug!("Generated flashcard for sentence of {} chars", sentence.chars().count());
        Ok(card)
    }
}
