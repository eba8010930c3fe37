//! Minimal chat client for the Jarvis assistant.
//!
//! Talks to a local or mock language-model backend through an
//! OpenAI-compatible chat.completions endpoint. We only request plain text.
//! Calls are instrumented and log model names, latencies, and response sizes
//! (not contents). Assistant calls are made from hint/chat endpoints only —
//! never from inside `process_user_action`.
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::Prompts;
use crate::util::fill_template;

#[derive(Clone)]
pub struct Assistant {
  pub client: reqwest::Client,
  /// Optional: local backends usually need no key.
  pub api_key: Option<String>,
  pub base_url: String,
  pub model: String,
}

#[derive(Serialize)]
struct ChatMessageReq {
  role: String,
  content: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ChatMessageRes {
  content: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoice {
  message: ChatMessageRes,
}

#[derive(Deserialize)]
struct ChatUsage {
  prompt_tokens: Option<u64>,
  completion_tokens: Option<u64>,
  total_tokens: Option<u64>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  usage: Option<ChatUsage>,
}

fn extract_backend_error(body: &str) -> Option<String> {
  let v: serde_json::Value = serde_json::from_str(body).ok()?;
  v.get("error")?.get("message")?.as_str().map(|s| s.to_string())
}

impl Assistant {
  /// Construct the client if ASSISTANT_BASE_URL is set; otherwise return None
  /// and every feature falls back to its deterministic local path.
  pub fn from_env() -> Option<Self> {
    let base_url = std::env::var("ASSISTANT_BASE_URL").ok()?;
    let api_key = std::env::var("ASSISTANT_API_KEY").ok();
    let model = std::env::var("ASSISTANT_MODEL").unwrap_or_else(|_| "local-chat".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model })
  }

  /// Plain-text chat completion. Used for hints, Jarvis replies, and snippet
  /// explanations.
  #[instrument(level = "info", skip(self, system, user), fields(model = %self.model))]
  async fn chat_plain(&self, system: &str, user: &str, temperature: f32) -> Result<String, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      max_tokens: None,
    };

    let mut builder = self
      .client
      .post(&url)
      .header(USER_AGENT, "windowlab-backend/0.1")
      .header(CONTENT_TYPE, "application/json");
    if let Some(key) = &self.api_key {
      builder = builder.header(AUTHORIZATION, format!("Bearer {}", key));
    }

    let start = std::time::Instant::now();
    let res = builder.json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_backend_error(&body).unwrap_or(body);
      return Err(format!("Assistant HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, elapsed = ?start.elapsed(), "Assistant usage");
    }
    let text = body
      .choices
      .first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default()
      .trim()
      .to_string();

    Ok(text)
  }

  // --- High-level helpers (domain-specialized) ---

  /// A nudge for the current step that must not reveal the expected click.
  #[instrument(level = "info", skip(self, prompts, title, description, code_hint), fields(title_len = title.len()))]
  pub async fn step_hint(
    &self,
    prompts: &Prompts,
    title: &str,
    description: &str,
    code_hint: &str,
  ) -> Result<String, String> {
    let user = fill_template(
      &prompts.hint_user_template,
      &[("title", title), ("description", description), ("code_hint", code_hint)],
    );
    self.chat_plain(&prompts.hint_system, &user, 0.6).await
  }

  /// Free-form Jarvis reply about the current walkthrough.
  #[instrument(level = "info", skip(self, prompts, context, question), fields(question_len = question.len(), has_context = !context.is_empty()))]
  pub async fn jarvis_reply(
    &self,
    prompts: &Prompts,
    context: &str,
    question: &str,
  ) -> Result<String, String> {
    let user = fill_template(
      &prompts.jarvis_user_template,
      &[("context", context), ("question", question)],
    );
    self.chat_plain(&prompts.jarvis_system, &user, 0.7).await
  }

  /// Beginner-level explanation of the current step's code snippet.
  #[instrument(level = "info", skip(self, prompts, snippet, description), fields(snippet_len = snippet.len()))]
  pub async fn explain_snippet(
    &self,
    prompts: &Prompts,
    snippet: &str,
    description: &str,
  ) -> Result<String, String> {
    let user = fill_template(
      &prompts.explain_user_template,
      &[("snippet", snippet), ("description", description)],
    );
    self.chat_plain(&prompts.explain_system, &user, 0.3).await
  }
}
