use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;

use crate::core::config::Settings;
use crate::stores::models::Question;

const OPTIONS_PER_QUESTION: usize = 4;

const GENERATION_SYSTEM_PROMPT: &str = "You are a quiz author for a classroom. \
Produce multiple-choice questions as a STRICT JSON array and nothing else. \
Each element must be an object with exactly these keys: \
\"question\" (string), \"options\" (array of exactly 4 strings), \
\"answer\" (string, one of the options). \
Do not wrap the array in markdown fences or add commentary.";

#[derive(Debug, Error)]
pub(crate) enum GenerationError {
    #[error("prompt must not be empty")]
    EmptyPrompt,
}

/// Outcome of a generation request. `degraded` marks the placeholder fallback
/// so callers can distinguish low-quality output from a real provider answer.
#[derive(Debug, Clone)]
pub(crate) struct GeneratedQuiz {
    pub(crate) questions: Vec<Question>,
    pub(crate) degraded: bool,
    pub(crate) provider: Option<String>,
}

#[derive(Debug, Clone)]
struct ProviderConfig {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
}

/// Calls an external chat-completions endpoint to synthesize questions from a
/// teacher prompt. The chosen provider is tried first; on failure (transport,
/// HTTP error, or unparseable content) the other configured provider gets one
/// attempt, after which the result degrades to a single placeholder question.
#[derive(Debug, Clone)]
pub(crate) struct QuizGenerator {
    client: Client,
    primary: ProviderConfig,
    secondary: ProviderConfig,
    max_tokens: u32,
    temperature: f64,
    max_questions: u64,
}

impl QuizGenerator {
    pub(crate) fn from_settings(settings: &Settings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.ai().ai_request_timeout);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            primary: ProviderConfig {
                name: settings.ai().primary_provider.clone(),
                base_url: settings.ai().primary_base_url.trim_end_matches('/').to_string(),
                api_key: settings.ai().primary_api_key.clone(),
                model: settings.ai().primary_model.clone(),
            },
            secondary: ProviderConfig {
                name: settings.ai().secondary_provider.clone(),
                base_url: settings.ai().secondary_base_url.trim_end_matches('/').to_string(),
                api_key: settings.ai().secondary_api_key.clone(),
                model: settings.ai().secondary_model.clone(),
            },
            max_tokens: settings.ai().ai_max_tokens,
            temperature: settings.ai().ai_temperature,
            max_questions: settings.quiz().max_generated_questions,
        })
    }

    pub(crate) async fn generate(
        &self,
        prompt: &str,
        provider_choice: &str,
        num_questions: u64,
    ) -> Result<GeneratedQuiz, GenerationError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }

        let count = num_questions.clamp(1, self.max_questions);
        let (first, second) = self.provider_order(provider_choice);

        match self.request_questions(first, prompt, count).await {
            Ok(questions) => {
                return Ok(GeneratedQuiz {
                    questions,
                    degraded: false,
                    provider: Some(first.name.clone()),
                });
            }
            Err(err) => {
                tracing::warn!(
                    provider = %first.name,
                    error = %err,
                    "Primary generation provider failed, falling back"
                );
            }
        }

        match self.request_questions(second, prompt, count).await {
            Ok(questions) => Ok(GeneratedQuiz {
                questions,
                degraded: false,
                provider: Some(second.name.clone()),
            }),
            Err(err) => {
                tracing::warn!(
                    provider = %second.name,
                    error = %err,
                    "Secondary generation provider failed, degrading to placeholder"
                );
                Ok(GeneratedQuiz {
                    questions: vec![placeholder_question()],
                    degraded: true,
                    provider: None,
                })
            }
        }
    }

    fn provider_order(&self, choice: &str) -> (&ProviderConfig, &ProviderConfig) {
        if choice.trim().eq_ignore_ascii_case(&self.secondary.name) {
            (&self.secondary, &self.primary)
        } else {
            (&self.primary, &self.secondary)
        }
    }

    async fn request_questions(
        &self,
        provider: &ProviderConfig,
        prompt: &str,
        count: u64,
    ) -> Result<Vec<Question>> {
        if provider.base_url.is_empty() {
            anyhow::bail!("provider {} has no base url configured", provider.name);
        }

        let user_prompt = format!(
            "Write exactly {count} multiple-choice questions about the following topic.\n\
             Topic: {prompt}\n\
             Remember: respond with the JSON array only."
        );

        let payload = json!({
            "model": provider.model,
            "messages": [
                {"role": "system", "content": GENERATION_SYSTEM_PROMPT},
                {"role": "user", "content": user_prompt}
            ],
            "max_completion_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        tracing::info!(provider = %provider.name, count, "Sending quiz generation request");

        let url = format!("{}/chat/completions", provider.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&provider.api_key)
            .json(&payload)
            .send()
            .await
            .context("Failed to call generation provider")?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            anyhow::bail!("provider returned {status}: {body}");
        }

        let content = body
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|value| value.as_str())
            .context("Missing provider response content")?;

        let questions = parse_questions(content, count as usize)
            .context("Failed to parse provider content as questions")?;

        tracing::info!(
            provider = %provider.name,
            questions = questions.len(),
            "Quiz generation completed"
        );

        Ok(questions)
    }
}

/// Pulls the first JSON-array-shaped substring out of the raw reply (models
/// often wrap the array in prose or markdown fences), parses it, and
/// normalizes each question. An empty or unparseable array is an error so the
/// caller can fall back.
fn parse_questions(raw: &str, count: usize) -> Result<Vec<Question>> {
    let array = extract_json_array(raw).context("No JSON array in provider content")?;
    let parsed: Vec<Question> = serde_json::from_str(array)?;

    let mut questions: Vec<Question> = parsed
        .into_iter()
        .filter(|question| !question.question.trim().is_empty())
        .map(normalize_question)
        .collect();

    if questions.is_empty() {
        anyhow::bail!("provider content contained no usable questions");
    }

    questions.truncate(count);
    Ok(questions)
}

/// First balanced `[...]` substring, string-literal aware so brackets inside
/// question text do not end the scan early.
fn extract_json_array(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Exactly four options and no missing fields, whatever the model returned.
fn normalize_question(mut question: Question) -> Question {
    question.options.truncate(OPTIONS_PER_QUESTION);
    while question.options.len() < OPTIONS_PER_QUESTION {
        question.options.push(String::new());
    }
    if question.answer.is_empty() {
        question.answer = question.options[0].clone();
    }
    question
}

fn placeholder_question() -> Question {
    Question {
        question: "Quiz generation is unavailable right now. Which option should you pick?"
            .to_string(),
        options: vec![
            "Try again later".to_string(),
            "Option B".to_string(),
            "Option C".to_string(),
            "Option D".to_string(),
        ],
        answer: "Try again later".to_string(),
    }
}
