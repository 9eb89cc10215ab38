//! OpenAI-compatible chat-completions judge client.
//!
//! Works against api.openai.com or any compatible endpoint via a custom base
//! URL, which covers most self-hosted judge deployments.

use super::JudgeClient;
use async_trait::async_trait;
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiJudge {
    /// Identity recorded in judge records; usually equals `model`.
    pub judge_name: String,
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    client: reqwest::Client,
}

impl OpenAiJudge {
    pub fn new(judge_name: String, model: String, api_key: String, base_url: String) -> Self {
        Self {
            judge_name,
            model,
            api_key,
            base_url,
            // Deterministic judging: temperature 0 plus a fixed seed below.
            temperature: 0.0,
            max_tokens: 2048,
            client: reqwest::Client::new(),
        }
    }

    /// Build from environment: `OPENAI_API_KEY` (required) and
    /// `OPENAI_BASE_URL` (optional, for compatible endpoints).
    pub fn from_env(judge_name: &str) -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("environment variable OPENAI_API_KEY is not set"))?;
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(
            judge_name.to_string(),
            judge_name.to_string(),
            api_key,
            base_url,
        ))
    }
}

#[async_trait]
impl JudgeClient for OpenAiJudge {
    async fn critique(&self, system_prompt: &str, prompt: &str) -> anyhow::Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": prompt },
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "seed": 42,
        });

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_else(|_| String::new());
            anyhow::bail!(
                "judge chat API error ({}, status {}): {}",
                self.judge_name,
                status,
                error_text
            );
        }

        let json: serde_json::Value = resp.json().await?;
        let text = json
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("judge API response missing content"))?
            .trim()
            .to_string();

        Ok(text)
    }

    fn name(&self) -> &str {
        &self.judge_name
    }
}
