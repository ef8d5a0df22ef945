//! Assistant inference proxy
//!
//! Forwards chat text to the hosted text-generation endpoint, switching
//! between two parameter presets. An unrecognized preset name silently
//! falls back to the default. Generation failures are caught per preset
//! and replaced with a fixed localized apology string rather than
//! propagated.

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument};

use crate::dto::AssistantChatResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Generation parameters for one preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationPreset {
    pub tag: &'static str,
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub repetition_penalty: Option<f64>,
}

/// V1 (CM-1000): the full conversational preset
const PRESET_V1: GenerationPreset = GenerationPreset {
    tag: "V1",
    max_new_tokens: 100,
    temperature: 0.8,
    top_p: 0.9,
    repetition_penalty: Some(1.2),
};

/// V1c (CM-600): the lightweight preset with shorter replies
const PRESET_V1C: GenerationPreset = GenerationPreset {
    tag: "V1c",
    max_new_tokens: 50,
    temperature: 0.7,
    top_p: 0.85,
    repetition_penalty: None,
};

/// Select the preset for a requested model name; anything unrecognized
/// (including absence) falls back to V1.
fn preset_for(model: Option<&str>) -> GenerationPreset {
    match model {
        Some("V1c") => PRESET_V1C,
        _ => PRESET_V1,
    }
}

/// One generated candidate in the inference backend's response
#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Assistant service
pub struct AssistantService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AssistantService<'a> {
    /// Create a new AssistantService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Generate a reply for the chat message using the requested preset.
    ///
    /// The response's `model` field echoes the request value verbatim.
    #[instrument(skip(self, message))]
    pub async fn chat(
        &self,
        message: &str,
        model: Option<String>,
    ) -> ServiceResult<AssistantChatResponse> {
        info!(model = model.as_deref().unwrap_or("(default)"), "Assistant request");

        let preset = preset_for(model.as_deref());
        let response = self.generate_with_fallback(message, preset).await;

        Ok(AssistantChatResponse {
            response,
            model,
            timestamp: Utc::now().to_rfc3339(),
        })
    }

    /// Run one generation, substituting the preset's apology string on any
    /// backend failure.
    async fn generate_with_fallback(&self, message: &str, preset: GenerationPreset) -> String {
        match self.generate(message, preset).await {
            Ok(text) => text,
            Err(e) => {
                error!(preset = preset.tag, error = %e, "Generation failed");
                format!(
                    "すみません、応答の生成中にエラーが発生しました。({})",
                    preset.tag
                )
            }
        }
    }

    /// Call the hosted text-generation endpoint with the preset's
    /// parameters
    async fn generate(
        &self,
        message: &str,
        preset: GenerationPreset,
    ) -> Result<String, anyhow::Error> {
        let config = self.ctx.inference_config();

        let mut parameters = json!({
            "max_new_tokens": preset.max_new_tokens,
            "temperature": preset.temperature,
            "top_p": preset.top_p,
        });
        if let Some(penalty) = preset.repetition_penalty {
            parameters["repetition_penalty"] = json!(penalty);
        }

        let url = format!("{}/{}", config.base_url, config.model);
        let response = self
            .ctx
            .http_client()
            .post(&url)
            .bearer_auth(&config.api_key)
            .json(&json!({
                "inputs": message,
                "parameters": parameters,
            }))
            .send()
            .await?
            .error_for_status()?;

        let candidates: Vec<GeneratedText> = response.json().await?;
        let text = candidates
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .ok_or_else(|| anyhow::anyhow!("empty generation response"))?;

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_selection() {
        assert_eq!(preset_for(Some("V1")).tag, "V1");
        assert_eq!(preset_for(Some("V1c")).tag, "V1c");
    }

    #[test]
    fn test_missing_model_uses_default_preset() {
        // No model field behaves exactly like an explicit "V1"
        assert_eq!(preset_for(None), preset_for(Some("V1")));
    }

    #[test]
    fn test_unrecognized_model_falls_back_silently() {
        assert_eq!(preset_for(Some("V2")).tag, "V1");
        assert_eq!(preset_for(Some("")).tag, "V1");
    }

    #[test]
    fn test_preset_parameters() {
        let v1 = preset_for(Some("V1"));
        assert_eq!(v1.max_new_tokens, 100);
        assert_eq!(v1.repetition_penalty, Some(1.2));

        let v1c = preset_for(Some("V1c"));
        assert_eq!(v1c.max_new_tokens, 50);
        assert!(v1c.repetition_penalty.is_none());
    }

    #[test]
    fn test_generated_text_parsing() {
        let json = r#"[{"generated_text": "hello there  "}]"#;
        let parsed: Vec<GeneratedText> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed[0].generated_text, "hello there  ");
    }
}
