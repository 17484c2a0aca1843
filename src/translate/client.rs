//! HTTP client for the external text-translation endpoint.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::TextTranslator;
use crate::error::TranslateError;

/// Request body accepted by the endpoint.
#[derive(Serialize)]
struct TranslationRequest<'a> {
    /// Text to translate.
    text: &'a str,
}

/// What: Pull the translated text out of any accepted response shape.
///
/// Inputs:
/// - `body`: Decoded JSON response
///
/// Output:
/// - `Some(text)` from `translations[0]`, `translation`, `translated_text`
///   or `result` (first non-empty string in that order), otherwise `None`.
#[must_use]
pub fn extract_translation(body: &Value) -> Option<&str> {
    let first = body
        .get("translations")
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .and_then(Value::as_str);
    if let Some(text) = first {
        return Some(text);
    }
    ["translation", "translated_text", "result"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// Translator backed by the HTTP endpoint.
#[derive(Clone, Debug)]
pub struct HttpTranslator {
    /// Shared client carrying the per-call timeout.
    client: reqwest::Client,
    /// Endpoint URL.
    endpoint: String,
}

impl HttpTranslator {
    /// What: Build a translator for `endpoint` with a per-call timeout.
    ///
    /// Inputs:
    /// - `endpoint`: Translation endpoint URL
    /// - `timeout`: Deadline for each call
    ///
    /// Output:
    /// - Ready translator.
    ///
    /// # Errors
    /// - Returns `TranslateError::Http` when the client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("content-pipeline/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TranslateError::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint this translator posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// What: Send one request and decode the answer.
    ///
    /// Inputs:
    /// - `text`: Text to translate
    ///
    /// Output:
    /// - Trimmed translated text (may be empty).
    ///
    /// # Errors
    /// - `Timeout` when the deadline passes, `Http` on transport or decode
    ///   failures, `Status` on a non-success status, `Rejected` when the body
    ///   has no recognizable translation field.
    pub async fn request(&self, text: &str) -> Result<String, TranslateError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&TranslationRequest { text })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslateError::Timeout
                } else {
                    TranslateError::Http(e.to_string())
                }
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }
        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Http(format!("failed to decode response: {e}")))?;
        extract_translation(&body)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| TranslateError::Rejected("no translation field in response".into()))
    }
}

impl TextTranslator for HttpTranslator {
    /// Best effort: any failure or empty answer yields the original text.
    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        _target_lang: &str,
    ) -> Result<String, TranslateError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        tracing::debug!(chars = text.chars().count(), "translating text");
        match self.request(text).await {
            Ok(translated) if !translated.is_empty() => Ok(translated),
            Ok(_) => {
                tracing::warn!(text = %preview(text), "translation resulted in empty string");
                Ok(text.to_string())
            }
            Err(e) => {
                tracing::warn!(text = %preview(text), error = %e, "translation failed, keeping original");
                Ok(text.to_string())
            }
        }
    }
}

/// First 50 characters of `text` for log lines.
fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}
