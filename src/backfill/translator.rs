// SPDX-License-Identifier: PMPL-1.0-or-later

//! Batch machine-translation seam
//!
//! The driver only needs `texts × language → texts`. [`DeepLTranslator`] is
//! the HTTP implementation used by the CLI; tests plug in their own.

use crate::config::{ConfigError, TranslateSettings};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation request failed ({status}): {body}")]
    Http { status: u16, body: String },
    #[error("translation request could not be sent: {0}")]
    Transport(String),
    #[error("unexpected translation response shape: {0}")]
    MalformedResponse(String),
}

/// Translates a batch, returning exactly one string per input, in order.
pub trait Translator {
    fn translate_batch(&self, texts: &[String], target_lang: &str)
        -> Result<Vec<String>, TranslateError>;
}

/// DeepL-compatible `/v2/translate` client
pub struct DeepLTranslator {
    agent: ureq::Agent,
    endpoint: String,
    auth_key: String,
}

impl DeepLTranslator {
    pub fn new(endpoint: impl Into<String>, auth_key: impl Into<String>, agent: ureq::Agent) -> Self {
        Self {
            agent,
            endpoint: endpoint.into(),
            auth_key: auth_key.into(),
        }
    }

    /// Fails when no credential is configured.
    pub fn from_settings(settings: &TranslateSettings) -> Result<Self, ConfigError> {
        let auth_key = settings.credential()?;
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(&settings.endpoint, auth_key, builder.build()))
    }
}

impl Translator for DeepLTranslator {
    fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
    ) -> Result<Vec<String>, TranslateError> {
        let mut form: Vec<(&str, &str)> = texts.iter().map(|t| ("text", t.as_str())).collect();
        form.push(("target_lang", target_lang));

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("DeepL-Auth-Key {}", self.auth_key))
            .send_form(&form);

        match response {
            Ok(response) => {
                let body: Value = response
                    .into_json()
                    .map_err(|e| TranslateError::MalformedResponse(e.to_string()))?;
                parse_translations(&body)
            }
            Err(ureq::Error::Status(status, response)) => Err(TranslateError::Http {
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(transport)) => {
                Err(TranslateError::Transport(transport.to_string()))
            }
        }
    }
}

/// Reads `translations[].text` from a service response body.
pub fn parse_translations(body: &Value) -> Result<Vec<String>, TranslateError> {
    let items = body
        .get("translations")
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::MalformedResponse("missing translations array".into()))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.get("text")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    TranslateError::MalformedResponse(format!("translation {} has no text", i))
                })
        })
        .collect()
}
