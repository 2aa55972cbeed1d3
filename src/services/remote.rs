use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::TranslateError;
use crate::model::language::Language;

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Something that can translate a phrase online.
pub trait RemoteTranslator {
    fn translate(&self, text: &str, source: Language, target: Language) -> Result<String, TranslateError>;
}

/// Client for the public `translate_a/single` endpoint. Stateless apart from the HTTP pool.
pub struct GoogleTranslate {
    client: Client,
    endpoint: String,
}

impl GoogleTranslate {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TranslateError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl RemoteTranslator for GoogleTranslate {
    fn translate(&self, text: &str, source: Language, target: Language) -> Result<String, TranslateError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source.code()),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let body: Value = resp.json()?;
        extract_translation(&body)
    }
}

/// The translated text sits at `[0][0][0]`; anything else is a bad response.
pub fn extract_translation(body: &Value) -> Result<String, TranslateError> {
    let text = body
        .get(0)
        .and_then(|v| v.get(0))
        .and_then(|v| v.get(0))
        .ok_or(TranslateError::Shape("missing [0][0][0]"))?
        .as_str()
        .ok_or(TranslateError::Shape("[0][0][0] is not a string"))?;

    if text.is_empty() {
        return Err(TranslateError::Shape("empty translation"));
    }

    Ok(text.to_string())
}
