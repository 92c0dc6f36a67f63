use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::backend::{DetectedLanguage, TranslationBackend};

const API_KEY_HEADER: &str = "X-Goog-Api-Key";

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    q: &'a str,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    // "text" keeps the service from HTML-escaping the translation
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct DetectData {
    detections: Vec<Vec<DetectionEntry>>,
}

#[derive(Debug, Deserialize)]
struct DetectionEntry {
    language: String,
    #[serde(default)]
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<TranslationEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationEntry {
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the Google Cloud Translation v2 REST API.
pub struct GoogleTranslateClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleTranslateClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        tracing::debug!(url, "calling translation service");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to connect to translation service: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map_or(body, |e| e.error.message);
            bail!("Translation service request failed with status {status}: {message}");
        }

        let parsed: ApiResponse<T> = response
            .json()
            .await
            .context("Failed to parse translation service response")?;

        Ok(parsed.data)
    }
}

impl TranslationBackend for GoogleTranslateClient {
    async fn detect(&self, text: &str) -> Result<DetectedLanguage> {
        let url = format!("{}/detect", self.endpoint);
        let data: DetectData = self.post(&url, &DetectRequest { q: text }).await?;

        let entry = data
            .detections
            .into_iter()
            .next()
            .and_then(|candidates| candidates.into_iter().next())
            .context("Translation service returned no detection")?;

        Ok(DetectedLanguage {
            language: entry.language,
            confidence: entry.confidence,
        })
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let request = TranslateRequest {
            q: text,
            target,
            format: "text",
        };
        let data: TranslateData = self.post(&self.endpoint, &request).await?;

        data.translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .context("Translation service returned no translation")
    }
}
