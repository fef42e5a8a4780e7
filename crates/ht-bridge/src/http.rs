//! Remote classifier speaking the text-classification inference protocol.
//!
//! Request: `POST {"inputs": [...], "parameters": {"top_k": null}}`.
//! Response: one `[{label, score}, ...]` list per input, in input order.

use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use ht_core::{ClassifierError, ClassifierResult, LabelScore};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::{BridgeError, Result};
use crate::settings::ClassifierSettings;

const PING_SENTENCE: &str = "The lamp was lit.";

#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<Vec<LabelScore>>),
    /// Some servers unwrap the outer list for a single input.
    Single(Vec<LabelScore>),
}

#[derive(Clone, Debug)]
pub struct HttpClassifier {
    client: Client,
    endpoint: String,
    token: Option<String>,
    batch_size: usize,
    concurrency: usize,
}

impl HttpClassifier {
    pub fn new(settings: &ClassifierSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            token: settings.token.clone(),
            batch_size: settings.batch_size.max(1),
            concurrency: settings.concurrency.max(1),
        })
    }

    /// Build the client and check the endpoint answers.
    pub async fn connect(settings: &ClassifierSettings) -> Result<Self> {
        let classifier = Self::new(settings)?;
        classifier.ping().await?;
        Ok(classifier)
    }

    /// One single-sentence round trip.
    pub async fn ping(&self) -> Result<()> {
        match self.request(&[PING_SENTENCE.to_string()]).await {
            Ok(_) => {
                tracing::debug!(endpoint = %self.endpoint, "classifier answered");
                Ok(())
            }
            Err(e) => Err(BridgeError::ClassifierUnavailable(format!(
                "{}: {e}",
                self.endpoint
            ))),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Classify every sentence. Results line up with `sentences`.
    ///
    /// Sentences go out in chunks of `batch_size` with up to `concurrency`
    /// requests in flight. A chunk that fails is retried one sentence at a
    /// time so a single bad input only costs its own result.
    pub async fn classify_all(&self, sentences: &[String]) -> Vec<ClassifierResult> {
        tracing::debug!(
            sentences = sentences.len(),
            batch_size = self.batch_size,
            "classifying"
        );
        let chunks: Vec<Vec<ClassifierResult>> = stream::iter(sentences.chunks(self.batch_size))
            .map(|chunk| self.classify_chunk(chunk))
            .buffered(self.concurrency)
            .collect()
            .await;
        chunks.into_iter().flatten().collect()
    }

    async fn classify_chunk(&self, chunk: &[String]) -> Vec<ClassifierResult> {
        match self.request(chunk).await {
            Ok(rows) if rows.len() == chunk.len() => rows.into_iter().map(Ok).collect(),
            Ok(rows) if chunk.len() == 1 => vec![Err(ClassifierError::Inference(format!(
                "expected 1 result, got {}",
                rows.len()
            )))],
            Err(e) if chunk.len() == 1 => vec![Err(e)],
            outcome => {
                let reason = match outcome {
                    Ok(rows) => format!("expected {} results, got {}", chunk.len(), rows.len()),
                    Err(e) => e.to_string(),
                };
                tracing::warn!(size = chunk.len(), "batch failed, retrying per sentence: {reason}");
                let mut results = Vec::with_capacity(chunk.len());
                for sentence in chunk {
                    results.push(self.classify_one(sentence).await);
                }
                results
            }
        }
    }

    async fn classify_one(&self, sentence: &str) -> ClassifierResult {
        let mut rows = self.request(&[sentence.to_string()]).await?;
        match (rows.pop(), rows.is_empty()) {
            (Some(row), true) => Ok(row),
            _ => Err(ClassifierError::Inference("expected exactly one result".into())),
        }
    }

    async fn request(
        &self,
        inputs: &[String],
    ) -> std::result::Result<Vec<Vec<LabelScore>>, ClassifierError> {
        let body = json!({
            "inputs": inputs,
            "parameters": { "top_k": null },
        });
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::Unavailable(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Inference(format!(
                "HTTP {status}: {}",
                detail.trim()
            )));
        }

        match response
            .json::<InferenceResponse>()
            .await
            .map_err(|e| ClassifierError::Inference(format!("malformed response: {e}")))?
        {
            InferenceResponse::Batch(rows) => Ok(rows),
            InferenceResponse::Single(row) => Ok(vec![row]),
        }
    }
}
