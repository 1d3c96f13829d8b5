use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use ap_core::{Error, Result, Summarizer};
use crate::Config;

pub const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/sshleifer/distilbart-cnn-12-6";

/// Input is cut to this many characters to stay inside the model's context.
pub const MAX_INPUT_CHARS: usize = 3500;
pub const MAX_LENGTH: u32 = 256;
pub const MIN_LENGTH: u32 = 60;

const WARM_UP_TEXT: &str = "The service started and checked that the summarization model \
    answers requests. The model produced a short summary of this text.";

#[derive(Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Deserialize)]
struct SummarizationOutput {
    summary_text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SummarizationResponse {
    Batch(Vec<SummarizationOutput>),
    Single(SummarizationOutput),
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Abstractive summarizer backed by a sequence-to-sequence model served
/// over HTTP (Hugging Face inference API shape). Decoding is greedy, so the
/// same input yields the same summary.
pub struct RemoteSummarizer {
    client: Arc<Client>,
    model_url: String,
    api_token: Option<String>,
    permits: Arc<Semaphore>,
}

impl fmt::Debug for RemoteSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSummarizer")
            .field("client", &"<reqwest::Client>")
            .field("model_url", &self.model_url)
            .field("api_token", &self.api_token.as_deref().map(|_| "<redacted>"))
            .field("permits", &self.permits.available_permits())
            .finish()
    }
}

impl RemoteSummarizer {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client: Arc::new(client),
            model_url: config
                .model_url
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL_URL.to_string()),
            api_token: config.api_token.clone(),
            permits: Arc::new(Semaphore::new(config.max_concurrent_inference.max(1))),
        })
    }

    pub fn model_url(&self) -> &str {
        &self.model_url
    }

    /// Send one short request so a missing or cold model fails at startup
    /// instead of on the first article.
    pub async fn warm_up(&self) -> Result<()> {
        let summary = self.generate(WARM_UP_TEXT).await.map_err(|e| {
            Error::Inference(format!(
                "Summarization model is not available at {}: {}",
                self.model_url, e
            ))
        })?;
        tracing::debug!("Warm-up summary: {}", summary);
        Ok(())
    }

    async fn generate(&self, input: &str) -> Result<String> {
        let request = SummarizationRequest {
            inputs: input,
            parameters: GenerationParameters {
                max_length: MAX_LENGTH,
                min_length: MIN_LENGTH,
                do_sample: false,
            },
        };

        // the model serves one inference at a time unless configured otherwise
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| Error::External(e.into()))?;

        let mut builder = self.client.post(&self.model_url).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!("HTTP {}: {}", status, body.trim())));
        }

        let output = match response.json::<SummarizationResponse>().await? {
            SummarizationResponse::Single(output) => output,
            SummarizationResponse::Batch(outputs) => outputs
                .into_iter()
                .next()
                .ok_or_else(|| Error::Inference("Model returned no summary".to_string()))?,
        };
        Ok(output.summary_text.trim().to_string())
    }
}

#[async_trait]
impl Summarizer for RemoteSummarizer {
    fn name(&self) -> &str {
        "Remote seq2seq"
    }

    async fn summarize(&self, text: &str, _max_sentences: usize) -> Result<String> {
        let input = truncate_chars(text, MAX_INPUT_CHARS);
        tracing::debug!("Summarizing {} characters with {}", input.chars().count(), self.model_url);
        self.generate(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use serde_json::Value;
    use tokio::net::TcpListener;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Stub {
        requests: Mutex<Vec<Value>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    async fn summarize_stub(
        State(stub): State<Arc<Stub>>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let now = stub.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        stub.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        let chars = body["inputs"].as_str().unwrap_or_default().chars().count();
        stub.requests.lock().await.push(body);
        stub.in_flight.fetch_sub(1, Ordering::SeqCst);
        Json(serde_json::json!([{ "summary_text": format!(" summary of {} chars ", chars) }]))
    }

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/models/test", addr)
    }

    async fn stub_summarizer(max_concurrent_inference: usize) -> (RemoteSummarizer, Arc<Stub>) {
        let stub = Arc::new(Stub::default());
        let app = Router::new()
            .route("/models/test", post(summarize_stub))
            .with_state(stub.clone());
        let config = Config {
            use_abstractive: true,
            model_url: Some(serve(app).await),
            max_concurrent_inference,
            ..Default::default()
        };
        (RemoteSummarizer::new(&config).unwrap(), stub)
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[tokio::test]
    async fn test_request_shape_and_truncation() {
        let (summarizer, stub) = stub_summarizer(1).await;
        let text = "word ".repeat(1000);
        let summary = summarizer.summarize(&text, 4).await.unwrap();
        assert_eq!(summary, "summary of 3500 chars");

        let requests = stub.requests.lock().await;
        let body = &requests[0];
        assert_eq!(body["parameters"]["max_length"], 256);
        assert_eq!(body["parameters"]["min_length"], 60);
        assert_eq!(body["parameters"]["do_sample"], false);
    }

    #[tokio::test]
    async fn test_inference_is_serialized() {
        let (summarizer, stub) = stub_summarizer(1).await;
        let summarizer = Arc::new(summarizer);
        let calls = (0..4).map(|_| {
            let summarizer = summarizer.clone();
            tokio::spawn(async move { summarizer.summarize("Some article text.", 4).await })
        });
        for call in calls.collect::<Vec<_>>() {
            call.await.unwrap().unwrap();
        }
        assert_eq!(stub.max_in_flight.load(Ordering::SeqCst), 1);
        assert_eq!(stub.requests.lock().await.len(), 4);
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let app = Router::new().route(
            "/models/test",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model loading") }),
        );
        let config = Config {
            model_url: Some(serve(app).await),
            ..Default::default()
        };
        let summarizer = RemoteSummarizer::new(&config).unwrap();

        let err = summarizer.summarize("text", 4).await.unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
        assert!(err.to_string().contains("503"));
        assert!(summarizer.warm_up().await.is_err());
    }

    #[tokio::test]
    async fn test_warm_up_succeeds_against_live_model() {
        let (summarizer, stub) = stub_summarizer(1).await;
        summarizer.warm_up().await.unwrap();
        assert_eq!(stub.requests.lock().await.len(), 1);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config {
            api_token: Some("hf_secret".to_string()),
            ..Default::default()
        };
        let summarizer = RemoteSummarizer::new(&config).unwrap();
        let debug = format!("{:?}", summarizer);
        assert!(!debug.contains("hf_secret"));
        assert!(debug.contains(DEFAULT_MODEL_URL));
    }
}
