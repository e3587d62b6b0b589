//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! One request, one JSON document back. The model is instructed to emit
//! bare JSON but routinely wraps it in a fenced code block, so the fence
//! is stripped before parsing. Anything unexpected becomes a
//! [`SafetyError`], which callers treat as "assessment unavailable".

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;

use crate::error::SafetyError;
use crate::prompt::{build_prompt, SafetyContext};
use crate::types::BrandSafetyReport;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Response shape of `generateContent`, reduced to the candidate text.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Client for the generative narrative call.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    model: String,
}

impl GeminiClient {
    /// Creates a new client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`SafetyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, SafetyError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SafetyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SafetyError::Api`] if `base_url` is
    /// not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SafetyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("adquote/0.1 (influencer-valuation)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| SafetyError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            model: DEFAULT_MODEL.to_owned(),
        })
    }

    /// Generate the brand-safety assessment for a channel.
    ///
    /// # Errors
    ///
    /// - [`SafetyError::Http`] on network failure or non-2xx status.
    /// - [`SafetyError::Api`] if the API returns an error payload.
    /// - [`SafetyError::EmptyResponse`] if no candidate text came back.
    /// - [`SafetyError::Parse`] if the candidate text is not the report.
    /// - [`SafetyError::Reported`] if the model emitted `{"error": …}`.
    pub async fn generate_assessment(
        &self,
        context: &SafetyContext<'_>,
    ) -> Result<BrandSafetyReport, SafetyError> {
        let prompt = build_prompt(context);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        tracing::debug!(
            model = %self.model,
            channel = %context.channel_title,
            "requesting brand-safety assessment"
        );

        let url = self.build_url();
        let response = self.client.post(url).json(&body).send().await?;
        let response = response.error_for_status()?;
        let payload: serde_json::Value = response.json().await?;

        if let Some(error) = payload.get("error") {
            let msg = error
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(SafetyError::Api(msg));
        }

        let parsed: GenerateContentResponse =
            serde_json::from_value(payload).map_err(SafetyError::Parse)?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .filter(|t| !t.trim().is_empty())
            .ok_or(SafetyError::EmptyResponse)?;

        let report = Self::parse_report(text)?;
        tracing::debug!(
            overall_score = report.overall_score,
            risk_level = %report.risk_assessment.level,
            "parsed brand-safety assessment"
        );
        Ok(report)
    }

    /// Parse candidate text into a report, stripping any code fence and
    /// surfacing an explicit `{"error": …}` document as a failure.
    fn parse_report(text: &str) -> Result<BrandSafetyReport, SafetyError> {
        let stripped = strip_code_fences(text);

        let value: serde_json::Value =
            serde_json::from_str(stripped).map_err(SafetyError::Parse)?;
        if let Some(error) = value.get("error") {
            let msg = error.as_str().map_or_else(|| error.to_string(), String::from);
            return Err(SafetyError::Reported(msg));
        }

        serde_json::from_value(value).map_err(SafetyError::Parse)
    }

    fn build_url(&self) -> Url {
        let mut url = self.base_url.clone();
        {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.push("models");
                segments.push(&format!("{}:generateContent", self.model));
            }
        }
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }
}

/// Strip a surrounding Markdown code fence (```` ```json ```` or plain
/// ```` ``` ````) from the model output.
fn strip_code_fences(text: &str) -> &str {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix("```") {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn report_json() -> String {
        let category = r#"{"score": 90, "issues": []}"#;
        format!(
            r#"{{
                "content_safety": {category},
                "legal_ethics": {category},
                "reputation": {category},
                "community": {category},
                "brand_fit": {category},
                "additional_checks": {category},
                "overall_score": 89,
                "risk_assessment": {{"level": "low", "red_flags": [], "concerns": []}},
                "recommendation": {{"action": "proceed", "reason": "safe channel"}}
            }}"#
        )
    }

    fn candidate_response(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })
    }

    fn context() -> SafetyContext<'static> {
        SafetyContext {
            channel_title: "Test Channel",
            subscriber_count: 50_000,
            avg_views: 8_000,
            engagement_rate: 5.5,
            final_cost: 2_244_000,
            videos: &[],
        }
    }

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::with_base_url("test-key", 15, &server.uri())
            .expect("client construction should not fail")
    }

    #[test]
    fn strip_code_fences_handles_all_wrappings() {
        assert_eq!(strip_code_fences(r#"{"a": 1}"#), r#"{"a": 1}"#);
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  ```json\n{}\n```  "), "{}");
    }

    #[test]
    fn parse_report_accepts_fenced_output() {
        let fenced = format!("```json\n{}\n```", report_json());
        let report = GeminiClient::parse_report(&fenced).unwrap();
        assert_eq!(report.overall_score, 89);
    }

    #[test]
    fn parse_report_rejects_prose() {
        let result = GeminiClient::parse_report("I cannot assess this channel.");
        assert!(
            matches!(result, Err(SafetyError::Parse(_))),
            "expected Parse error, got {result:?}"
        );
    }

    #[test]
    fn parse_report_surfaces_model_reported_errors() {
        let result = GeminiClient::parse_report(r#"{"error": "content policy refusal"}"#);
        assert!(
            matches!(result, Err(SafetyError::Reported(ref m)) if m == "content policy refusal"),
            "expected Reported, got {result:?}"
        );
    }

    #[tokio::test]
    async fn generate_assessment_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .and(query_param("key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(candidate_response(&format!("```json\n{}\n```", report_json()))),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let report = client.generate_assessment(&context()).await.unwrap();
        assert_eq!(report.overall_score, 89);
        assert_eq!(report.recommendation.action, "proceed");
    }

    #[tokio::test]
    async fn api_error_payload_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": { "code": 429, "message": "rate limited" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.generate_assessment(&context()).await;
        assert!(
            matches!(result, Err(SafetyError::Api(ref m)) if m == "rate limited"),
            "expected Api, got {result:?}"
        );
    }

    #[tokio::test]
    async fn empty_candidates_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.generate_assessment(&context()).await;
        assert!(
            matches!(result, Err(SafetyError::EmptyResponse)),
            "expected EmptyResponse, got {result:?}"
        );
    }

    #[tokio::test]
    async fn malformed_candidate_text_is_a_parse_error_not_a_panic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(candidate_response("Sure! Here is my analysis: the channel")),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.generate_assessment(&context()).await;
        assert!(
            matches!(result, Err(SafetyError::Parse(_))),
            "expected Parse, got {result:?}"
        );
    }

    #[tokio::test]
    async fn http_failure_is_advisory_not_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.generate_assessment(&context()).await;
        assert!(
            matches!(result, Err(SafetyError::Http(_))),
            "expected Http, got {result:?}"
        );
    }
}
