use thiserror::Error;

/// Errors from the narrative generator. All of these are advisory: the
/// valuation proceeds without an assessment.
#[derive(Debug, Error)]
pub enum SafetyError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The generation API returned an error payload.
    #[error("generation API error: {0}")]
    Api(String),

    /// The response carried no candidate text to parse.
    #[error("generation response contained no candidate text")]
    EmptyResponse,

    /// The candidate text was not the expected JSON report.
    #[error("assessment parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The model itself reported a failure as `{"error": …}`.
    #[error("model reported an error: {0}")]
    Reported(String),
}
