use cliplens_core::ProviderError;
use reqwest::Response;
use serde::Deserialize;

/// Google API error envelope: `{"error": {"code", "message", "status"}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

pub(crate) fn transport(err: reqwest::Error) -> ProviderError {
    ProviderError::Transport(err.to_string())
}

/// Pass successful responses through; turn anything else into `ProviderError::Api`.
pub(crate) async fn check_response(
    response: Response,
    operation: &str,
) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = api_error_message(&body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            body.clone()
        }
    });

    tracing::debug!(
        operation = operation,
        status = status.as_u16(),
        error = %message,
        "Gemini API call failed"
    );

    Err(ProviderError::Api {
        status: status.as_u16(),
        message,
    })
}

fn api_error_message(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    if envelope.error.message.is_empty() {
        return envelope.error.status;
    }
    Some(envelope.error.message)
}
