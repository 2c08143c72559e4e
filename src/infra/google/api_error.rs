// Maps failed Google API responses onto the core's RemoteError.
//
// Google reports errors as {"error": {"code", "message", "status", "errors": [{"reason"}]}}.
// 401 always means the token is missing or expired. 403 is either missing
// consent/permission or a rate limit; only the former needs re-consent.

use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::core::remote::RemoteError;

const RATE_LIMIT_MARKERS: &[&str] = &[
    "rateLimitExceeded",
    "userRateLimitExceeded",
    "RESOURCE_EXHAUSTED",
];

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    status: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    reason: Option<String>,
}

/// Classifies a non-success response from `what` (e.g. "Drive files.list").
pub(crate) fn classify_failure(what: &str, status: StatusCode, body: &str) -> RemoteError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();

    let rate_limited = parsed.as_ref().map_or(false, |envelope| {
        let error = &envelope.error;
        error
            .status
            .iter()
            .chain(error.errors.iter().filter_map(|d| d.reason.as_ref()))
            .any(|marker| RATE_LIMIT_MARKERS.contains(&marker.as_str()))
    });

    let message = parsed
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.trim().to_string());
    let detail = format!("{} returned {}: {}", what, status, message);

    let needs_consent =
        status == StatusCode::UNAUTHORIZED || (status == StatusCode::FORBIDDEN && !rate_limited);
    if needs_consent {
        RemoteError::AuthRequired(detail)
    } else {
        RemoteError::Transport(detail)
    }
}

/// Passes successful responses through and classifies the rest.
pub(crate) async fn ensure_success(what: &str, response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = classify_failure(what, status, &body);
    tracing::warn!("{}", err);
    Err(err)
}

pub(crate) fn transport(what: &str, err: reqwest::Error) -> RemoteError {
    RemoteError::Transport(format!("{} failed: {}", what, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_requires_consent() {
        let err = classify_failure("Drive files.list", StatusCode::UNAUTHORIZED, "");
        assert!(err.requires_consent());
    }

    #[test]
    fn insufficient_scope_requires_consent() {
        let body = r#"{"error": {"code": 403, "message": "Request had insufficient authentication scopes.",
            "status": "PERMISSION_DENIED", "errors": [{"reason": "insufficientPermissions"}]}}"#;
        let err = classify_failure("Sheets values.get", StatusCode::FORBIDDEN, body);

        assert!(err.requires_consent());
        assert!(err.to_string().contains("insufficient authentication scopes"));
    }

    #[test]
    fn rate_limit_is_transport() {
        let body = r#"{"error": {"code": 403, "message": "User Rate Limit Exceeded",
            "errors": [{"reason": "userRateLimitExceeded"}]}}"#;
        let err = classify_failure("Drive files.list", StatusCode::FORBIDDEN, body);
        assert!(matches!(err, RemoteError::Transport(_)));
    }

    #[test]
    fn server_errors_are_transport_with_raw_body() {
        let err = classify_failure("Drive files.list", StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(
            err,
            RemoteError::Transport(
                "Drive files.list returned 502 Bad Gateway: upstream down".to_string()
            )
        );
    }
}
