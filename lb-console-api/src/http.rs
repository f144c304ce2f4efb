//! Generic HTTP request helpers
//!
//! Unified request execution for the REST implementation: sending, logging,
//! timeout/network error mapping, body reading and server error extraction.
//! URL construction and header attachment stay with the caller.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};

/// Maximum body length echoed into debug logs.
const LOG_BODY_LIMIT: usize = 500;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Send a prepared request, mapping transport failures.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `target` - method + path, used for logging only
    pub async fn send(
        request_builder: RequestBuilder,
        target: &str,
    ) -> ApiResult<reqwest::Response> {
        log::debug!("{target}");

        request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                ApiError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })
    }

    /// Read the response body, returning status and text.
    pub async fn read_body(response: reqwest::Response, target: &str) -> ApiResult<(u16, String)> {
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::NetworkError {
            detail: format!("failed to read response body: {e}"),
        })?;

        log::debug!("{target} -> {status}: {}", truncate_for_log(&text));
        Ok((status, text))
    }

    /// Map a non-2xx status into an [`ApiError::Endpoint`], extracting the
    /// server-provided reason from the body when present.
    pub fn error_for_status(status: u16, body: &str) -> Option<ApiError> {
        if (200..300).contains(&status) {
            return None;
        }

        let message = extract_error_message(body)
            .unwrap_or_else(|| format!("request failed with HTTP {status}"));
        Some(ApiError::Endpoint { status, message })
    }

    /// Parse a JSON response body.
    pub fn parse_json<T>(response_text: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("JSON parse failure: {e}");
            log::error!("raw body: {}", truncate_for_log(response_text));
            ApiError::ParseError {
                detail: e.to_string(),
            }
        })
    }
}

/// Pull a human-readable reason out of an error body.
///
/// The platform wraps failures as `{"error": "..."}`; some middlewares use
/// `{"message": "..."}` instead. Anything else falls through to the caller.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["error", "message"] {
        if let Some(message) = value.get(key).and_then(serde_json::Value::as_str) {
            if !message.trim().is_empty() {
                return Some(message.to_string());
            }
        }
    }
    None
}

/// Truncate long bodies before they hit the logs.
fn truncate_for_log(text: &str) -> String {
    if text.len() <= LOG_BODY_LIMIT {
        return text.to_string();
    }
    let cut = text
        .char_indices()
        .take_while(|(i, _)| *i < LOG_BODY_LIMIT)
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    format!("{}... ({} bytes)", &text[..cut], text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_for_status_passes_success_through() {
        assert!(HttpUtils::error_for_status(200, "").is_none());
        assert!(HttpUtils::error_for_status(204, "").is_none());
    }

    #[test]
    fn error_for_status_prefers_error_field() {
        let err = HttpUtils::error_for_status(409, r#"{"error": "name already in use"}"#).unwrap();
        assert_eq!(err.to_string(), "name already in use");
        assert!(err.is_expected());
    }

    #[test]
    fn error_for_status_falls_back_to_message_field() {
        let err = HttpUtils::error_for_status(403, r#"{"message": "forbidden"}"#).unwrap();
        assert_eq!(err.to_string(), "forbidden");
    }

    #[test]
    fn error_for_status_synthesizes_reason_for_opaque_bodies() {
        let err = HttpUtils::error_for_status(502, "<html>bad gateway</html>").unwrap();
        assert_eq!(err.to_string(), "request failed with HTTP 502");
    }

    #[test]
    fn truncate_keeps_short_bodies_intact() {
        assert_eq!(truncate_for_log("ok"), "ok");
    }

    #[test]
    fn truncate_cuts_long_bodies() {
        let long = "x".repeat(LOG_BODY_LIMIT + 100);
        let truncated = truncate_for_log(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.ends_with("bytes)"));
    }
}
