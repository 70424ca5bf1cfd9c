//! Shared HTTP response helpers for the upstream dictionary client.
//!
//! Centralizes status-code checks (404 → [`LookupError::NotFound`],
//! non-success → [`LookupError::Upstream`]) so the client module stays
//! focused on request construction and response mapping.

use crate::error::LookupError;

/// Check an HTTP response for the upstream error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **404 Not Found** → [`LookupError::NotFound`]: the word is unknown
///   upstream, distinct from every other failure.
/// - **Non-success status** → [`LookupError::Upstream`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, LookupError> {
    if resp.status() == 404 {
        return Err(LookupError::NotFound);
    }
    if !resp.status().is_success() {
        return Err(LookupError::Upstream {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn not_found_is_its_own_kind() {
        let err = check_response(mock_response(404, "")).await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound));
    }

    #[tokio::test]
    async fn server_error_becomes_upstream() {
        let err = check_response(mock_response(500, "boom")).await.unwrap_err();
        match err {
            LookupError::Upstream { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn client_error_becomes_upstream() {
        let err = check_response(mock_response(400, "")).await.unwrap_err();
        assert!(matches!(err, LookupError::Upstream { status: 400, .. }));
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }
}
