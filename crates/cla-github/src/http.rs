//! Shared HTTP response helpers for the GitHub client.
//!
//! Every non-success status becomes [`UpstreamError::Api`] carrying the
//! status code and body, so a failed step reports exactly what GitHub said.

use cla_core::UpstreamError;
use serde::de::DeserializeOwned;

/// Return the response unchanged on success, otherwise its status and body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(UpstreamError::Api {
            status: status.as_u16(),
            body: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Decode a successful response body.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, UpstreamError> {
    let body = resp.bytes().await.map_err(transport)?;
    serde_json::from_slice(&body).map_err(|error| UpstreamError::Parse(error.to_string()))
}

pub fn transport(error: reqwest::Error) -> UpstreamError {
    UpstreamError::Transport(Box::new(error))
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
    async fn check_response_api_error_keeps_body() {
        let resp = mock_response(403, r#"{"message":"Resource not accessible by integration"}"#);
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            UpstreamError::Api { status: 403, ref body } if body.contains("not accessible")
        ));
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(201, "{}")).await.is_ok());
    }

    #[tokio::test]
    async fn read_json_reports_shape_errors() {
        #[derive(Debug, serde::Deserialize)]
        struct Head {
            #[allow(dead_code)]
            sha: String,
        }

        let err = read_json::<Head>(mock_response(200, r#"{"ref":"main"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Parse(_)));
    }
}
