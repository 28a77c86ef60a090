//! Response status handling for the registry fetch.

use cla_core::RegistryError;

/// Return the response unchanged on success; any other status means the
/// registry is unavailable.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RegistryError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(RegistryError::Unavailable {
            status: Some(status.as_u16()),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// A request that never produced a response.
pub fn transport_error(error: &reqwest::Error) -> RegistryError {
    RegistryError::Unavailable {
        status: error.status().map(|status| status.as_u16()),
        message: error.to_string(),
    }
}
