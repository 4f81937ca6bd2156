use serde::Deserialize;
use thiserror::Error;

/// Public file host the `file` tool pushes to. Hosted files expire after
/// a week (or one view, whichever comes first).
pub const UPLOAD_ENDPOINT: &str = "https://file.io/?expires=1w";

/// Failure modes of the upload adapter. Transport problems and host
/// rejections are kept apart so the CLI message can say which side broke.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("could not reach the file host")]
    Network(#[from] reqwest::Error),

    #[error("file host rejected the upload: {0}")]
    Api(String),
}

#[derive(Debug, Deserialize)]
struct HostResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    link: Option<String>,
}

/// Push a file to the public host and resolve to its hosted link.
///
/// Single-shot: no retries, no cancellation, transport-default timeout.
/// A failed upload leaves the caller's payload untouched; the user
/// retries by rerunning the command.
pub async fn upload(file_name: &str, bytes: Vec<u8>) -> Result<String, UploadError> {
    upload_to(UPLOAD_ENDPOINT, file_name, bytes).await
}

pub async fn upload_to(
    endpoint: &str,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<String, UploadError> {
    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
    let form = reqwest::multipart::Form::new().part("file", part);

    tracing::debug!(endpoint, file = file_name, "uploading");
    let response = reqwest::Client::new()
        .post(endpoint)
        .multipart(form)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(UploadError::Api(format!("file host returned {status}")));
    }

    let body = response.bytes().await?;
    link_from_response(&body)
}

/// Pull the hosted link out of a response body. A missing or empty link,
/// `success: false`, or a body that is not the expected JSON all count
/// as host-side rejections.
fn link_from_response(body: &[u8]) -> Result<String, UploadError> {
    let response: HostResponse = serde_json::from_slice(body)
        .map_err(|err| UploadError::Api(format!("malformed response: {err}")))?;

    match response {
        HostResponse {
            success: true,
            link: Some(link),
        } if !link.is_empty() => Ok(link),
        _ => Err(UploadError::Api("upload was not accepted".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_yields_link() {
        let body = br#"{"success": true, "link": "https://file.io/abc123"}"#;
        assert_eq!(
            link_from_response(body).unwrap(),
            "https://file.io/abc123"
        );
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let body = br#"{"success": true, "key": "abc123", "link": "https://file.io/abc123", "expiry": "14 days"}"#;
        assert_eq!(
            link_from_response(body).unwrap(),
            "https://file.io/abc123"
        );
    }

    #[test]
    fn test_rejection_is_an_api_error() {
        let body = br#"{"success": false, "error": 400}"#;
        assert!(matches!(
            link_from_response(body),
            Err(UploadError::Api(_))
        ));
    }

    #[test]
    fn test_missing_link_is_an_api_error() {
        let body = br#"{"success": true}"#;
        assert!(matches!(
            link_from_response(body),
            Err(UploadError::Api(_))
        ));
    }

    #[test]
    fn test_empty_link_is_an_api_error() {
        let body = br#"{"success": true, "link": ""}"#;
        assert!(matches!(
            link_from_response(body),
            Err(UploadError::Api(_))
        ));
    }

    #[test]
    fn test_malformed_body_is_an_api_error() {
        let body = b"<html>502 Bad Gateway</html>";
        assert!(matches!(
            link_from_response(body),
            Err(UploadError::Api(_))
        ));
    }
}
