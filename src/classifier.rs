use serde::Deserialize;

const PREDICT_PATH: &str = "/predict";

/// Shown for failures that carry no service-provided detail.
const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Successful response from the classifier service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub class: String,
    /// Model certainty in [0, 1].
    pub confidence: f64,
}

/// Error response body from the classifier service.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// The service answered with a non-success status; the detail message is
    /// shown to the user as-is.
    Remote(String),
    /// The request never completed, or the response body was unusable. The
    /// cause is for the log; the user gets a generic message.
    Network(String),
}

impl ClassifierError {
    /// The message to surface in the UI.
    pub fn user_message(&self) -> &str {
        match self {
            ClassifierError::Remote(detail) => detail,
            ClassifierError::Network(_) => GENERIC_ERROR_MESSAGE,
        }
    }
}

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierError::Remote(detail) => write!(f, "classifier error: {detail}"),
            ClassifierError::Network(cause) => write!(f, "request failed: {cause}"),
        }
    }
}

impl std::error::Error for ClassifierError {}

/// Submit an image to the classifier service.
///
/// One multipart POST to `{endpoint}/predict` with the raw bytes under the
/// form field `file`. No retries, no caching.
pub async fn predict(
    endpoint: &str,
    file_name: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Prediction, ClassifierError> {
    let url = format!("{}{PREDICT_PATH}", endpoint.trim_end_matches('/'));
    log::info!("Submitting {file_name} ({} bytes) to {url}", bytes.len());

    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .map_err(|e| ClassifierError::Network(format!("bad mime type {mime}: {e}")))?;
    let form = reqwest::multipart::Form::new().part("file", part);

    let client = reqwest::Client::new();
    let resp = client
        .post(&url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| ClassifierError::Network(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let detail = match resp.json::<ErrorBody>().await {
            Ok(body) => body.detail,
            Err(_) => format!("Classifier service returned {status}"),
        };
        return Err(ClassifierError::Remote(detail));
    }

    resp.json::<Prediction>()
        .await
        .map_err(|e| ClassifierError::Network(format!("unreadable response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_prediction_body() {
        let p: Prediction =
            serde_json::from_str(r#"{"class": "Pyoderma", "confidence": 0.9321}"#).unwrap();
        assert_eq!(p.class, "Pyoderma");
        assert_eq!(p.confidence, 0.9321);
    }

    #[test]
    fn decodes_error_body() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "Invalid image"}"#).unwrap();
        assert_eq!(body.detail, "Invalid image");
    }

    #[test]
    fn remote_detail_is_surfaced_verbatim() {
        let err = ClassifierError::Remote("Invalid image".to_string());
        assert_eq!(err.user_message(), "Invalid image");
    }

    #[test]
    fn network_failures_get_the_generic_message() {
        let err = ClassifierError::Network("connection refused".to_string());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        // The cause still reaches the log via Display.
        assert!(err.to_string().contains("connection refused"));
    }
}
