use thiserror::Error;

/// Errors talking to the analysis backend.
///
/// Variants carry rendered messages rather than source errors so the
/// error can be cloned into iced messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("invalid server url: {0}")]
    Url(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("HTTP {status} from {path}")]
    Status { status: u16, path: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("invalid image: {0}")]
    Image(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Connection(e.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        ApiError::Url(e.to_string())
    }
}

impl From<base64::DecodeError> for ApiError {
    fn from(e: base64::DecodeError) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<image::ImageError> for ApiError {
    fn from(e: image::ImageError) -> Self {
        ApiError::Image(e.to_string())
    }
}
