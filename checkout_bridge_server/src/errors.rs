use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use checkout_bridge_engine::BridgeError;
use log::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("{0}")]
    ValidationError(String),
    /// Carries the order API's response body verbatim.
    #[error("{0}")]
    DownstreamError(String),
    #[error("Internal error")]
    Internal,
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidSignature => StatusCode::UNAUTHORIZED,
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::DownstreamError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<BridgeError> for ServerError {
    fn from(e: BridgeError) -> Self {
        match e {
            BridgeError::InvalidSignature => Self::InvalidSignature,
            BridgeError::InvalidPayload(msg) => Self::InvalidRequestBody(msg),
            e @ BridgeError::MissingOrderId => Self::ValidationError(e.to_string()),
            BridgeError::Downstream { message, .. } => Self::DownstreamError(message),
            BridgeError::Forwarding(e) => {
                // The details stay in the log. The caller only learns that something broke on our side.
                error!("💥️ Order forwarding failed. {e}");
                Self::Internal
            },
        }
    }
}
