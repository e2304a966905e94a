use thiserror::Error;

#[derive(Debug, Error)]
pub enum UtmifyApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid REST request: {0}")]
    RestRequestError(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not serialize JSON: {0}")]
    JsonError(String),
}
