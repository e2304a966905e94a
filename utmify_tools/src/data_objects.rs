use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The outcome of a single order submission. Every HTTP response, successful or not, is reported as an
/// `OrderSubmission`; only transport-level failures become errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub status: u16,
    pub body: String,
}

impl OrderSubmission {
    pub fn new<S: Into<String>>(status: u16, body: S) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl Display for OrderSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {} {}", self.status, self.body)
    }
}
