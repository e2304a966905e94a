use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
}

impl JsonResponse {
    pub fn success() -> Self {
        Self { success: true }
    }
}
