use serde::Deserialize;
use serde_json::Value;

pub(crate) const HEALTHY_STATUS: &str = "healthy";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: String,
    #[serde(default)]
    pub(crate) features: Option<Value>,
}

impl HealthResponse {
    pub(crate) fn is_healthy(&self) -> bool {
        self.status == HEALTHY_STATUS
    }
}
