pub(crate) mod evaluation;
pub(crate) mod health;

pub(crate) use evaluation::{EvaluationResponse, EvaluationResult, PlagiarismCase, SummaryStats};
pub(crate) use health::HealthResponse;
