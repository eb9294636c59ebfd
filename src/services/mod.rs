pub(crate) mod evaluation;
pub(crate) mod health;

pub(crate) use evaluation::{EvaluationClient, EvaluationService};
