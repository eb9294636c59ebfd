mod parsing;
mod settings;
mod types;

pub(crate) use parsing::parse_form_field;
pub(crate) use types::{Overrides, ScoringSettings, ServiceUrl, Settings};
