pub(crate) mod controller;
pub(crate) mod state;

pub(crate) use controller::{FormOptions, SubmissionController, SubmissionRequest};
