use std::path::PathBuf;

use clap::Parser;

use crate::core::config::{parse_form_field, Overrides};

/// Submit a question file and student answers for automated evaluation.
#[derive(Debug, Clone, Parser)]
#[command(name = "gradedesk", version, about)]
pub(crate) struct Cli {
    /// Reference question file (PDF or TXT).
    #[arg(long, short = 'r', value_name = "FILE")]
    pub(crate) reference: Option<PathBuf>,

    /// Student answer file (PDF). Repeat for each student.
    #[arg(long = "student", short = 's', value_name = "FILE")]
    pub(crate) students: Vec<PathBuf>,

    /// Extra form field sent with the upload, as `name=value`.
    #[arg(long = "field", short = 'f', value_name = "NAME=VALUE", value_parser = parse_form_field)]
    pub(crate) fields: Vec<(String, String)>,

    /// Ask the service to use the language-model scorer.
    #[arg(long)]
    pub(crate) use_openai: bool,

    /// Ask the service to use vision-based extraction.
    #[arg(long)]
    pub(crate) use_vision: bool,

    /// Evaluation service base URL.
    #[arg(long, value_name = "URL")]
    pub(crate) service_url: Option<String>,

    /// Directory to save the generated report into.
    #[arg(long, value_name = "DIR")]
    pub(crate) download_dir: Option<PathBuf>,
}

impl Cli {
    pub(crate) fn overrides(&self) -> Overrides {
        Overrides {
            service_url: self.service_url.clone(),
            use_openai: self.use_openai,
            use_vision: self.use_vision,
            download_dir: self.download_dir.clone(),
        }
    }
}
