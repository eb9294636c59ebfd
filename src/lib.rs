pub(crate) mod app;
pub(crate) mod cli;
pub(crate) mod core;
pub(crate) mod errors;
pub(crate) mod schemas;
pub(crate) mod selection;
pub(crate) mod services;
pub(crate) mod submission;
pub(crate) mod ui;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use clap::Parser;

use crate::cli::Cli;
use crate::core::{config::Settings, telemetry};
use crate::services::{EvaluationClient, EvaluationService};

/// Returns `Ok(false)` when the session ended without a rendered result.
pub async fn run() -> anyhow::Result<bool> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load()?.with_overrides(&cli.overrides())?;
    telemetry::init_tracing(&settings)?;

    tracing::info!(
        service_url = %settings.service().base_url.as_str(),
        use_openai = settings.scoring().use_openai,
        use_vision = settings.scoring().use_vision,
        "GradeDesk starting"
    );

    let service: Arc<dyn EvaluationService> = Arc::new(EvaluationClient::from_settings(&settings)?);
    app::run_cli(&settings, &cli, service).await
}
