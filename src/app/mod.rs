pub(crate) mod message;
pub(crate) mod runtime;
pub(crate) mod update;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::core::config::Settings;
use crate::selection::{InputSlot, SelectedFile};
use crate::services::EvaluationService;
use crate::submission::FormOptions;
use crate::ui::terminal;
use message::Message;
use runtime::EventLoop;
use update::AppState;

/// Drive one page session from the command line, then print the page.
/// Returns whether an evaluation result was rendered.
pub(crate) async fn run_cli(
    settings: &Settings,
    cli: &Cli,
    service: Arc<dyn EvaluationService>,
) -> Result<bool> {
    let state = session(settings, cli, service).await?;
    print!("{}", terminal::render_text(&state.view, &settings.service().base_url));
    Ok(state.view.report().is_some())
}

/// Health check, file selection, submit and the optional report download.
async fn session(
    settings: &Settings,
    cli: &Cli,
    service: Arc<dyn EvaluationService>,
) -> Result<AppState> {
    let form = FormOptions { fields: cli.fields.clone(), scoring: settings.scoring() };
    let mut event_loop = EventLoop::new(AppState::new(form), Arc::clone(&service));

    event_loop.dispatch(Message::Started);

    let reference = match &cli.reference {
        Some(path) => vec![load_file(path).await?],
        None => Vec::new(),
    };
    let mut students = Vec::with_capacity(cli.students.len());
    for path in &cli.students {
        students.push(load_file(path).await?);
    }

    // The health result must land before submit, or its warning would
    // replace a submission error.
    event_loop.run_until_idle().await;

    event_loop.dispatch(Message::FilesSelected { slot: InputSlot::Reference, files: reference });
    event_loop.dispatch(Message::FilesSelected { slot: InputSlot::Students, files: students });
    event_loop.dispatch(Message::Submit);
    event_loop.run_until_idle().await;

    let mut state = event_loop.into_state();

    let download = state.view.report().and_then(|report| report.download.clone());
    if let (Some(dir), Some(link)) = (&settings.report().download_dir, download) {
        match service.download_report(&link.filename, dir).await {
            Ok(path) => println!("Report saved to {}", path.display()),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    filename = %link.filename,
                    "Report download failed"
                );
                state.view.notifications_mut().error(err.user_message());
            }
        }
    }

    Ok(state)
}

async fn load_file(path: &Path) -> Result<SelectedFile> {
    SelectedFile::from_path(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}
