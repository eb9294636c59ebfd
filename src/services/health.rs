use super::evaluation::EvaluationService;
use crate::errors::ClientError;
use crate::schemas::HealthResponse;
use crate::ui::ViewContext;

pub(crate) const HEALTH_WARNING: &str =
    "Warning: Unable to connect to backend. Some features may be unavailable.";

/// One-shot startup probe. Any status other than healthy counts as a failure.
pub(crate) async fn probe(
    service: &dyn EvaluationService,
) -> Result<HealthResponse, ClientError> {
    let health = service.health().await?;
    if !health.is_healthy() {
        return Err(ClientError::application(
            None,
            Some(format!("Backend reported status {}", health.status)),
        ));
    }
    Ok(health)
}

/// Surface the probe result. Failures only warn; nothing is blocked.
pub(crate) fn report(result: Result<HealthResponse, ClientError>, view: &mut ViewContext) {
    match result {
        Ok(health) => {
            let features = health.features.map(|value| value.to_string()).unwrap_or_default();
            tracing::info!(status = %health.status, features = %features, "Backend is healthy");
        }
        Err(err) => {
            tracing::warn!(error = %err, "Backend health check failed");
            view.notifications_mut().error(HEALTH_WARNING);
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::services::EvaluationClient;
    use crate::test_support::{spawn_mock_service, MockBehaviour, MockReply};
    use crate::ui::notifications::NotificationKind;

    #[tokio::test]
    async fn healthy_backend_shows_nothing() {
        let mock = spawn_mock_service(MockBehaviour::default()).await;
        let mut view = ViewContext::default();

        let result = probe(&mock.client()).await;
        assert!(result.is_ok());
        report(result, &mut view);

        assert!(view.notifications().current().is_none());
    }

    #[tokio::test]
    async fn degraded_status_counts_as_failure() {
        let mock = spawn_mock_service(MockBehaviour {
            health: MockReply::json(StatusCode::OK, json!({"status": "degraded"})),
            ..MockBehaviour::default()
        })
        .await;
        let mut view = ViewContext::default();

        report(probe(&mock.client()).await, &mut view);

        let notification = view.notifications().current().expect("warning");
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.message, HEALTH_WARNING);
    }

    #[tokio::test]
    async fn unreachable_backend_warns_once() {
        let settings = crate::core::config::Settings::for_service(
            &crate::test_support::unreachable_base_url().await,
        );
        let client = EvaluationClient::from_settings(&settings).expect("client");
        let mut view = ViewContext::default();

        report(probe(&client).await, &mut view);

        assert_eq!(
            view.notifications().current().map(|n| n.message.as_str()),
            Some(HEALTH_WARNING)
        );
        assert!(!view.is_loading());
    }
}
