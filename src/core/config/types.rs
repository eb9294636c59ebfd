use std::path::PathBuf;

use reqwest::Url;
use thiserror::Error;

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(super) service: ServiceSettings,
    pub(super) scoring: ScoringSettings,
    pub(super) report: ReportSettings,
    pub(super) telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub(crate) struct ServiceSettings {
    pub(crate) base_url: ServiceUrl,
}

/// Defaults for the two scoring toggles sent with every submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ScoringSettings {
    pub(crate) use_openai: bool,
    pub(crate) use_vision: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ReportSettings {
    pub(crate) download_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub(crate) struct TelemetrySettings {
    pub(crate) log_level: String,
    pub(crate) json: bool,
}

/// Command-line values layered on top of the environment.
#[derive(Debug, Clone, Default)]
pub(crate) struct Overrides {
    pub(crate) service_url: Option<String>,
    pub(crate) use_openai: bool,
    pub(crate) use_vision: bool,
    pub(crate) download_dir: Option<PathBuf>,
}

/// Absolute http(s) base URL of the evaluation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceUrl(Url);

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("invalid service url: {0}")]
    InvalidServiceUrl(String),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl ServiceUrl {
    pub(crate) fn parse(value: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(value.trim())
            .map_err(|_| ConfigError::InvalidServiceUrl(value.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ConfigError::InvalidServiceUrl(value.to_string()));
        }

        Ok(Self(url))
    }

    /// Appends percent-encoded path segments to the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.0.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
