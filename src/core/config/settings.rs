use super::parsing::{env_flag, env_or_default, env_path};
use super::types::{
    ConfigError, Overrides, ReportSettings, ScoringSettings, ServiceSettings, ServiceUrl,
    Settings, TelemetrySettings,
};

const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let service_url = env_or_default("GRADEDESK_SERVICE_URL", DEFAULT_SERVICE_URL);
        let base_url = ServiceUrl::parse(&service_url)?;

        let use_openai = env_flag("GRADEDESK_USE_OPENAI");
        let use_vision = env_flag("GRADEDESK_USE_VISION");

        let download_dir = env_path("GRADEDESK_REPORT_DIR");

        let log_level = env_or_default("GRADEDESK_LOG_LEVEL", "info");
        let json = env_flag("GRADEDESK_LOG_JSON");

        let settings = Self {
            service: ServiceSettings { base_url },
            scoring: ScoringSettings { use_openai, use_vision },
            report: ReportSettings { download_dir },
            telemetry: TelemetrySettings { log_level, json },
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Layers command-line values over the loaded settings. Flags can only
    /// switch a toggle on; an unset flag keeps the environment default.
    pub(crate) fn with_overrides(mut self, overrides: &Overrides) -> Result<Self, ConfigError> {
        if let Some(url) = &overrides.service_url {
            self.service.base_url = ServiceUrl::parse(url)?;
        }

        self.scoring.use_openai |= overrides.use_openai;
        self.scoring.use_vision |= overrides.use_vision;

        if let Some(dir) = &overrides.download_dir {
            self.report.download_dir = Some(dir.clone());
        }

        self.validate()?;
        Ok(self)
    }

    pub(crate) fn service(&self) -> &ServiceSettings {
        &self.service
    }

    pub(crate) fn scoring(&self) -> ScoringSettings {
        self.scoring
    }

    pub(crate) fn report(&self) -> &ReportSettings {
        &self.report
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.report.download_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(ConfigError::InvalidValue {
                    field: "GRADEDESK_REPORT_DIR",
                    value: dir.display().to_string(),
                });
            }
        }

        if self.telemetry.log_level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "GRADEDESK_LOG_LEVEL",
                value: self.telemetry.log_level.clone(),
            });
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn for_service(base_url: &str) -> Self {
        Self {
            service: ServiceSettings {
                base_url: ServiceUrl::parse(base_url).expect("test service url"),
            },
            scoring: ScoringSettings::default(),
            report: ReportSettings::default(),
            telemetry: TelemetrySettings { log_level: "debug".to_string(), json: false },
        }
    }
}
