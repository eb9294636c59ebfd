use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::core::config::{ServiceUrl, Settings};
use crate::errors::ClientError;
use crate::schemas::{EvaluationResponse, HealthResponse};
use crate::selection::SelectedFile;
use crate::submission::SubmissionRequest;

pub(crate) const UPLOAD_ENDPOINT: &str = "upload";
pub(crate) const HEALTH_ENDPOINT: &str = "health";
pub(crate) const DOWNLOAD_ENDPOINT: &str = "download-report";

pub(crate) const REFERENCE_FIELD: &str = "question_file";
pub(crate) const STUDENTS_FIELD: &str = "student_files";
pub(crate) const USE_OPENAI_FIELD: &str = "use_openai";
pub(crate) const USE_VISION_FIELD: &str = "use_vision";

const RESERVED_FIELDS: [&str; 4] =
    [REFERENCE_FIELD, STUDENTS_FIELD, USE_OPENAI_FIELD, USE_VISION_FIELD];
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Remote evaluation backend. One attempt per call; nothing is retried.
#[async_trait]
pub(crate) trait EvaluationService: Send + Sync {
    async fn submit(&self, request: SubmissionRequest) -> Result<EvaluationResponse, ClientError>;

    async fn health(&self) -> Result<HealthResponse, ClientError>;

    /// Fetch a generated report into `dir`, returning the written path.
    async fn download_report(&self, filename: &str, dir: &Path) -> Result<PathBuf, ClientError>;
}

#[derive(Debug, Clone)]
pub(crate) struct EvaluationClient {
    client: Client,
    base_url: ServiceUrl,
}

impl EvaluationClient {
    /// No request timeout is configured: scoring a batch can legitimately
    /// take minutes and the user waits on the loading indicator.
    pub(crate) fn from_settings(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build evaluation HTTP client")?;

        Ok(Self { client, base_url: settings.service().base_url.clone() })
    }

    async fn build_form(&self, request: SubmissionRequest) -> Result<Form, ClientError> {
        let mut form = Form::new().part(REFERENCE_FIELD, file_part(&request.reference).await?);

        for student in &request.students {
            form = form.part(STUDENTS_FIELD, file_part(student).await?);
        }

        for (name, value) in request.fields {
            if RESERVED_FIELDS.contains(&name.as_str()) {
                tracing::debug!(field = %name, "Skipping extra field with reserved name");
                continue;
            }
            form = form.text(name, value);
        }

        Ok(form
            .text(USE_OPENAI_FIELD, request.use_openai.to_string())
            .text(USE_VISION_FIELD, request.use_vision.to_string()))
    }
}

#[async_trait]
impl EvaluationService for EvaluationClient {
    async fn submit(&self, request: SubmissionRequest) -> Result<EvaluationResponse, ClientError> {
        let endpoint = self.base_url.endpoint(&[UPLOAD_ENDPOINT]);
        let students = request.students.len();
        let form = self.build_form(request).await?;

        tracing::debug!(endpoint = %endpoint, students, "Posting evaluation upload");

        let response = self
            .client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| ClientError::transport(err, "Failed to call evaluation service"))?;

        let status = response.status();
        let raw_body = response
            .text()
            .await
            .map_err(|err| ClientError::transport(err, "Failed to read evaluation response"))?;
        let parsed = serde_json::from_str::<Value>(&raw_body);

        if !status.is_success() {
            let message = parsed.ok().as_ref().and_then(extract_error_message);
            tracing::warn!(status = status.as_u16(), "Evaluation service returned an error status");
            return Err(ClientError::application(Some(status.as_u16()), message));
        }

        let parsed = parsed.map_err(|err| {
            ClientError::transport(
                format!("{err} (status {status})"),
                "Evaluation service returned a non-JSON body",
            )
        })?;

        EvaluationResponse::from_json(parsed)
    }

    async fn health(&self) -> Result<HealthResponse, ClientError> {
        let endpoint = self.base_url.endpoint(&[HEALTH_ENDPOINT]);

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|err| ClientError::transport(err, "Failed to call health endpoint"))?;

        let status = response.status();
        let raw_body = response
            .text()
            .await
            .map_err(|err| ClientError::transport(err, "Failed to read health response"))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&raw_body)
                .ok()
                .as_ref()
                .and_then(extract_error_message)
                .unwrap_or_else(|| format!("Health check failed (status {status})"));
            return Err(ClientError::application(Some(status.as_u16()), Some(message)));
        }

        serde_json::from_str::<HealthResponse>(&raw_body)
            .map_err(|err| ClientError::transport(err, "Malformed health response"))
    }

    async fn download_report(&self, filename: &str, dir: &Path) -> Result<PathBuf, ClientError> {
        let local_name = Path::new(filename)
            .file_name()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                ClientError::Validation(format!("Invalid report filename: {filename}"))
            })?;
        let endpoint = self.base_url.endpoint(&[DOWNLOAD_ENDPOINT, filename]);

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|err| ClientError::transport(err, "Failed to download report"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(download_failure(status, response.text().await.ok()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| ClientError::transport(err, "Failed to read report body"))?;

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|err| ClientError::transport(err, "Failed to create report directory"))?;
        let path = dir.join(local_name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|err| ClientError::transport(err, "Failed to write report"))?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "Report downloaded");
        Ok(path)
    }
}

async fn file_part(file: &SelectedFile) -> Result<Part, ClientError> {
    let bytes = file.read_bytes().await.map_err(|err| {
        ClientError::transport(err, &format!("Failed to read selected file {}", file.name))
    })?;

    let media_type =
        if file.media_type.is_empty() { FALLBACK_MEDIA_TYPE } else { file.media_type.as_str() };

    Part::bytes(bytes)
        .file_name(file.name.clone())
        .mime_str(media_type)
        .map_err(|err| ClientError::transport(err, "Invalid media type for upload"))
}

fn download_failure(status: StatusCode, body: Option<String>) -> ClientError {
    let message = body
        .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
        .as_ref()
        .and_then(extract_error_message)
        .unwrap_or_else(|| format!("Report download failed (status {status})"));
    ClientError::application(Some(status.as_u16()), Some(message))
}

/// Pull a human-readable message out of an error body, if the service sent one.
fn extract_error_message(payload: &Value) -> Option<String> {
    if let Some(detail) = payload.get("detail") {
        if let Some(text) = detail.as_str() {
            return Some(text.to_string());
        }
        if let Some(items) = detail.as_array() {
            let joined = items
                .iter()
                .filter_map(|item| {
                    item.get("msg")
                        .and_then(Value::as_str)
                        .or_else(|| item.get("message").and_then(Value::as_str))
                })
                .collect::<Vec<_>>()
                .join("; ");
            if !joined.is_empty() {
                return Some(joined);
            }
        }
    }

    payload
        .get("error")
        .and_then(Value::as_str)
        .or_else(|| payload.get("message").and_then(Value::as_str))
        .map(ToString::to_string)
}
