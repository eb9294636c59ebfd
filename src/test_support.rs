use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use crate::core::config::Settings;
use crate::schemas::evaluation::Severity;
use crate::schemas::{EvaluationResponse, EvaluationResult, PlagiarismCase};
use crate::selection::{FileSelection, FileSource, SelectedFile, PDF_MEDIA_TYPE, TEXT_MEDIA_TYPE};
use crate::services::evaluation::EvaluationClient;

pub(crate) fn file(name: &str, media_type: &str, size: u64) -> SelectedFile {
    SelectedFile {
        name: name.to_string(),
        media_type: media_type.to_string(),
        size,
        source: FileSource::Memory(format!("content of {name}").into_bytes()),
    }
}

pub(crate) fn pdf(name: &str, size: u64) -> SelectedFile {
    file(name, PDF_MEDIA_TYPE, size)
}

pub(crate) fn text(name: &str, size: u64) -> SelectedFile {
    file(name, TEXT_MEDIA_TYPE, size)
}

pub(crate) fn valid_selection() -> FileSelection {
    FileSelection::new(Some(pdf("q.pdf", 1024)), vec![pdf("s1.pdf", 2048), pdf("s2.pdf", 4096)])
}

pub(crate) fn result(student_id: &str, score: f64, grade: &str) -> EvaluationResult {
    EvaluationResult {
        student_id: student_id.to_string(),
        filename: format!("{student_id}.pdf"),
        score,
        grade: grade.to_string(),
        metrics: None,
        feedback: None,
    }
}

pub(crate) fn case(
    first: &str,
    second: &str,
    similarity: f64,
    flagged: bool,
    severity: Severity,
) -> PlagiarismCase {
    PlagiarismCase {
        student_1: first.to_string(),
        student_2: second.to_string(),
        combined_similarity: similarity,
        is_plagiarism: flagged,
        severity,
        common_phrases: None,
    }
}

/// Two students, one pass and one fail, no plagiarism pairs.
pub(crate) fn sample_response_json() -> Value {
    json!({
        "success": true,
        "summary": {"total_students": 2, "passed": 1, "failed": 1, "plagiarism_cases": 0},
        "results": [
            {"student_id": "S1", "score": 0.75, "grade": "B"},
            {"student_id": "S2", "score": 0.4, "grade": "F"}
        ],
        "plagiarism": []
    })
}

pub(crate) fn sample_response() -> EvaluationResponse {
    EvaluationResponse::from_json(sample_response_json()).expect("sample response")
}

#[derive(Debug, Clone)]
pub(crate) struct MockReply {
    pub(crate) status: StatusCode,
    pub(crate) body: String,
}

impl MockReply {
    pub(crate) fn json(status: StatusCode, body: Value) -> Self {
        Self { status, body: body.to_string() }
    }

    pub(crate) fn raw(status: StatusCode, body: &str) -> Self {
        Self { status, body: body.to_string() }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MockBehaviour {
    pub(crate) upload: MockReply,
    pub(crate) health: MockReply,
    pub(crate) report: Option<Vec<u8>>,
}

impl Default for MockBehaviour {
    fn default() -> Self {
        let mut upload = sample_response_json();
        upload["report_filename"] = json!("evaluation_report.xlsx");
        Self {
            upload: MockReply::json(StatusCode::OK, upload),
            health: MockReply::json(
                StatusCode::OK,
                json!({"status": "healthy", "features": {"openai": true, "vision": false}}),
            ),
            report: Some(b"xlsx-bytes".to_vec()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordedUpload {
    pub(crate) files: Vec<RecordedFile>,
    pub(crate) fields: Vec<(String, String)>,
}

impl RecordedUpload {
    pub(crate) fn field(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    pub(crate) fn files_for(&self, field: &str) -> Vec<&RecordedFile> {
        self.files.iter().filter(|file| file.field == field).collect()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedFile {
    pub(crate) field: String,
    pub(crate) filename: String,
    pub(crate) content_type: String,
    pub(crate) bytes: Vec<u8>,
}

struct MockState {
    behaviour: MockBehaviour,
    uploads: Mutex<Vec<RecordedUpload>>,
    downloads: Mutex<Vec<String>>,
}

/// In-process evaluation service bound to an ephemeral local port.
pub(crate) struct MockEvaluationService {
    pub(crate) base_url: String,
    state: Arc<MockState>,
}

impl MockEvaluationService {
    pub(crate) fn settings(&self) -> Settings {
        Settings::for_service(&self.base_url)
    }

    pub(crate) fn client(&self) -> EvaluationClient {
        EvaluationClient::from_settings(&self.settings()).expect("client")
    }

    pub(crate) fn uploads(&self) -> Vec<RecordedUpload> {
        self.state.uploads.lock().expect("uploads").clone()
    }

    pub(crate) fn downloads(&self) -> Vec<String> {
        self.state.downloads.lock().expect("downloads").clone()
    }
}

pub(crate) async fn spawn_mock_service(behaviour: MockBehaviour) -> MockEvaluationService {
    let state = Arc::new(MockState {
        behaviour,
        uploads: Mutex::new(Vec::new()),
        downloads: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/upload", post(upload))
        .route("/health", get(health))
        .route("/download-report/:filename", get(download))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind mock service");
    let addr = listener.local_addr().expect("mock service addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    MockEvaluationService { base_url: format!("http://{addr}"), state }
}

/// Base URL nothing listens on.
pub(crate) async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

async fn upload(State(state): State<Arc<MockState>>, mut multipart: Multipart) -> Response {
    let mut recorded = RecordedUpload::default();

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(ToString::to_string);
        let content_type = field.content_type().map(ToString::to_string).unwrap_or_default();
        let bytes = field.bytes().await.expect("field bytes").to_vec();

        match filename {
            Some(filename) => {
                recorded.files.push(RecordedFile { field: name, filename, content_type, bytes })
            }
            None => recorded.fields.push((name, String::from_utf8_lossy(&bytes).into_owned())),
        }
    }

    state.uploads.lock().expect("uploads").push(recorded);
    reply(&state.behaviour.upload)
}

async fn health(State(state): State<Arc<MockState>>) -> Response {
    reply(&state.behaviour.health)
}

async fn download(State(state): State<Arc<MockState>>, Path(filename): Path<String>) -> Response {
    state.downloads.lock().expect("downloads").push(filename);
    match &state.behaviour.report {
        Some(bytes) => (StatusCode::OK, bytes.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "Report not found").into_response(),
    }
}

fn reply(reply: &MockReply) -> Response {
    (reply.status, [(header::CONTENT_TYPE, "application/json")], reply.body.clone())
        .into_response()
}
