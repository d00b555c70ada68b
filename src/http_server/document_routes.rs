//! Document HTTP Routes
//!
//! Section pages, saves, downloads, and the JSON view of a folder.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};

use super::pages::{section_page, SaveFeedback};
use crate::app::AppState;
use crate::editor::{validate_filename, EditorError, Export};
use crate::entity::EntityKind;
use crate::loader::{load_file, load_folder, DocumentEntry};
use crate::render::{escape, render_page};

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Editor form submission
#[derive(Debug, Deserialize)]
pub struct ContentForm {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(code: u16, error: impl Into<String>) -> ApiError {
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ErrorResponse {
            error: error.into(),
            code,
        }),
    )
}

impl From<EditorError> for ErrorResponse {
    fn from(e: EditorError) -> Self {
        Self {
            code: e.status_code(),
            error: e.to_string(),
        }
    }
}

fn editor_error(e: EditorError) -> ApiError {
    let body = ErrorResponse::from(e);
    (
        StatusCode::from_u16(body.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(body),
    )
}

fn section_kind(section: &str) -> Result<EntityKind, ApiError> {
    EntityKind::from_section(section).ok_or_else(|| api_error(404, format!("unknown section '{}'", section)))
}

// ==================
// Routes
// ==================

pub fn document_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/:section", get(api_section_handler))
        .route("/:section", get(section_handler))
        .route("/:section/:file", post(save_handler))
        .route(
            "/:section/:file/download",
            get(download_stored_handler).post(download_current_handler),
        )
        .with_state(state)
}

async fn root_handler() -> Redirect {
    Redirect::to(&format!("/{}", EntityKind::Character.section()))
}

fn unknown_section_page(section: &str) -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(format!(
            "<!DOCTYPE html><html><body><p>Unknown section \"{}\". \
             Try <a href=\"/characters\">characters</a>.</p></body></html>",
            escape(section)
        )),
    )
}

async fn section_handler(
    State(state): State<Arc<AppState>>,
    Path(section): Path<String>,
    Query(query): Query<SearchQuery>,
) -> (StatusCode, Html<String>) {
    let Some(kind) = EntityKind::from_section(&section) else {
        return unknown_section_page(&section);
    };
    let page = section_page(&state, kind, query.q.as_deref(), None);
    (StatusCode::OK, Html(render_page(&page)))
}

async fn save_handler(
    State(state): State<Arc<AppState>>,
    Path((section, file)): Path<(String, String)>,
    Form(form): Form<ContentForm>,
) -> (StatusCode, Html<String>) {
    let Some(kind) = EntityKind::from_section(&section) else {
        return unknown_section_page(&section);
    };

    // One request is one whole interaction: the session starts in Editing
    // with the posted text and is dropped once it is Saved or Rejected. The
    // page below is rebuilt from disk, which is the Viewing state again.
    let editor = state.editor();
    let folder = state.layout.folder(kind);
    let result = editor
        .edit(&file, Some(kind), form.content.as_str())
        .and_then(|mut session| editor.save(&mut session, &folder));

    let (status, feedback) = match result {
        Ok(saved) => (StatusCode::OK, SaveFeedback::saved(&file, saved.validation_note)),
        Err(e) => (
            StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            SaveFeedback::rejected(&file, e.to_string(), form.content),
        ),
    };

    let page = section_page(&state, kind, None, Some(feedback));
    (status, Html(render_page(&page)))
}

fn attachment(export: Export) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, export.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.file_name),
            ),
        ],
        export.body,
    )
        .into_response()
}

/// Downloads the text currently in the editor, saved or not.
async fn download_current_handler(
    State(state): State<Arc<AppState>>,
    Path((section, file)): Path<(String, String)>,
    Form(form): Form<ContentForm>,
) -> Result<Response, ApiError> {
    section_kind(&section)?;
    let now = chrono::Local::now().naive_local();
    let export = state
        .editor()
        .export_text(&file, &form.content, now)
        .map_err(editor_error)?;
    Ok(attachment(export))
}

/// Downloads the stored document at the configured indent.
async fn download_stored_handler(
    State(state): State<Arc<AppState>>,
    Path((section, file)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let kind = section_kind(&section)?;
    validate_filename(&file).map_err(editor_error)?;

    let path = state.layout.folder(kind).join(&file);
    if !path.is_file() {
        return Err(api_error(404, format!("no such document: {}", file)));
    }

    let editor = state.editor();
    let text = match load_file(&path) {
        DocumentEntry::Document(doc) => editor.editor_text(&doc).map_err(editor_error)?,
        DocumentEntry::Failed { error } => return Err(api_error(422, error)),
    };

    let now = chrono::Local::now().naive_local();
    let export = editor.export_text(&file, &text, now).map_err(editor_error)?;
    Ok(attachment(export))
}

async fn api_section_handler(
    State(state): State<Arc<AppState>>,
    Path(section): Path<String>,
) -> Result<Response, ApiError> {
    let kind = section_kind(&section)?;
    let contents = load_folder(&state.layout.folder(kind)).map_err(|e| api_error(500, e.to_string()))?;
    Ok(Json(contents).into_response())
}
