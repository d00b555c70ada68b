//! Section page assembly
//!
//! Loads a section folder fresh on every request and turns it into a
//! [`Page`]: one card per file, failed files included, filtered by the
//! optional title search.

use crate::app::AppState;
use crate::entity::{display_title, EntityKind};
use crate::loader::{load_folder, DocumentEntry};
use crate::render::{render_detail, Banner, BannerLevel, CardBody, DocumentCard, EditorForm, Page};

/// Result of a save, shown on the card it belongs to.
#[derive(Debug, Clone)]
pub struct SaveFeedback {
    pub filename: String,
    pub banner: Banner,
    /// Text to keep in the editor instead of the stored document
    pub text: Option<String>,
}

impl SaveFeedback {
    pub fn saved(filename: &str, note: Option<String>) -> Self {
        let text = match note {
            Some(note) => format!("Saved {} ({})", filename, note),
            None => format!("Saved {}", filename),
        };
        Self {
            filename: filename.to_string(),
            banner: Banner::new(BannerLevel::Success, text),
            text: None,
        }
    }

    pub fn rejected(filename: &str, message: String, text: String) -> Self {
        Self {
            filename: filename.to_string(),
            banner: Banner::new(BannerLevel::Error, format!("Not saved: {}", message)),
            text: Some(text),
        }
    }
}

fn matches_query(title: &str, filename: &str, query: Option<&str>) -> bool {
    match query.map(str::trim) {
        None | Some("") => true,
        Some(q) => {
            let q = q.to_lowercase();
            title.to_lowercase().contains(&q) || filename.to_lowercase().contains(&q)
        }
    }
}

/// Startup warnings shown on every page.
fn startup_banners(state: &AppState) -> Vec<Banner> {
    let mut banners = Vec::new();
    if let Some(warning) = &state.settings_warning {
        banners.push(Banner::new(BannerLevel::Warning, warning.clone()));
    }
    for problem in &state.schema_problems {
        banners.push(Banner::new(
            BannerLevel::Warning,
            format!("Schema {} ignored: {}", problem.subject(), problem),
        ));
    }
    banners
}

pub fn section_page(
    state: &AppState,
    kind: EntityKind,
    query: Option<&str>,
    feedback: Option<SaveFeedback>,
) -> Page {
    let mut banners = startup_banners(state);
    let query = query.map(str::trim).filter(|q| !q.is_empty());

    let contents = match load_folder(&state.layout.folder(kind)) {
        Ok(contents) => contents,
        Err(e) => {
            banners.push(Banner::new(BannerLevel::Error, e.to_string()));
            Default::default()
        }
    };

    let editor = state.editor();
    let validator = state.validator();
    let mut feedback = feedback;
    let mut cards = Vec::with_capacity(contents.len());

    for (filename, entry) in &contents {
        let title = match entry {
            DocumentEntry::Document(doc) => display_title(kind, doc),
            DocumentEntry::Failed { .. } => filename.clone(),
        };
        if !matches_query(&title, filename, query) {
            continue;
        }

        let own = if feedback.as_ref().is_some_and(|fb| &fb.filename == filename) {
            feedback.take()
        } else {
            None
        };

        let body = match entry {
            DocumentEntry::Failed { error } => CardBody::Failed(error.clone()),
            DocumentEntry::Document(doc) => {
                // No form when editing is disabled or the file name could never be saved
                let form = editor.open(filename, doc, Some(kind)).ok().map(|session| {
                    let text = match own.as_ref().and_then(|fb| fb.text.clone()) {
                        Some(text) => text,
                        None => session.text().to_string(),
                    };
                    EditorForm {
                        text,
                        show_download: state.settings.show_download_button,
                    }
                });
                CardBody::Loaded {
                    detail: render_detail(kind, doc),
                    validation: validator.validate_kind(doc, kind),
                    editor: form,
                }
            }
        };

        cards.push(DocumentCard {
            filename: filename.clone(),
            title,
            open: own.is_some(),
            banner: own.map(|fb| fb.banner),
            body,
        });
    }

    // Feedback for a file not listed (filtered out or never existed)
    if let Some(fb) = feedback {
        banners.push(fb.banner);
    }

    Page {
        kind,
        query: query.map(str::to_string),
        banners,
        cards,
    }
}
