//! Detail Renderer
//!
//! Two layers:
//!
//! - [`render_detail`]: document → [`DetailView`] (pure data, testable)
//! - [`render_page`]: [`Page`] → HTML string

mod detail;
mod html;

pub use detail::{humanize, render_detail, DetailView, Pair, Period, Section, SectionBody};
pub use html::{
    document_href, escape, render_page, Banner, BannerLevel, CardBody, DocumentCard, EditorForm, Page,
};
