//! HTML page writer
//!
//! Turns a [`Page`] into a self-contained HTML document: sidebar
//! navigation between sections, one `<details>` block per document, and
//! the editor form when editing is offered. All text is escaped here.

use std::fmt::Write;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::detail::{DetailView, Period, SectionBody};
use crate::entity::EntityKind;
use crate::schema::ValidationOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl BannerLevel {
    fn css_class(&self) -> &'static str {
        match self {
            BannerLevel::Success => "banner success",
            BannerLevel::Info => "banner info",
            BannerLevel::Warning => "banner warning",
            BannerLevel::Error => "banner error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub level: BannerLevel,
    pub text: String,
}

impl Banner {
    pub fn new(level: BannerLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Editor form state for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorForm {
    pub text: String,
    pub show_download: bool,
}

#[derive(Debug, Clone)]
pub enum CardBody {
    /// The file could not be read or parsed
    Failed(String),
    Loaded {
        detail: DetailView,
        validation: ValidationOutcome,
        /// `None` when editing is disabled
        editor: Option<EditorForm>,
    },
}

#[derive(Debug, Clone)]
pub struct DocumentCard {
    pub filename: String,
    pub title: String,
    /// Render the block expanded
    pub open: bool,
    /// Feedback shown inside the block (save result)
    pub banner: Option<Banner>,
    pub body: CardBody,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub kind: EntityKind,
    pub query: Option<String>,
    pub banners: Vec<Banner>,
    pub cards: Vec<DocumentCard>,
}

const STYLE: &str = "\
body{font-family:sans-serif;margin:0;display:flex}\
nav{width:14rem;background:#f3f1ec;padding:1rem;min-height:100vh}\
nav a{display:block;padding:.3rem 0;color:#333}\
nav a.active{font-weight:bold}\
main{flex:1;padding:1rem 2rem}\
details{border:1px solid #ddd;border-radius:4px;margin:.5rem 0;padding:.5rem}\
summary{cursor:pointer;font-weight:bold}\
table.pairs{border-collapse:collapse;width:100%}\
table.pairs td{padding:.2rem .5rem;vertical-align:top;border-bottom:1px solid #eee}\
table.pairs td.label{width:30%;color:#555}\
.banner{padding:.5rem;border-radius:4px;margin:.5rem 0}\
.success{background:#e3f5e1}.info{background:#e4eef8}\
.warning{background:#fdf3d8}.error{background:#f9e0e0}\
.badge{font-size:.8rem;padding:0 .4rem;border-radius:3px;margin-left:.5rem}\
textarea{width:100%;font-family:monospace}";

/// Escapes text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// URL path of a document within its section.
pub fn document_href(kind: EntityKind, filename: &str) -> String {
    format!("/{}/{}", kind.section(), utf8_percent_encode(filename, NON_ALPHANUMERIC))
}

pub fn render_page(page: &Page) -> String {
    let mut html = String::with_capacity(4096);

    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{} · Storyworld Explorer</title><style>{}</style></head><body>",
        page.kind.heading(),
        STYLE
    );

    write_nav(&mut html, page.kind);

    html.push_str("<main>");
    let _ = write!(html, "<h1>{}</h1>", page.kind.heading());
    write_search(&mut html, page);

    for banner in &page.banners {
        write_banner(&mut html, banner);
    }

    if page.cards.is_empty() {
        let text = match &page.query {
            Some(q) => format!("No {} match \"{}\".", page.kind.section(), q),
            None => format!("No {} yet.", page.kind.section()),
        };
        let _ = write!(html, "<p>{}</p>", escape(&text));
    }

    for card in &page.cards {
        write_card(&mut html, page.kind, card);
    }

    html.push_str("</main></body></html>");
    html
}

fn write_nav(html: &mut String, active: EntityKind) {
    html.push_str("<nav><h2>Navigation</h2>");
    for kind in EntityKind::ALL {
        let class = if kind == active { " class=\"active\"" } else { "" };
        let _ = write!(html, "<a href=\"/{}\"{}>{}</a>", kind.section(), class, kind.heading());
    }
    html.push_str("</nav>");
}

fn write_search(html: &mut String, page: &Page) {
    let value = page.query.as_deref().map(escape).unwrap_or_default();
    let _ = write!(
        html,
        "<form method=\"get\" action=\"/{}\"><input type=\"search\" name=\"q\" \
         placeholder=\"Search {}\" value=\"{}\"></form>",
        page.kind.section(),
        page.kind.section(),
        value
    );
}

fn write_banner(html: &mut String, banner: &Banner) {
    let _ = write!(
        html,
        "<div class=\"{}\">{}</div>",
        banner.level.css_class(),
        escape(&banner.text)
    );
}

fn write_card(html: &mut String, kind: EntityKind, card: &DocumentCard) {
    let open = if card.open { " open" } else { "" };
    let _ = write!(
        html,
        "<details id=\"{}\"{}><summary>{} <small>{}</small>",
        escape(&card.filename),
        open,
        escape(&card.title),
        escape(&card.filename)
    );

    if let CardBody::Loaded { validation, .. } = &card.body {
        if validation.schema_applied {
            let (class, label) = if validation.valid {
                ("badge success", "valid")
            } else {
                ("badge warning", "schema issue")
            };
            let _ = write!(
                html,
                "<span class=\"{}\" title=\"{}\">{}</span>",
                class,
                escape(&validation.message),
                label
            );
        }
    }
    html.push_str("</summary>");

    if let Some(banner) = &card.banner {
        write_banner(html, banner);
    }

    match &card.body {
        CardBody::Failed(error) => {
            write_banner(
                html,
                &Banner::new(BannerLevel::Error, format!("Error loading {}: {}", card.filename, error)),
            );
        }
        CardBody::Loaded {
            detail,
            validation,
            editor,
        } => {
            write_detail(html, detail);
            if validation.schema_applied && !validation.valid {
                write_banner(html, &Banner::new(BannerLevel::Warning, validation.message.clone()));
            }
            if let Some(form) = editor {
                write_editor(html, kind, &card.filename, form);
            }
        }
    }

    html.push_str("</details>");
}

fn write_detail(html: &mut String, detail: &DetailView) {
    for section in &detail.sections {
        let _ = write!(html, "<h3>{}</h3>", escape(&section.heading));
        match &section.body {
            SectionBody::Pairs(pairs) => {
                html.push_str("<table class=\"pairs\">");
                for pair in pairs {
                    let _ = write!(
                        html,
                        "<tr><td class=\"label\">{}</td><td>{}</td></tr>",
                        escape(&pair.label),
                        escape(&pair.value)
                    );
                }
                html.push_str("</table>");
            }
            SectionBody::Lines(lines) => {
                html.push_str("<ul>");
                for line in lines {
                    let _ = write!(html, "<li>{}</li>", escape(line));
                }
                html.push_str("</ul>");
            }
            SectionBody::Timeline(periods) => {
                for period in periods {
                    write_period(html, period);
                }
            }
        }
    }
}

fn write_period(html: &mut String, period: &Period) {
    let _ = write!(html, "<details class=\"period\"><summary>{}</summary><ul>", escape(&period.label));
    for t in &period.traits {
        let _ = write!(html, "<li>{}: {}</li>", escape(&t.label), escape(&t.value));
    }
    html.push_str("</ul></details>");
}

fn write_editor(html: &mut String, kind: EntityKind, filename: &str, form: &EditorForm) {
    let href = document_href(kind, filename);
    let _ = write!(
        html,
        "<form method=\"post\" action=\"{}\">\
         <textarea name=\"content\" rows=\"20\" spellcheck=\"false\">{}</textarea>\
         <button type=\"submit\">Save</button>",
        href,
        escape(&form.text)
    );
    if form.show_download {
        let _ = write!(
            html,
            "<button type=\"submit\" formaction=\"{}/download\">Download</button>",
            href
        );
    }
    html.push_str("</form>");
}
