//! Portfolio rendering — maps a `ResumeRecord` onto a compiled HTML template.
//!
//! Templates are compiled in (askama) and looked up by identifier. All
//! interpolated resume text is HTML-escaped by the engine; templates must never
//! mark record fields `|safe`.

use askama::Template;
use chrono::{Datelike, Utc};
use thiserror::Error;
use tracing::{debug, error};

use crate::models::resume::ResumeRecord;

pub const DEFAULT_TEMPLATE: &str = "generated_portfolio_template";
pub const MINIMAL_TEMPLATE: &str = "minimal_portfolio_template";

/// Every identifier `render` accepts.
pub const TEMPLATE_IDS: &[&str] = &[DEFAULT_TEMPLATE, MINIMAL_TEMPLATE];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Could not generate portfolio. Template '{0}' not found.")]
    TemplateNotFound(String),

    #[error("Could not generate portfolio. Template '{template}' rendering failed.")]
    Render {
        template: String,
        #[source]
        source: askama::Error,
    },
}

#[derive(Template)]
#[template(path = "generated_portfolio_template.html")]
struct GeneratedPortfolio<'a> {
    data: &'a ResumeRecord,
    current_year: i32,
}

#[derive(Template)]
#[template(path = "minimal_portfolio_template.html")]
struct MinimalPortfolio<'a> {
    data: &'a ResumeRecord,
    current_year: i32,
}

/// Renders records with a configured default template.
#[derive(Debug, Clone)]
pub struct PortfolioRenderer {
    default_template: String,
}

impl Default for PortfolioRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl PortfolioRenderer {
    pub fn new(default_template: impl Into<String>) -> Self {
        Self {
            default_template: default_template.into(),
        }
    }

    /// Accepts identifiers with or without the `.html` suffix.
    pub fn has_template(template_id: &str) -> bool {
        TEMPLATE_IDS.contains(&normalize_id(template_id))
    }

    /// Renders with the default template for the current year.
    pub fn render(&self, record: &ResumeRecord) -> Result<String, RenderError> {
        self.render_template(record, &self.default_template)
    }

    pub fn render_template(
        &self,
        record: &ResumeRecord,
        template_id: &str,
    ) -> Result<String, RenderError> {
        self.render_for_year(record, template_id, Utc::now().year())
    }

    /// Pure function of `(record, template_id, current_year)`.
    pub fn render_for_year(
        &self,
        record: &ResumeRecord,
        template_id: &str,
        current_year: i32,
    ) -> Result<String, RenderError> {
        let rendered = match normalize_id(template_id) {
            DEFAULT_TEMPLATE => GeneratedPortfolio {
                data: record,
                current_year,
            }
            .render(),
            MINIMAL_TEMPLATE => MinimalPortfolio {
                data: record,
                current_year,
            }
            .render(),
            _ => {
                error!("Portfolio template '{template_id}' not found");
                return Err(RenderError::TemplateNotFound(template_id.to_string()));
            }
        };

        rendered
            .map(|html| {
                debug!("Rendered portfolio '{template_id}' ({} bytes)", html.len());
                html
            })
            .map_err(|source| {
                error!("Error rendering template {template_id}: {source}");
                RenderError::Render {
                    template: template_id.to_string(),
                    source,
                }
            })
    }
}

fn normalize_id(template_id: &str) -> &str {
    let id = template_id.trim();
    id.strip_suffix(".html").unwrap_or(id)
}
