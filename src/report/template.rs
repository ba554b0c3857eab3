//! Template engine for HTML artifact reports
//!
//! Uses Tera templates (Jinja2-like). Templates ending in `.html` are
//! autoescaped; columns listed in `ArtifactTable::raw_columns` are passed
//! through the `safe` filter so embedded Takeout HTML renders as markup.

use serde::Serialize;
use std::path::Path;
use tera::{Context, Tera};

use super::types::ArtifactReport;
use crate::error::ArtifactResult;

/// Name of the artifact report template
pub const ARTIFACT_TEMPLATE: &str = "artifact.html";

/// Default HTML artifact template
const DEFAULT_ARTIFACT_TEMPLATE: &str = include_str!("templates/artifact.html");

#[derive(Serialize)]
struct Cell<'a> {
    value: &'a str,
    raw: bool,
}

/// Template engine for rendering artifact reports
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in template
    pub fn new() -> ArtifactResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(ARTIFACT_TEMPLATE, DEFAULT_ARTIFACT_TEMPLATE)?;
        Ok(Self { tera })
    }

    /// Create a template engine loading templates from a directory
    pub fn with_directory(template_dir: impl AsRef<Path>) -> ArtifactResult<Self> {
        let glob_pattern = format!("{}/**/*", template_dir.as_ref().display());
        let mut tera = Tera::new(&glob_pattern)?;

        // Built-in template as fallback
        if !tera.get_template_names().any(|n| n == ARTIFACT_TEMPLATE) {
            tera.add_raw_template(ARTIFACT_TEMPLATE, DEFAULT_ARTIFACT_TEMPLATE)?;
        }

        Ok(Self { tera })
    }

    /// Render a report to a complete HTML document
    pub fn render_html(&self, report: &ArtifactReport) -> ArtifactResult<String> {
        let context = Self::build_context(report);
        let rendered = self.tera.render(ARTIFACT_TEMPLATE, &context)?;
        Ok(rendered)
    }

    fn build_context(report: &ArtifactReport) -> Context {
        let table = &report.table;
        let rows: Vec<Vec<Cell<'_>>> = table
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(i, value)| Cell {
                        value: value.as_str(),
                        raw: table.is_raw(i),
                    })
                    .collect()
            })
            .collect();
        let sources: Vec<String> = report
            .sources
            .iter()
            .map(|p| p.display().to_string())
            .collect();

        let mut context = Context::new();
        context.insert("title", &report.title);
        context.insert("description", &report.description);
        context.insert("sources", &sources);
        context.insert("headers", &table.headers);
        context.insert("rows", &rows);
        context.insert("row_count", &table.len());
        context.insert("generated_at", &chrono::Utc::now().to_rfc3339());
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::ArtifactTable;
    use std::path::PathBuf;

    fn report(raw: bool) -> ArtifactReport {
        let mut table = ArtifactTable {
            headers: vec!["HTML File".to_string()],
            rows: vec![vec!["<b>hi</b>".to_string()]],
            raw_columns: Vec::new(),
        };
        if raw {
            table = table.with_raw_column("HTML File");
        }
        ArtifactReport {
            title: "Google Takeout - My Activity - YouTube".to_string(),
            file_name: "My Activity - YouTube".to_string(),
            description: "MyActivity.html file for the YouTube service.".to_string(),
            sources: vec![PathBuf::from("/x/My Activity/YouTube/MyActivity.html")],
            table,
        }
    }

    #[test]
    fn test_template_engine_creation() {
        assert!(TemplateEngine::new().is_ok());
    }

    #[test]
    fn test_raw_column_is_not_escaped() {
        let engine = TemplateEngine::new().unwrap();
        let html = engine.render_html(&report(true)).unwrap();
        assert!(html.contains("<td><b>hi</b></td>"));
        assert!(html.contains("Google Takeout - My Activity - YouTube"));
    }

    #[test]
    fn test_plain_column_is_escaped() {
        let engine = TemplateEngine::new().unwrap();
        let html = engine.render_html(&report(false)).unwrap();
        assert!(!html.contains("<td><b>hi</b></td>"));
        assert!(html.contains("&lt;b&gt;hi&lt;"));
    }

    #[test]
    fn test_directory_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(ARTIFACT_TEMPLATE),
            "CUSTOM {{ title }} {{ row_count }}",
        )
        .unwrap();

        let engine = TemplateEngine::with_directory(dir.path()).unwrap();
        let html = engine.render_html(&report(true)).unwrap();
        assert_eq!(html, "CUSTOM Google Takeout - My Activity - YouTube 1");
    }
}
