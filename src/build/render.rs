use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tera::{Context, Tera, Value};

use super::highlight::SyntaxHighlighter;
use super::markdown::render_markdown;
use crate::config::MarkdownConfig;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("template directory not found: {0}")]
    TemplatesNotFound(String),
}

/// The template renderer, wrapping Tera.
///
/// The markdown pipeline is registered as a `markdown` filter, so template
/// text can convert markdown inline (`{{ intro | markdown }}`) or as a
/// block (`{% filter markdown %} … {% endfilter %}`).
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Create a new renderer loading templates from the given directory.
    pub fn new(
        templates_path: &Path,
        highlighter: Arc<SyntaxHighlighter>,
        markdown_config: MarkdownConfig,
    ) -> Result<Self, RenderError> {
        if !templates_path.exists() {
            return Err(RenderError::TemplatesNotFound(
                templates_path.display().to_string(),
            ));
        }

        let glob = templates_path.join("**/*.html");
        let glob_str = glob.to_string_lossy();
        let mut tera = Tera::new(&glob_str)?;

        tera.register_filter(
            "markdown",
            MarkdownFilter {
                highlighter,
                markdown_config,
            },
        );

        Ok(Self { tera })
    }

    /// Render the named template with the given context.
    pub fn render_page(
        &self,
        template: &str,
        context: &PageContext,
    ) -> Result<String, RenderError> {
        let mut tera_context = Context::new();
        tera_context.insert("site", &context.site);
        tera_context.insert("mdpress", &context.mdpress);

        Ok(self.tera.render(template, &tera_context)?)
    }
}

/// Tera filter adapting the markdown pipeline.
///
/// Takes the raw markdown string and ignores filter arguments. The output is
/// marked safe so the produced HTML is not re-escaped by Tera.
struct MarkdownFilter {
    highlighter: Arc<SyntaxHighlighter>,
    markdown_config: MarkdownConfig,
}

impl tera::Filter for MarkdownFilter {
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        let markdown = value
            .as_str()
            .ok_or_else(|| tera::Error::msg("the markdown filter expects a string"))?;

        let html = render_markdown(markdown, &self.highlighter, &self.markdown_config)
            .map_err(|e| tera::Error::msg(e.to_string()))?;

        Ok(Value::String(html))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Context passed to the root template.
#[derive(Debug, Serialize)]
pub struct PageContext {
    pub site: SiteContext,
    pub mdpress: MdpressContext,
}

/// Site-level information, available as `site.*` in templates.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub name: String,
    pub url: Option<String>,
}

/// Information about mdpress itself, available as `mdpress.*`.
#[derive(Debug, Clone, Serialize)]
pub struct MdpressContext {
    pub version: String,
}
