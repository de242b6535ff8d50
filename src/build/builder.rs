use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;

use super::highlight::SyntaxHighlighter;
use super::paths::template_output_path;
use super::render::{MdpressContext, PageContext, RenderError, Renderer, SiteContext};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct BuildResult {
    pub output_dir: PathBuf,
    pub pages: usize,
    pub stylesheet: Option<PathBuf>,
}

pub struct Builder {
    config: Config,
    /// Base path for resolving relative paths (typically the config file's directory)
    base_path: PathBuf,
}

impl Builder {
    pub fn new(config: Config, base_path: PathBuf) -> Self {
        Self { config, base_path }
    }

    pub fn build(&self) -> Result<BuildResult, BuildError> {
        // Build pipeline:
        // 1. Load the template tree and register the markdown filter
        // 2. Render the root template
        // 3. Write the page and the highlight stylesheet

        let highlighter = Arc::new(SyntaxHighlighter::new(&self.config.highlight.theme));

        let templates_path = self.base_path.join(&self.config.templates);
        let renderer = Renderer::new(
            &templates_path,
            Arc::clone(&highlighter),
            self.config.markdown.clone(),
        )?;

        let context = PageContext {
            site: SiteContext {
                name: self.config.site.name.clone(),
                url: self.config.site.url.clone(),
            },
            mdpress: MdpressContext {
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        let html = renderer.render_page(&self.config.site.template, &context)?;

        let output_dir = self.base_path.join(&self.config.site.output);
        std::fs::create_dir_all(&output_dir)?;

        let page_path = template_output_path(&self.config.site.template, &output_dir);
        std::fs::write(&page_path, html)?;

        // Write the theme stylesheet next to the page when configured
        let stylesheet = match &self.config.highlight.stylesheet {
            Some(name) => match highlighter.theme_css() {
                Some(css) => {
                    let css_path = output_dir.join(name);
                    std::fs::write(&css_path, css)?;
                    Some(css_path)
                }
                None => {
                    eprintln!(
                        "Warning: unknown highlight theme '{}', skipping stylesheet",
                        self.config.highlight.theme
                    );
                    None
                }
            },
            None => None,
        };

        Ok(BuildResult {
            output_dir,
            pages: 1,
            stylesheet,
        })
    }
}
