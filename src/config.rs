//! Configuration loading and types for mdpress.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(std::io::Error),

    #[error("{0}")]
    Deserialize(String),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),
}

/// The top-level configuration, loaded from `mdpress.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site metadata, root template and output location
    pub site: SiteConfig,

    /// Directory holding the Tera template tree, relative to the config file
    #[serde(default = "default_templates_dir")]
    pub templates: String,

    /// Markdown processing settings
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Syntax highlighting settings
    #[serde(default)]
    pub highlight: HighlightConfig,
}

/// Site-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site name, available to templates as `site.name`
    pub name: String,

    /// Canonical URL, available to templates as `site.url`
    #[serde(default)]
    pub url: Option<String>,

    /// The root template a build renders
    #[serde(default = "default_root_template")]
    pub template: String,

    /// Output directory, relative to the config file
    #[serde(default = "default_output_dir")]
    pub output: String,
}

/// Markdown processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Extensions to enable for markdown processing
    #[serde(default = "default_markdown_extensions")]
    pub extensions: Vec<String>,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: default_markdown_extensions(),
        }
    }
}

/// Syntax highlighting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Theme used to generate the highlight stylesheet
    #[serde(default = "default_highlight_theme")]
    pub theme: String,

    /// Stylesheet file written to the output directory; null skips it
    #[serde(default = "default_stylesheet")]
    pub stylesheet: Option<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: default_highlight_theme(),
            stylesheet: default_stylesheet(),
        }
    }
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_root_template() -> String {
    "index.html".to_string()
}

fn default_output_dir() -> String {
    "dist".to_string()
}

fn default_markdown_extensions() -> Vec<String> {
    vec![
        "gfm".to_string(),
        "strikethrough".to_string(),
        "tables".to_string(),
        "tasklists".to_string(),
    ]
}

fn default_highlight_theme() -> String {
    "github-dark".to_string()
}

fn default_stylesheet() -> Option<String> {
    Some("highlight.css".to_string())
}

impl Config {
    /// Load the config from the command line argument, defaulting to `mdpress.yaml`
    pub async fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = config_file.unwrap_or(Path::new("mdpress.yaml"));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        Self::load_from_file(&config_file).await
    }

    /// Load the config from a file path
    pub(crate) async fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(ConfigError::Read)?;
        Self::from_yaml(&content)
    }

    /// Parse a config from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|e| ConfigError::Deserialize(format_config_error(e)))
    }
}

/// Format a config deserialization error with helpful context
fn format_config_error(e: serde_yaml::Error) -> String {
    let msg = e.to_string();

    // Check for common issues and provide specific guidance
    if msg.contains("missing field `site`") {
        return "invalid config: 'site' is required\n\nExample:\n  site:\n    name: My Site"
            .to_string();
    }
    if msg.contains("missing field `name`") {
        return "invalid config: 'site.name' is required".to_string();
    }

    format!("invalid config: {msg}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_defaults() {
        let config = Config::from_yaml("site:\n  name: Test Site\n").unwrap();

        assert_eq!(config.site.name, "Test Site");
        assert_eq!(config.site.url, None);
        assert_eq!(config.site.template, "index.html");
        assert_eq!(config.site.output, "dist");
        assert_eq!(config.templates, "templates");
        assert!(config.markdown.extensions.contains(&"gfm".to_string()));
        assert_eq!(config.highlight.theme, "github-dark");
        assert_eq!(config.highlight.stylesheet, Some("highlight.css".to_string()));
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
site:
  name: Docs
  url: https://docs.example.com
  template: home.html
  output: _site
templates: theme/templates
markdown:
  extensions: [tables]
highlight:
  theme: dracula
  stylesheet: hl.css
"#;
        let config = Config::from_yaml(yaml).unwrap();

        assert_eq!(config.site.url, Some("https://docs.example.com".to_string()));
        assert_eq!(config.site.template, "home.html");
        assert_eq!(config.site.output, "_site");
        assert_eq!(config.templates, "theme/templates");
        assert_eq!(config.markdown.extensions, vec!["tables".to_string()]);
        assert_eq!(config.highlight.theme, "dracula");
        assert_eq!(config.highlight.stylesheet, Some("hl.css".to_string()));
    }

    #[test]
    fn test_missing_site_message() {
        let err = Config::from_yaml("templates: t\n").unwrap_err();
        assert!(err.to_string().contains("'site' is required"));
    }

    #[test]
    fn test_missing_name_message() {
        let err = Config::from_yaml("site:\n  output: dist\n").unwrap_err();
        assert!(err.to_string().contains("'site.name' is required"));
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config::from_yaml("site:\n  name: Round Trip\n").unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let reparsed = Config::from_yaml(&yaml).unwrap();

        assert_eq!(reparsed.site.name, "Round Trip");
        assert_eq!(reparsed.highlight.theme, config.highlight.theme);
    }
}
