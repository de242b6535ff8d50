//! Markdown rendering with syntax-highlighted code frames.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};

use super::code::CodeBlock;
use super::highlight::SyntaxHighlighter;
use crate::config::MarkdownConfig;

#[derive(thiserror::Error, Debug)]
pub enum MarkdownError {
    #[error("invalid markdown extension: {0}")]
    InvalidExtension(String),
}

/// Render markdown to HTML using pulldown-cmark with syntax highlighting.
///
/// Fenced code blocks are lifted into [`CodeBlock`] nodes, annotated by the
/// highlighter, and rendered through the code-frame rule; every other node
/// type keeps pulldown-cmark's default HTML output. The highlighter and
/// config are read-only, so one configuration can serve any number of calls.
pub fn render_markdown(
    markdown: &str,
    highlighter: &SyntaxHighlighter,
    markdown_config: &MarkdownConfig,
) -> Result<String, MarkdownError> {
    let mut options = Options::empty();
    for extension in &markdown_config.extensions {
        match extension.as_str() {
            "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
            "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
            "gfm" => options.insert(Options::ENABLE_GFM),
            "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
            "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
            "tables" => options.insert(Options::ENABLE_TABLES),
            "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
            other => return Err(MarkdownError::InvalidExtension(other.to_string())),
        }
    }

    let parser = Parser::new_ext(markdown, options);

    // Process events, intercepting code blocks for the code-frame rule
    let mut in_code_block = false;
    let mut code_language: Option<String> = None;
    let mut code_content = String::new();

    let events: Vec<Event> = parser
        .flat_map(|event| match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                code_language = match kind {
                    CodeBlockKind::Fenced(info) => fence_tag(&info),
                    CodeBlockKind::Indented => None,
                };
                code_content.clear();
                vec![] // Don't emit the start tag
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                let mut value = std::mem::take(&mut code_content);
                // The parser includes the newline before the closing fence
                if value.ends_with('\n') {
                    value.pop();
                }
                let mut block = CodeBlock::new(code_language.take(), value);
                block.annotate(highlighter);
                vec![Event::Html(block.to_html().into())]
            }
            Event::Text(text) if in_code_block => {
                code_content.push_str(&text);
                vec![]
            }
            _ => vec![event],
        })
        .collect();

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());

    Ok(html_output)
}

/// The language tag of a fence: the first whitespace-separated word of the
/// info string, `None` for a bare fence.
fn fence_tag(info: &str) -> Option<String> {
    info.split_whitespace().next().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> String {
        let highlighter = SyntaxHighlighter::default();
        let config = MarkdownConfig::default();
        render_markdown(markdown, &highlighter, &config).unwrap()
    }

    #[test]
    fn test_render_basic_markdown() {
        let output = render("# Hello\n\nWorld");

        assert!(output.contains("Hello"));
        assert!(output.contains("<p>World</p>"));
    }

    #[test]
    fn test_untagged_code_block() {
        let output = render("```\nplain text\n```");

        assert!(output.contains("<pre><code>plain text</code></pre>"));
        assert!(!output.contains("hljs"));
        assert!(!output.contains("code-lang"));
    }

    #[test]
    fn test_indented_code_block() {
        let output = render("    indented code\n");

        assert!(output.contains("<pre><code>indented code</code></pre>"));
        assert!(!output.contains("hljs"));
    }

    #[test]
    fn test_tagged_code_block() {
        let output = render("```rust\nfn main() {}\n```");

        assert!(output.contains("class=\"hljs language-rust\""));
        assert!(output.contains("main"));
        assert!(!output.contains("code-lang"));
        assert!(!output.contains("data-filename"));
    }

    #[test]
    fn test_filename_tagged_code_block() {
        let output = render("```rust:src/main.rs\nfn main() {}\n```");

        assert!(output.contains("<div class=\"code-lang\">src/main.rs</div>"));
        assert!(output.contains("class=\"hljs language-rust\""));
        assert!(output.contains("data-filename=\"src/main.rs\""));
    }

    #[test]
    fn test_unknown_language_never_errors() {
        let output = render("```notareallanguage\nsome code\n```");

        // The attempted key still labels the block
        assert!(output.contains("language-notareallanguage"));
        assert!(output.contains("some"));
    }

    #[test]
    fn test_empty_filename_tag() {
        let output = render("```js:\nconst x = 1;\n```");

        assert!(output.contains("language-js"));
        assert!(!output.contains("code-lang"));
        assert!(!output.contains("data-filename"));
    }

    #[test]
    fn test_code_frame_shape() {
        let output = render("```js:app.js\nconst x = 1;\n```");

        assert!(output.starts_with(
            "<div class=\"code-frame\">\n<div class=\"code-lang\">app.js</div>\n\
             <pre><code class=\"hljs language-js\" data-filename=\"app.js\">"
        ));
        assert!(output.contains("const"));
        assert!(output.trim_end().ends_with("</code></pre>\n</div>"));
    }

    #[test]
    fn test_repeated_renders_are_identical() {
        let input = "# Title\n\n```rust:lib.rs\npub fn id(x: u8) -> u8 { x }\n```\n";
        assert_eq!(render(input), render(input));
    }

    #[test]
    fn test_invalid_extension() {
        let highlighter = SyntaxHighlighter::default();
        let config = MarkdownConfig {
            extensions: vec!["not_a_real_extension".to_string()],
        };

        let result = render_markdown("# Test", &highlighter, &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_gfm_table() {
        let output = render("| a | b |\n| - | - |\n| 1 | 2 |");

        assert!(output.contains("<table>"));
    }
}
