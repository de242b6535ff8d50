//! Fenced code blocks and the code-frame rendering rule.
//!
//! Fences support a `language:filename` tag, e.g.:
//!
//! ````text
//! ```rust:src/main.rs
//! fn main() {}
//! ```
//! ````
//!
//! Tagged blocks are annotated with highlighted markup and rendered inside a
//! `<div class="code-frame">` wrapper with an optional filename caption.

use super::highlight::{SyntaxHighlighter, html_escape};

/// A fenced code block lifted out of the markdown event stream.
#[derive(Debug, Clone)]
pub struct CodeBlock {
    /// The fence tag, `None` for indented or bare fenced blocks.
    pub lang: Option<String>,
    /// The fence contents, without the trailing fence newline.
    pub value: String,
    /// Filename extracted from a `language:filename` tag.
    pub filename: Option<String>,
    /// Highlight data attached by [`CodeBlock::annotate`].
    pub annotation: Option<Annotation>,
}

/// Highlight data attached to a code block before rendering.
#[derive(Debug, Clone, Default)]
pub struct Annotation {
    /// Pre-rendered span markup for the code contents.
    pub children: String,
    /// Classes applied to the `<code>` element.
    pub classes: Vec<String>,
    /// Filename carried into a `data-filename` attribute.
    pub data_filename: Option<String>,
}

impl CodeBlock {
    pub fn new(lang: Option<String>, value: String) -> Self {
        Self {
            lang,
            value,
            filename: None,
            annotation: None,
        }
    }

    /// Annotate the block with highlighted markup.
    ///
    /// Untagged blocks are left untouched. For tagged blocks the fence tag is
    /// split into a language key and an optional filename; the highlighter
    /// runs against the key (falling back to detection internally, never
    /// failing) and the result lands in the annotation together with the
    /// `hljs`/`language-*` class pair.
    ///
    /// The class list always names the requested key, even when the
    /// highlighter detected a different language. Filename side effects
    /// (rewriting `lang` to the bare key, setting `filename` and
    /// `data_filename`) only happen when the filename part is non-empty, so
    /// a trailing-colon tag like `js:` behaves like a plain `js` tag.
    pub fn annotate(&mut self, highlighter: &SyntaxHighlighter) {
        let Some(tag) = self.lang.clone() else {
            return;
        };
        if tag.is_empty() {
            return;
        }

        let (key, filename) = split_fence_tag(&tag);
        let fragment = highlighter.highlight(key, &self.value);

        let annotation = self.annotation.get_or_insert_with(Annotation::default);
        annotation.children = fragment;

        let mut classes = Vec::with_capacity(annotation.classes.len() + 2);
        classes.push("hljs".to_string());
        classes.append(&mut annotation.classes);
        classes.push(format!("language-{key}"));
        annotation.classes = classes;

        if !filename.is_empty() {
            self.lang = Some(key.to_string());
            self.filename = Some(filename.to_string());
            annotation.data_filename = Some(filename.to_string());
        }
    }

    /// Render the block as a `<div class="code-frame">` element.
    ///
    /// Layout: an optional `<div class="code-lang">` filename caption
    /// followed by the `<pre><code>` pair. An annotated block carries the
    /// annotation's classes, `data-filename` attribute and highlighted
    /// children; an unannotated block renders a bare `<pre><code>` pair with
    /// the escaped raw text. Newlines separate the frame's children so the
    /// serialized page stays readable.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<div class=\"code-frame\">\n");

        // Empty filenames are treated as absent for display
        if let Some(filename) = self.filename.as_deref().filter(|f| !f.is_empty()) {
            out.push_str("<div class=\"code-lang\">");
            out.push_str(&html_escape(filename));
            out.push_str("</div>\n");
        }

        out.push_str("<pre><code");
        if let Some(annotation) = &self.annotation {
            if !annotation.classes.is_empty() {
                out.push_str(" class=\"");
                out.push_str(&annotation.classes.join(" "));
                out.push('"');
            }
            if let Some(filename) = &annotation.data_filename {
                out.push_str(" data-filename=\"");
                out.push_str(&html_escape(filename));
                out.push('"');
            }
        }
        out.push('>');

        match &self.annotation {
            Some(annotation) => out.push_str(&annotation.children),
            None => out.push_str(&html_escape(&self.value)),
        }

        out.push_str("</code></pre>\n</div>");
        out
    }
}

/// Split a fence tag into its language key and filename suffix.
///
/// The filename is empty when the tag has no colon; colons inside the
/// filename are preserved.
fn split_fence_tag(tag: &str) -> (&str, &str) {
    tag.split_once(':').unwrap_or((tag, ""))
}
