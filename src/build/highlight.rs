use autumnus::{HtmlLinkedBuilder, formatter::Formatter, languages::Language, themes};

/// A syntax highlighter using autumnus (tree-sitter based).
pub struct SyntaxHighlighter {
    /// Theme name for CSS generation (used by theme_css).
    theme_name: String,
}

/// Why an explicit highlight attempt produced no output.
#[derive(Debug)]
enum HighlightFailure {
    /// The fence key did not name a known language.
    UnknownLanguage,
    /// The formatter could not produce output for the resolved language.
    Formatter,
}

impl SyntaxHighlighter {
    /// Create a new syntax highlighter with the given theme.
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme_name: theme_name.to_string(),
        }
    }

    /// Highlight code for the given fence key, returning span markup only
    /// (no `<pre>`/`<code>` wrapper).
    ///
    /// An unknown key or a formatter failure falls back to automatic
    /// detection over the source text; this never fails and never drops
    /// content.
    pub fn highlight(&self, key: &str, code: &str) -> String {
        match self.try_highlight(key, code) {
            Ok(fragment) => fragment,
            Err(_) => self.detect_and_highlight(code),
        }
    }

    /// Attempt to highlight with an explicitly requested language key.
    fn try_highlight(&self, key: &str, code: &str) -> Result<String, HighlightFailure> {
        // Language::guess falls back to PlainText for unrecognized keys
        let lang = Language::guess(key, code);
        if matches!(lang, Language::PlainText) && key != "plaintext" && key != "text" {
            return Err(HighlightFailure::UnknownLanguage);
        }

        format_fragment(code, lang).ok_or(HighlightFailure::Formatter)
    }

    /// Highlight with automatic language detection over the source text.
    /// Falls back to escaped plain text when nothing can be produced.
    fn detect_and_highlight(&self, code: &str) -> String {
        let lang = Language::guess("", code);
        format_fragment(code, lang).unwrap_or_else(|| html_escape(code))
    }

    /// Generate CSS for the current theme.
    pub fn theme_css(&self) -> Option<String> {
        let theme = themes::get(&self.theme_name).ok()?;
        Some(theme.css(false)) // false = don't enable italic
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new("github-dark")
    }
}

/// Run the formatter and slice out the span markup.
fn format_fragment(code: &str, lang: Language) -> Option<String> {
    let formatter = HtmlLinkedBuilder::new().source(code).lang(lang).build().ok()?;

    let mut output: Vec<u8> = Vec::new();
    formatter.format(&mut output).ok()?;
    let html = String::from_utf8(output).ok()?;

    code_fragment(&html).map(str::to_string)
}

/// Slice the span markup out of the formatter's `<pre><code …>…</code></pre>`
/// wrapper. Returns `None` when the output is not in that shape.
fn code_fragment(html: &str) -> Option<&str> {
    let open = html.find("<code")?;
    let start = open + html[open..].find('>')? + 1;
    let end = html.rfind("</code>")?;
    (start <= end).then(|| &html[start..end])
}

/// Escape HTML special characters.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
