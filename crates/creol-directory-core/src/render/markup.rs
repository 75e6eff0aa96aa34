//! Structured HTML fragment builder.
//!
//! `Markup` is the only way the renderer produces HTML. Text and attribute
//! values are always escaped; the sole way to emit tags from remote data is
//! an [`InlineMarkup`] value, which can only be obtained by running the
//! inline sanitizer. Element and attribute names are `&'static str`, so they
//! can never come from remote input.

use std::fmt;

use super::sanitize::sanitize_inline;

/// Escape text for use in HTML content or a quoted attribute value.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// A finished, safe-to-embed HTML fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Html(String);

impl Html {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Html> for String {
    fn from(html: Html) -> Self {
        html.0
    }
}

/// Remote text that may carry a constrained subset of inline formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMarkup(String);

impl InlineMarkup {
    /// Reduce `raw` to the allowed inline tags; everything else is escaped or removed.
    pub fn sanitize(raw: &str) -> Self {
        Self(sanitize_inline(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Incremental HTML writer.
#[derive(Debug, Default)]
pub struct Markup {
    buf: String,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `<tag attrs>`, the body, then `</tag>`.
    pub fn element(
        &mut self,
        tag: &'static str,
        attrs: &[(&'static str, &str)],
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.open_tag(tag, attrs);
        body(self);
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    /// Write an element whose whole body is escaped text.
    pub fn text_element(
        &mut self,
        tag: &'static str,
        attrs: &[(&'static str, &str)],
        text: &str,
    ) -> &mut Self {
        self.element(tag, attrs, |m| {
            m.text(text);
        })
    }

    /// Write a void element such as `<img>`.
    pub fn void(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) -> &mut Self {
        self.open_tag(tag, attrs);
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(&escape_html(text));
        self
    }

    pub fn inline(&mut self, markup: &InlineMarkup) -> &mut Self {
        self.buf.push_str(markup.as_str());
        self
    }

    pub fn finish(self) -> Html {
        Html(self.buf)
    }

    fn open_tag(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape_html(value));
            self.buf.push('"');
        }
        self.buf.push('>');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">O'Neil & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;O&#039;Neil &amp; co&lt;/a&gt;"
        );
    }

    #[test]
    fn test_element_escapes_text_and_attributes() {
        let mut m = Markup::new();
        m.element("div", &[("class", "card"), ("title", "\"quoted\"")], |m| {
            m.text("<b>bold?</b>");
        });
        assert_eq!(
            m.finish().as_str(),
            "<div class=\"card\" title=\"&quot;quoted&quot;\">&lt;b&gt;bold?&lt;/b&gt;</div>"
        );
    }

    #[test]
    fn test_inline_passes_sanitized_markup() {
        let position = InlineMarkup::sanitize("Professor <em>Emeritus</em><script>x</script>");
        let mut m = Markup::new();
        m.element("div", &[], |m| {
            m.inline(&position);
        });
        assert_eq!(m.finish().as_str(), "<div>Professor <em>Emeritus</em></div>");
    }

    #[test]
    fn test_void_element() {
        let mut outer = Markup::new();
        outer.element("div", &[], |m| {
            m.void("img", &[("src", "https://x.edu/a.jpg"), ("alt", "A")]);
        });
        assert_eq!(
            outer.finish().to_string(),
            "<div><img src=\"https://x.edu/a.jpg\" alt=\"A\"></div>"
        );
    }

    #[test]
    fn test_inline_markup_is_empty_ignores_whitespace() {
        assert!(InlineMarkup::sanitize("  ").is_empty());
        assert!(InlineMarkup::sanitize("<script>x</script>").is_empty());
        assert!(!InlineMarkup::sanitize("<b>x</b>").is_empty());
    }
}
