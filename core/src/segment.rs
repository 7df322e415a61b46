//! Output segments and their renderers.
//!
//! A rendering is an ordered list of segments whose texts, concatenated,
//! give the plain output. Emphasized segments mark characters that come from
//! the phonetic transcription rather than from the original spelling.

use serde::{Deserialize, Serialize};

/// A run of output text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

impl Segment {
    /// Text copied through from the original.
    pub fn plain<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    /// Text substituted from the transcription.
    pub fn emphasized<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Element used to wrap emphasized segments in HTML output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlStyle {
    /// Inline element name, e.g. `span` or `em`.
    pub tag: String,
    /// Optional `class` attribute value.
    pub class: Option<String>,
}

impl Default for HtmlStyle {
    fn default() -> Self {
        Self {
            tag: "span".to_string(),
            class: Some("ipa-emphasis".to_string()),
        }
    }
}

impl HtmlStyle {
    fn open_tag(&self) -> String {
        match &self.class {
            Some(class) => format!("<{} class=\"{}\">", self.tag, escape_html(class)),
            None => format!("<{}>", self.tag),
        }
    }

    fn close_tag(&self) -> String {
        format!("</{}>", self.tag)
    }
}

/// Concatenate segment texts verbatim.
pub fn render_plain(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

/// Render segments as an HTML fragment.
///
/// Every segment text is escaped; emphasized segments are wrapped in the
/// style's inline element, others are emitted bare.
pub fn render_html(segments: &[Segment], style: &HtmlStyle) -> String {
    let open = style.open_tag();
    let close = style.close_tag();
    let mut out = String::new();
    for segment in segments {
        if segment.emphasized {
            out.push_str(&open);
            out.push_str(&escape_html(&segment.text));
            out.push_str(&close);
        } else {
            out.push_str(&escape_html(&segment.text));
        }
    }
    out
}

/// Escape `& < > " '` for use in HTML text and attribute values.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rendering_concatenates() {
        let segments = vec![
            Segment::plain("p"),
            Segment::emphasized("ɛ"),
            Segment::plain("rs"),
        ];
        assert_eq!(render_plain(&segments), "pɛrs");
        assert_eq!(render_plain(&[]), "");
    }

    #[test]
    fn html_wraps_only_emphasized() {
        let segments = vec![Segment::plain("b"), Segment::emphasized("ɛ")];
        assert_eq!(
            render_html(&segments, &HtmlStyle::default()),
            "b<span class=\"ipa-emphasis\">ɛ</span>"
        );

        let bare = HtmlStyle {
            tag: "em".to_string(),
            class: None,
        };
        assert_eq!(render_html(&segments, &bare), "b<em>ɛ</em>");
    }

    #[test]
    fn html_escapes_every_segment() {
        let segments = vec![
            Segment::plain("<script>alert(\"x\")</script>"),
            Segment::emphasized("a&b'"),
        ];
        let html = render_html(&segments, &HtmlStyle::default());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&quot;x&quot;"));
        assert!(html.contains(">a&amp;b&#39;<"));
    }
}
