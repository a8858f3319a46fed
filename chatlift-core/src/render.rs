//! Output formats and the fragment converters.
//!
//! Conversion is pattern substitution over the fragment string, not a DOM
//! walk. Deeply nested or malformed markup degrades best-effort; the exact
//! output of these substitutions is part of the observable contract, so the
//! converters must not be upgraded to a real HTML parser.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::conversation::{Message, Speaker};
use crate::platform::Platform;

static UL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<ul\b[^>]*>(.*?)</ul>").expect("ul regex"));
static LI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<li\b[^>]*>(.*?)</li>").expect("li regex"));
static P_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").expect("p regex"));
static BR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("br regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag regex"));
static ATTR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(\w+)\s+[^>]*>").expect("attr regex"));
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Markdown,
    Html,
    PlainText,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Markdown => "markdown",
            Format::Html => "html",
            Format::PlainText => "plaintext",
        }
    }

    pub fn converter(&self) -> &'static dyn Converter {
        match self {
            Format::Markdown => &MarkdownConverter,
            Format::Html => &HtmlConverter,
            Format::PlainText => &PlainTextConverter,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output representation: fragment conversion plus the document header
/// and per-message templates it owns.
pub trait Converter {
    fn convert(&self, fragment: &str) -> String;
    fn metadata(&self, url: &str, platform: Platform) -> String;
    fn render_message(&self, speaker: Speaker, text: &str) -> String;
    fn file_extension(&self) -> &'static str;
}

pub struct MarkdownConverter;
pub struct HtmlConverter;
pub struct PlainTextConverter;

impl Converter for MarkdownConverter {
    fn convert(&self, fragment: &str) -> String {
        flatten_fragment(fragment)
    }

    fn metadata(&self, url: &str, platform: Platform) -> String {
        format!(
            "# Conversation extracted from {url}\n**Platform:** {platform}\n**Format:** markdown\n\n"
        )
    }

    fn render_message(&self, speaker: Speaker, text: &str) -> String {
        format!("## {}:\n{text}\n\n", speaker.as_str())
    }

    fn file_extension(&self) -> &'static str {
        "md"
    }
}

impl Converter for HtmlConverter {
    fn convert(&self, fragment: &str) -> String {
        simplify_fragment(fragment)
    }

    fn metadata(&self, url: &str, platform: Platform) -> String {
        format!(
            "<h1>Conversation extracted from {url}</h1><p><strong>Platform:</strong> {platform}</p><p><strong>Format:</strong> html</p>"
        )
    }

    fn render_message(&self, speaker: Speaker, text: &str) -> String {
        format!("<h2>{}:</h2><div>{text}</div>", speaker.as_str())
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }
}

impl Converter for PlainTextConverter {
    fn convert(&self, fragment: &str) -> String {
        flatten_fragment(fragment)
    }

    fn metadata(&self, url: &str, platform: Platform) -> String {
        format!("Conversation extracted from {url}\nPlatform: {platform}\nFormat: plaintext\n\n")
    }

    fn render_message(&self, speaker: Speaker, text: &str) -> String {
        format!("{}:\n{text}\n\n", speaker.as_str())
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}

/// Lossy HTML -> text flattening shared by the Markdown and plain-text
/// converters: list items become `- ` lines, paragraphs become blank-line
/// separated blocks, `<br>` becomes a newline, remaining tags are stripped.
fn flatten_fragment(fragment: &str) -> String {
    let lists = UL_RE.replace_all(fragment, |caps: &Captures<'_>| {
        LI_RE.replace_all(&caps[1], "- $1\n").into_owned()
    });
    let paragraphs = P_RE.replace_all(&lists, "$1\n\n");
    let lines = BR_RE.replace_all(&paragraphs, "\n");
    TAG_RE.replace_all(&lines, "").trim().to_string()
}

/// Keep the tag structure but drop every attribute and collapse whitespace
/// runs to single spaces.
fn simplify_fragment(fragment: &str) -> String {
    let bare = ATTR_RE.replace_all(fragment, "<$1>");
    WS_RE.replace_all(&bare, " ").trim().to_string()
}

/// Render the full document: the converter's header followed by every
/// message through its per-message template.
pub fn assemble_document(
    url: &str,
    platform: Platform,
    messages: &[Message],
    format: Format,
) -> String {
    let converter = format.converter();
    let mut content = converter.metadata(url, platform);
    for message in messages {
        content.push_str(&converter.render_message(message.speaker, &message.text));
    }
    content
}

/// `conversation_<ISO-8601 timestamp with ':' and '.' replaced by '-'>.<ext>`
pub fn download_filename(at: DateTime<Utc>, format: Format) -> String {
    let stamp = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(':', "-")
        .replace('.', "-");
    format!("conversation_{stamp}.{}", format.converter().file_extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_turns_lists_into_dashed_lines() {
        assert_eq!(
            flatten_fragment("<ul><li>alpha</li><li>beta</li></ul>"),
            "- alpha\n- beta"
        );
    }

    #[test]
    fn flatten_separates_paragraphs_and_breaks() {
        assert_eq!(flatten_fragment("<p>one</p><p>two</p>"), "one\n\ntwo");
        assert_eq!(flatten_fragment("a<br>b<br/>c"), "a\nb\nc");
    }

    #[test]
    fn flatten_strips_remaining_tags() {
        assert_eq!(flatten_fragment("<div><span>World</span></div>"), "World");
        assert_eq!(flatten_fragment("<p>x <b>y</b></p>"), "x y");
    }

    #[test]
    fn flatten_is_a_no_op_on_tag_free_text() {
        let converted = flatten_fragment("already plain\n\n- line");
        assert_eq!(flatten_fragment(&converted), converted);
    }

    #[test]
    fn simplify_drops_attributes_but_keeps_tags() {
        assert_eq!(
            simplify_fragment(r#"<div class="a b" data-x="1">Hello   there</div>"#),
            "<div>Hello there</div>"
        );
    }

    #[test]
    fn simplify_collapses_whitespace_idempotently() {
        let once = simplify_fragment("a \t b\n\nc");
        assert_eq!(once, "a b c");
        assert_eq!(simplify_fragment(&once), once);
    }

    #[test]
    fn markdown_templates_match_the_contract() {
        let converter = Format::Markdown.converter();
        assert_eq!(
            converter.metadata("https://claude.ai/chat/1", Platform::Claude),
            "# Conversation extracted from https://claude.ai/chat/1\n**Platform:** Claude\n**Format:** markdown\n\n"
        );
        assert_eq!(
            converter.render_message(Speaker::User, "Hello"),
            "## User:\nHello\n\n"
        );
    }

    #[test]
    fn plaintext_templates_use_bare_speaker_lines() {
        let converter = Format::PlainText.converter();
        assert_eq!(
            converter.metadata("u", Platform::Poe),
            "Conversation extracted from u\nPlatform: Poe\nFormat: plaintext\n\n"
        );
        assert_eq!(converter.render_message(Speaker::Ai, "A1"), "AI:\nA1\n\n");
    }

    #[test]
    fn html_templates_wrap_in_headings_and_divs() {
        let converter = Format::Html.converter();
        assert_eq!(
            converter.metadata("u", Platform::ChatGpt),
            "<h1>Conversation extracted from u</h1><p><strong>Platform:</strong> ChatGPT</p><p><strong>Format:</strong> html</p>"
        );
        assert_eq!(
            converter.render_message(Speaker::User, "hi"),
            "<h2>User:</h2><div>hi</div>"
        );
    }

    #[test]
    fn file_extensions_follow_the_format() {
        assert_eq!(Format::Markdown.converter().file_extension(), "md");
        assert_eq!(Format::Html.converter().file_extension(), "html");
        assert_eq!(Format::PlainText.converter().file_extension(), "txt");
    }
}
