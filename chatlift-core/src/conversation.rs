//! Message extraction: one traversal routine per supported platform.
//!
//! Each extractor locates the platform's top-level message containers,
//! pairs every container with a speaker role, descends to the actual
//! content node, and converts its inner HTML on the spot. Zero matching
//! containers is a normal outcome, not a fault.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use crate::error::{ExportError, Result};
use crate::page::Page;
use crate::platform::Platform;
use crate::render::Format;

// Tailwind-style class tokens containing '/' or '[]' cannot appear in a bare
// class selector, so those are matched as whitespace-separated attribute
// tokens instead.
static CHATGPT_TURN: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"div[class~="group/conversation-turn"]"#).expect("chatgpt turn selector")
});

static CHATGPT_AGENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".agent-turn").expect("chatgpt agent selector"));

static CHATGPT_CONTENT: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(
        r#"[class~="min-h-8"][class~="text-message"], [class~="min-h-[20px]"][class~="text-message"]"#,
    )
    .expect("chatgpt content selector")
});

static CLAUDE_TURN: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.font-user-message, div.font-claude-message")
        .expect("claude turn selector")
});

static DIV: Lazy<Selector> = Lazy::new(|| Selector::parse("div").expect("div selector"));

static POE_PAIR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.ChatMessagesView_messagePair__ZEXUz").expect("poe pair selector")
});

static POE_USER_WRAPPER: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.ChatMessage_rightSideMessageWrapper__r0roB").expect("poe user selector")
});

static POE_MESSAGE_WRAPPER: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.ChatMessage_messageWrapper__4Ugd6").expect("poe reply selector")
});

static POE_MARKDOWN: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.Markdown_markdownContainer__Tz3HQ").expect("poe markdown selector")
});

const CLAUDE_USER_CLASS: &str = "font-user-message";
const POE_USER_CLASS: &str = "ChatMessage_rightSideMessageWrapper__r0roB";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Ai,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "User",
            Speaker::Ai => "AI",
        }
    }
}

/// One conversation turn: speaker plus content already converted to the
/// requested output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub speaker: Speaker,
    pub text: String,
}

impl Message {
    fn converted(speaker: Speaker, fragment: &str, format: Format) -> Self {
        Self {
            speaker,
            text: format.converter().convert(fragment),
        }
    }

    /// Empty and single-character turns are noise from whitespace-only nodes.
    fn is_substantial(&self) -> bool {
        self.text.chars().count() > 1
    }
}

/// Extract all messages for the detected platform, in document order.
///
/// Conversion happens here, at extraction time; downstream stages only see
/// converted text. An unknown platform yields an empty sequence.
pub fn extract_messages(page: &Page, platform: Platform, format: Format) -> Result<Vec<Message>> {
    match platform {
        Platform::ChatGpt => Ok(extract_chatgpt(page, format)),
        Platform::Claude => extract_claude(page, format),
        Platform::Poe => Ok(extract_poe(page, format)),
        Platform::Unknown => Ok(Vec::new()),
    }
}

fn extract_chatgpt(page: &Page, format: Format) -> Vec<Message> {
    page.select(&CHATGPT_TURN)
        .filter_map(|turn| {
            let speaker = if turn.select(&CHATGPT_AGENT).next().is_some() {
                Speaker::Ai
            } else {
                Speaker::User
            };
            // Turns without a content node (tool banners and the like) are
            // skipped rather than treated as faults.
            let content = turn.select(&CHATGPT_CONTENT).next()?;
            Some(Message::converted(speaker, &content.inner_html(), format))
        })
        .filter(Message::is_substantial)
        .collect()
}

fn extract_claude(page: &Page, format: Format) -> Result<Vec<Message>> {
    let mut messages = Vec::new();
    for container in page.select(&CLAUDE_TURN) {
        let speaker = if has_class(container, CLAUDE_USER_CLASS) {
            Speaker::User
        } else {
            Speaker::Ai
        };
        let fragment = match speaker {
            Speaker::User => container.inner_html(),
            // AI turns nest the actual prose one div down.
            Speaker::Ai => container
                .select(&DIV)
                .next()
                .ok_or(ExportError::MissingContent { platform: "Claude" })?
                .inner_html(),
        };
        messages.push(Message::converted(speaker, &fragment, format));
    }
    Ok(messages
        .into_iter()
        .filter(Message::is_substantial)
        .collect())
}

fn extract_poe(page: &Page, format: Format) -> Vec<Message> {
    let mut messages = Vec::new();
    // One user message may pair with several AI responses in a single
    // visual grouping.
    for pair in page.select(&POE_PAIR) {
        if let Some(user) = pair.select(&POE_USER_WRAPPER).next() {
            if let Some(content) = user.select(&POE_MARKDOWN).next() {
                messages.push(Message::converted(
                    Speaker::User,
                    &content.inner_html(),
                    format,
                ));
            }
        }
        let replies = pair
            .select(&POE_MESSAGE_WRAPPER)
            .filter(|wrapper| !has_class(*wrapper, POE_USER_CLASS));
        for reply in replies {
            if let Some(content) = reply.select(&POE_MARKDOWN).next() {
                messages.push(Message::converted(
                    Speaker::Ai,
                    &content.inner_html(),
                    format,
                ));
            }
        }
    }
    messages
        .into_iter()
        .filter(Message::is_substantial)
        .collect()
}

fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}
