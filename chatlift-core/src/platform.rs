//! Platform classification for saved chat pages.

use std::fmt;

use once_cell::sync::Lazy;
use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::page::Page;

static CLAUDE_MESSAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.font-claude-message").expect("claude marker selector"));

static POE_MESSAGE_PAIR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.ChatMessagesView_messagePair__ZEXUz").expect("poe marker selector")
});

const CHATGPT_HOST: &str = "chatgpt.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "ChatGPT")]
    ChatGpt,
    Claude,
    Poe,
    Unknown,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::ChatGpt => "ChatGPT",
            Platform::Claude => "Claude",
            Platform::Poe => "Poe",
            Platform::Unknown => "Unknown",
        }
    }

    /// Classify a page.
    ///
    /// Checked in fixed priority order, first match wins: the Claude message
    /// marker, then the ChatGPT host, then the Poe message-pair marker. A
    /// page can satisfy several weak signals at once; the ordering keeps the
    /// outcome deterministic and must not be rearranged.
    pub fn detect(page: &Page) -> Platform {
        if page.has_match(&CLAUDE_MESSAGE) {
            Platform::Claude
        } else if page.host() == Some(CHATGPT_HOST) {
            Platform::ChatGpt
        } else if page.has_match(&POE_MESSAGE_PAIR) {
            Platform::Poe
        } else {
            Platform::Unknown
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
