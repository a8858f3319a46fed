//! The extraction pipeline: detect, extract, assemble, deliver.

use chrono::Utc;
use tracing::{debug, warn};

use crate::conversation::extract_messages;
use crate::error::{ExportError, Result};
use crate::page::Page;
use crate::platform::Platform;
use crate::render::{assemble_document, download_filename, Format};

// Downloads are text/plain regardless of format; the extension carries the
// real type.
const DOWNLOAD_MIME: &str = "text/plain";

/// Diagnostic lines accumulated during a run and returned to the caller.
///
/// Advisory only, never parsed. Threaded explicitly through the pipeline
/// instead of living in ambient global state.
#[derive(Debug, Default)]
pub struct RunLog {
    entries: Vec<String>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        debug!("{line}");
        self.entries.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.entries
    }

    pub fn into_lines(self) -> Vec<String> {
        self.entries
    }
}

/// Where the assembled document ends up.
///
/// Implementations must release any transient resource on every exit path,
/// delivered or not.
pub trait DownloadSink {
    fn deliver(&mut self, content: &str, mime: &str, filename: &str) -> std::io::Result<()>;
}

/// Successful run summary, mirrored into the protocol response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub platform: Platform,
    pub message_count: usize,
    pub download_initiated: bool,
}

/// Run the whole pipeline against one page.
///
/// Detection always proceeds to extraction; an unknown platform yields an
/// empty sequence and therefore `NoMessages`. A failing sink does not fail
/// the run; the report records that the download never started.
pub fn extract_conversation(
    page: &Page,
    format: Format,
    sink: &mut dyn DownloadSink,
    log: &mut RunLog,
) -> Result<ExtractionReport> {
    let platform = Platform::detect(page);
    log.push(format!("Platform detected: {platform}"));
    log.push(format!("Format selected: {format}"));

    let messages = extract_messages(page, platform, format)?;
    if messages.is_empty() {
        return Err(ExportError::NoMessages);
    }
    log.push(format!("Extracted {} message(s)", messages.len()));

    let content = assemble_document(page.url(), platform, &messages, format);
    let filename = download_filename(Utc::now(), format);

    let download_initiated = match sink.deliver(&content, DOWNLOAD_MIME, &filename) {
        Ok(()) => {
            log.push("File download initiated");
            true
        }
        Err(err) => {
            warn!("download sink failed: {err}");
            log.push(format!("File download failed to start: {err}"));
            false
        }
    };

    Ok(ExtractionReport {
        platform,
        message_count: messages.len(),
        download_initiated,
    })
}
