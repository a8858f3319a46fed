//! Download sinks: where the assembled transcript ends up.

use std::io::{self, Write};
use std::path::PathBuf;

use chatlift_core::DownloadSink;
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Writes the transcript into a directory.
///
/// The document is staged in a temp file inside the destination directory
/// and persisted under the final name only once fully written; on any other
/// exit path the staging file goes away with its handle.
pub struct FileSink {
    dir: PathBuf,
    pub written: Option<PathBuf>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: None,
        }
    }
}

impl DownloadSink for FileSink {
    fn deliver(&mut self, content: &str, _mime: &str, filename: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(content.as_bytes())?;
        let target = self.dir.join(filename);
        staged.persist(&target).map_err(|err| err.error)?;
        info!("wrote {}", target.display());
        self.written = Some(target);
        Ok(())
    }
}

/// Mirrors the document onto the system clipboard after the inner sink has
/// accepted it.
///
/// The clipboard copy is best-effort: once the inner sink has delivered,
/// a missing or refusing clipboard must not fail the download.
pub struct ClipboardSink<'a> {
    inner: &'a mut dyn DownloadSink,
}

impl<'a> ClipboardSink<'a> {
    pub fn new(inner: &'a mut dyn DownloadSink) -> Self {
        Self { inner }
    }
}

impl DownloadSink for ClipboardSink<'_> {
    fn deliver(&mut self, content: &str, mime: &str, filename: &str) -> io::Result<()> {
        self.inner.deliver(content, mime, filename)?;
        match cli_clipboard::set_contents(content.to_owned()) {
            Ok(()) => info!("copied transcript to clipboard"),
            Err(err) => warn!("clipboard copy failed: {err}"),
        }
        Ok(())
    }
}
