//! The request/response contract of the extraction channel.
//!
//! Models a single request -> single response exchange: one `extract` or
//! `detectPlatform` action in, one structured envelope out. `handle_request`
//! is the orchestration boundary; every core fault is converted into the
//! failure envelope here and nothing propagates raw to the caller.

use serde::{Deserialize, Serialize};

use crate::page::Page;
use crate::pipeline::{extract_conversation, DownloadSink, RunLog};
use crate::platform::Platform;
use crate::render::Format;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    Extract { format: Format },
    DetectPlatform,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Extracted {
        platform: String,
        #[serde(rename = "messageCount")]
        message_count: usize,
        #[serde(rename = "downloadInitiated")]
        download_initiated: bool,
        logs: Vec<String>,
    },
    Failed {
        error: String,
        logs: Vec<String>,
    },
    Detected {
        platform: String,
    },
}

impl Response {
    pub fn error(&self) -> Option<&str> {
        match self {
            Response::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Serve one request against a page. `detectPlatform` performs no
/// extraction; `extract` runs the pipeline and never lets a fault escape.
pub fn handle_request(page: &Page, request: Request, sink: &mut dyn DownloadSink) -> Response {
    match request {
        Request::Extract { format } => {
            let mut log = RunLog::new();
            match extract_conversation(page, format, sink, &mut log) {
                Ok(report) => Response::Extracted {
                    platform: report.platform.as_str().to_string(),
                    message_count: report.message_count,
                    download_initiated: report.download_initiated,
                    logs: log.into_lines(),
                },
                Err(err) => Response::Failed {
                    error: err.response_message(),
                    logs: log.into_lines(),
                },
            }
        }
        Request::DetectPlatform => Response::Detected {
            platform: Platform::detect(page).as_str().to_string(),
        },
    }
}
