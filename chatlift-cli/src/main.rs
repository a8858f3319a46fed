mod cli;
mod config;
mod sink;
mod util;

use std::path::Path;

use anyhow::Context;
use chatlift_core::{handle_request, Page, Request, Response};
use clap::Parser;
use tracing::info;

use cli::Cli;
use config::Config;
use sink::{ClipboardSink, FileSink};
use util::AppError;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    util::init_tracing(cli.quiet);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            err.exit_code()
        }
    }
}

fn run(cli: &Cli) -> Result<std::process::ExitCode, AppError> {
    let mut config = Config::load(cli.config.as_deref()).map_err(AppError::config)?;
    config.apply_cli(cli);

    let html = std::fs::read_to_string(&cli.page)
        .with_context(|| {
            format!(
                "failed to read page {}; make sure this is a saved ChatGPT, Claude, or Poe page",
                cli.page.display()
            )
        })
        .map_err(AppError::input)?;

    let url = cli.url.clone().unwrap_or_else(|| page_url(&cli.page));
    let page = Page::parse(&html, url);

    let request = if cli.detect {
        Request::DetectPlatform
    } else {
        Request::Extract {
            format: config.format,
        }
    };

    let mut file_sink = FileSink::new(&config.out_dir);
    let response = if config.clipboard && !cli.detect {
        let mut sink = ClipboardSink::new(&mut file_sink);
        handle_request(&page, request, &mut sink)
    } else {
        handle_request(&page, request, &mut file_sink)
    };

    if cli.json {
        let envelope = serde_json::to_string_pretty(&response)
            .context("failed to serialize response")
            .map_err(AppError::validation)?;
        println!("{envelope}");
    }

    match &response {
        Response::Detected { platform } => {
            if !cli.json {
                println!("{platform}");
            }
            Ok(std::process::ExitCode::SUCCESS)
        }
        Response::Extracted {
            platform,
            message_count,
            download_initiated,
            ..
        } => {
            info!("extracted {message_count} message(s) from {platform}");
            if !*download_initiated {
                return Err(AppError::io(anyhow::anyhow!(
                    "failed to write the transcript file"
                )));
            }
            if let (false, Some(path)) = (cli.json, &file_sink.written) {
                println!("{}", path.display());
            }
            Ok(std::process::ExitCode::SUCCESS)
        }
        Response::Failed { error, logs } => {
            for line in logs {
                info!("{line}");
            }
            if cli.json {
                // The envelope already carries the error; keep stdout clean.
                Ok(std::process::ExitCode::from(3))
            } else {
                Err(AppError::validation(anyhow::anyhow!("{error}")))
            }
        }
    }
}

/// file:// URL for the document header when the caller does not supply the
/// original page URL.
fn page_url(path: &Path) -> String {
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}
