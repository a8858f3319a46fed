use std::fmt;

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy)]
pub enum ErrorKind {
    Input,
    Io,
    Validation,
    Config,
}

#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    source: anyhow::Error,
}

impl AppError {
    pub fn new(kind: ErrorKind, source: anyhow::Error) -> Self {
        Self { kind, source }
    }

    pub fn input<E: Into<anyhow::Error>>(err: E) -> Self {
        Self::new(ErrorKind::Input, err.into())
    }

    pub fn io<E: Into<anyhow::Error>>(err: E) -> Self {
        Self::new(ErrorKind::Io, err.into())
    }

    pub fn validation<E: Into<anyhow::Error>>(err: E) -> Self {
        Self::new(ErrorKind::Validation, err.into())
    }

    pub fn config<E: Into<anyhow::Error>>(err: E) -> Self {
        Self::new(ErrorKind::Config, err.into())
    }

    pub fn exit_code(&self) -> std::process::ExitCode {
        match self.kind {
            ErrorKind::Input => std::process::ExitCode::from(1),
            ErrorKind::Io => std::process::ExitCode::from(2),
            ErrorKind::Validation | ErrorKind::Config => std::process::ExitCode::from(3),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

pub fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
