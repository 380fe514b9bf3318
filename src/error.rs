use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostkitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read package list file '{path}': {source}")]
    PackageListFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Local package '{path}' does not exist")]
    LocalPackageNotFound { path: PathBuf },

    #[error("Invalid environment variable '{0}': expected KEY=VALUE")]
    InvalidEnvVar(String),

    /// The executable could not be started (missing binary, permissions).
    #[error("Failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed waiting for '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but did not exit with status 0.
    #[error("Command '{command}' failed: {status}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("Operation cancelled: {reason}")]
    Cancelled { reason: String },

    /// Adds operation context (what we were trying to do) to a lower-level error.
    #[error("{context}: {source}")]
    Operation {
        context: String,
        #[source]
        source: Box<HostkitError>,
    },

    #[error("This command must be run as root")]
    NotRoot,

    #[error("Unsupported distribution: {0}")]
    UnsupportedDistribution(String),

    #[error("Failed to install signal handler: {0}")]
    SignalHandler(#[from] ctrlc::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl HostkitError {
    /// Wrap `self` with a description of the operation that failed.
    pub fn context(self, context: impl Into<String>) -> Self {
        HostkitError::Operation {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True when the root cause is a signal-driven cancellation.
    pub fn is_cancelled(&self) -> bool {
        match self {
            HostkitError::Cancelled { .. } => true,
            HostkitError::Operation { source, .. } => source.is_cancelled(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, HostkitError>;
