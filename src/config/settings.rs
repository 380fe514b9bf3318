//! Settings Module
//!
//! Optional KDL settings file controlling output (color, verbosity).
//!
//! ```kdl
//! settings {
//!     color "never"
//!     verbose #true
//! }
//! ```

use crate::error::{HostkitError, Result};
use crate::ui::ColorMode;
use kdl::{KdlDocument, KdlNode, KdlValue};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SETTINGS_PATH: &str = "/etc/hostkit/settings.kdl";

/// Environment variable overriding [`DEFAULT_SETTINGS_PATH`].
pub const SETTINGS_ENV: &str = "HOSTKIT_SETTINGS";

const VALID_KEYS: &[&str] = &["color", "verbose", "quiet"];
const BOOL_VALUES: &str = "#true, #false";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub color: ColorMode,
    pub verbose: bool,
    pub quiet: bool,
}

impl Settings {
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH))
    }

    /// Load settings from [`Settings::path`], or defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| HostkitError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|e| match e {
            HostkitError::Config(msg) => {
                HostkitError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        let doc: KdlDocument = content
            .parse()
            .map_err(|e: kdl::KdlError| HostkitError::Config(e.to_string()))?;

        let mut settings = Self::default();

        for node in doc.nodes() {
            if node.name().value() != "settings" {
                return Err(HostkitError::Config(format!(
                    "Unknown top-level node '{}', expected 'settings'",
                    node.name().value()
                )));
            }
            if let Some(children) = node.children() {
                for child in children.nodes() {
                    settings.apply(child)?;
                }
            }
        }

        Ok(settings)
    }

    fn apply(&mut self, node: &KdlNode) -> Result<()> {
        let key = node.name().value();
        let value = node
            .entries()
            .first()
            .map(|entry| entry.value())
            .ok_or_else(|| HostkitError::Config(format!("Setting '{}' has no value", key)))?;

        match key {
            "color" => {
                self.color = value
                    .as_string()
                    .and_then(ColorMode::parse)
                    .ok_or_else(|| invalid_value(key, value, "auto, always, never"))?;
            }
            "verbose" => {
                self.verbose = as_flag(value).ok_or_else(|| invalid_value(key, value, BOOL_VALUES))?;
            }
            "quiet" => {
                self.quiet = as_flag(value).ok_or_else(|| invalid_value(key, value, BOOL_VALUES))?;
            }
            _ => {
                return Err(HostkitError::Config(format!(
                    "Unknown setting: '{}'. Valid settings: {}",
                    key,
                    VALID_KEYS.join(", ")
                )));
            }
        }

        Ok(())
    }
}

/// Accept KDL booleans as well as the strings "true"/"false".
fn as_flag(value: &KdlValue) -> Option<bool> {
    value.as_bool().or_else(|| match value.as_string() {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    })
}

fn invalid_value(key: &str, value: &KdlValue, valid: &str) -> HostkitError {
    HostkitError::Config(format!(
        "Invalid value for '{}': {}. Valid: {}",
        key, value, valid
    ))
}
