//! Minimal `/etc/os-release` reader.

use crate::error::{HostkitError, Result};
use crate::utils::fs::FileSystem;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    pub id: String,
    pub id_like: Vec<String>,
    pub version_id: String,
    pub pretty_name: Option<String>,
}

impl OsRelease {
    pub fn describe(&self) -> String {
        match &self.pretty_name {
            Some(name) => format!("{} ({})", name, self.id),
            None if self.id.is_empty() => "unknown".to_string(),
            None => format!("{} {}", self.id, self.version_id),
        }
    }
}

pub fn parse(content: &str) -> OsRelease {
    let mut release = OsRelease::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = unquote(value.trim());

        match key.trim() {
            "ID" => release.id = value.to_lowercase(),
            "ID_LIKE" => {
                release.id_like = value
                    .split_whitespace()
                    .map(str::to_lowercase)
                    .collect();
            }
            "VERSION_ID" => release.version_id = value.to_string(),
            "PRETTY_NAME" => release.pretty_name = Some(value.to_string()),
            _ => {}
        }
    }

    release
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

pub fn read(fs: &dyn FileSystem, path: &Path) -> Result<OsRelease> {
    let io_err = |source: std::io::Error| HostkitError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut content = String::new();
    fs.open(path)
        .map_err(io_err)?
        .read_to_string(&mut content)
        .map_err(io_err)?;

    Ok(parse(&content))
}
