use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode JSON payload for {path}: {source}")]
    EncodeJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to echo result: {0}")]
    Echo(#[source] std::io::Error),
}

pub fn read_text(path: &Path) -> Result<String, IoError> {
    fs::read_to_string(path).map_err(|source| IoError::ReadFile {
        path: path.display().to_string(),
        source,
    })
}

/// Pretty JSON with a trailing newline. Non-ASCII text is written as-is.
pub fn to_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<String, IoError> {
    let mut encoded =
        serde_json::to_string_pretty(value).map_err(|source| IoError::EncodeJson {
            path: path.display().to_string(),
            source,
        })?;
    encoded.push('\n');
    Ok(encoded)
}

pub fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<(), IoError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| IoError::WriteFile {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let encoded = to_pretty_json(path, value)?;

    fs::write(path, encoded).map_err(|source| IoError::WriteFile {
        path: path.display().to_string(),
        source,
    })
}

/// Write pretty JSON to an echo sink (usually stdout).
pub fn echo_json<T: Serialize, W: Write>(out: &mut W, value: &T) -> Result<(), IoError> {
    let encoded = to_pretty_json(Path::new("<stdout>"), value)?;
    out.write_all(encoded.as_bytes()).map_err(IoError::Echo)
}
