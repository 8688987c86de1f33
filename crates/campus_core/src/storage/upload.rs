//! Upload directory management.
//!
//! # Responsibility
//! - Persist uploaded bytes under collision-free file names.
//! - Read and remove stored files by locator.
//! - Map locators to MIME types for serving.
//!
//! # Invariants
//! - Stored names never contain path separators from user input.
//! - Removing a file that is already gone is not an error.

use chrono::Local;
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static UNSAFE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\:*?"<>|]+"#).expect("valid unsafe name regex"));

#[derive(Debug)]
pub enum UploadError {
    /// Upload file name has no extension or one the category does not accept.
    DisallowedExtension {
        file_name: String,
        allowed: &'static [&'static str],
    },
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for UploadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DisallowedExtension { file_name, allowed } => write!(
                f,
                "file `{file_name}` is not accepted; expected one of {}",
                allowed.join("|")
            ),
            Self::Io { path, source } => write!(f, "upload io failed at `{}`: {source}", path.display()),
        }
    }
}

impl Error for UploadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DisallowedExtension { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Directory-backed store for uploaded files.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Creates a store rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Writes `bytes` under a unique name derived from `title` and returns
    /// the locator (the stored path).
    pub fn save(
        &self,
        title: &str,
        original_file_name: &str,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        std::fs::create_dir_all(&self.root).map_err(|source| UploadError::Io {
            path: self.root.clone(),
            source,
        })?;

        let extension = extension_of(original_file_name);
        let path = self.root.join(stored_file_name(title, extension.as_deref()));
        if let Err(source) = std::fs::write(&path, bytes) {
            error!(
                "event=upload_save module=storage status=error bytes={} error={}",
                bytes.len(),
                source
            );
            return Err(UploadError::Io { path, source });
        }

        info!(
            "event=upload_save module=storage status=ok bytes={}",
            bytes.len()
        );
        Ok(path.to_string_lossy().into_owned())
    }

    pub fn read(&self, locator: &str) -> Result<Vec<u8>, UploadError> {
        std::fs::read(locator).map_err(|source| UploadError::Io {
            path: PathBuf::from(locator),
            source,
        })
    }

    /// Deletes the stored file; a missing file counts as removed.
    pub fn remove(&self, locator: &str) -> Result<(), UploadError> {
        match std::fs::remove_file(locator) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(UploadError::Io {
                path: PathBuf::from(locator),
                source,
            }),
        }
    }
}

/// Checks `file_name` against a category's accepted extensions.
pub fn ensure_allowed_extension(
    file_name: &str,
    allowed: &'static [&'static str],
) -> Result<(), UploadError> {
    match extension_of(file_name) {
        Some(extension) if allowed.contains(&extension.as_str()) => Ok(()),
        _ => Err(UploadError::DisallowedExtension {
            file_name: file_name.to_string(),
            allowed,
        }),
    }
}

/// Lower-cased extension of `file_name` without the dot.
pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_ascii_lowercase)
}

/// MIME type used when serving a stored file.
pub fn mime_type_for(locator: &str) -> &'static str {
    match extension_of(locator).as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

fn stored_file_name(title: &str, extension: Option<&str>) -> String {
    let without_separators = UNSAFE_NAME_RE.replace_all(title.trim(), "");
    let base = WHITESPACE_RE.replace_all(&without_separators, "_");
    let base: &str = if base.is_empty() { "upload" } else { &base };
    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    let nonce = Uuid::new_v4().simple().to_string();
    let mut name = format!("{base}_{timestamp}_{}", &nonce[..8]);
    if let Some(extension) = extension {
        name.push('.');
        name.push_str(extension);
    }
    name
}
