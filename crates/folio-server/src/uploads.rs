//! Uploaded image storage and inlining.
//!
//! Images are written to a flat upload directory and served under
//! [`UPLOAD_URL_PREFIX`]. When a document is generated, figures pointing at
//! that prefix are replaced with base64 data URIs so the HTML is
//! self-contained.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use folio_renderer::{Figure, Section};

/// URL prefix under which uploaded files are served.
pub const UPLOAD_URL_PREFIX: &str = "/static/uploads/";

/// Longest extension kept from an uploaded filename.
const MAX_EXTENSION_LEN: usize = 10;

/// Attempts at finding an unused filename before giving up.
const NAME_ATTEMPTS: usize = 3;

/// Error from upload storage.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// I/O error while writing or reading an upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Generated filename inside the upload directory.
    pub filename: String,
    /// Public URL of the file.
    pub url: String,
}

/// Filesystem-backed upload directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store `data` under a fresh name derived from `original_name`'s extension.
    ///
    /// Existing files are never overwritten.
    pub fn save(&self, original_name: &str, data: &[u8]) -> Result<StoredUpload, UploadError> {
        std::fs::create_dir_all(&self.dir)?;
        let extension = sanitize_extension(original_name);

        let mut last_err = None;
        for _ in 0..NAME_ATTEMPTS {
            let filename = unique_filename(&extension);
            let path = self.dir.join(&filename);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(data)?;
                    let url = format!("{UPLOAD_URL_PREFIX}{filename}");
                    return Ok(StoredUpload { filename, url });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => last_err = Some(e),
                Err(e) => return Err(e.into()),
            }
        }

        Err(last_err
            .unwrap_or_else(|| std::io::Error::from(ErrorKind::AlreadyExists))
            .into())
    }

    /// Map an upload URL to its file path.
    ///
    /// Only the final path component is used, so a URL cannot reach outside
    /// the upload directory.
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        let rest = url.strip_prefix(UPLOAD_URL_PREFIX)?;
        let name = Path::new(rest).file_name()?;
        Some(self.dir.join(name))
    }

    /// Read an uploaded file as a `data:` URI.
    pub fn data_uri(&self, path: &Path) -> Result<String, UploadError> {
        let bytes = std::fs::read(path)?;
        Ok(format!(
            "data:{};base64,{}",
            image_mime(path),
            BASE64_STANDARD.encode(bytes)
        ))
    }

    /// Replace upload URLs in every figure of `sections` with data URIs.
    ///
    /// Figures whose file is missing or unreadable keep their URL. Returns
    /// the number of figures inlined.
    pub fn inline_images(&self, sections: &mut [Section]) -> usize {
        let mut inlined = 0;
        for section in sections {
            section.visit_figures_mut(&mut |figure| {
                if self.inline_figure(figure) {
                    inlined += 1;
                }
            });
        }
        inlined
    }

    fn inline_figure(&self, figure: &mut Figure) -> bool {
        let Some(path) = self.resolve(&figure.url) else {
            return false;
        };
        if !path.is_file() {
            tracing::warn!(url = %figure.url, path = %path.display(), "Uploaded image not found");
            return false;
        }
        match self.data_uri(&path) {
            Ok(uri) => {
                figure.url = uri;
                true
            }
            Err(e) => {
                tracing::warn!(url = %figure.url, error = %e, "Failed to inline image");
                false
            }
        }
    }
}

/// Extension of `name` reduced to lowercase ASCII alphanumerics, with a
/// leading dot, or empty.
fn sanitize_extension(name: &str) -> String {
    let ext: String = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .take(MAX_EXTENSION_LEN)
        .collect();

    if ext.is_empty() {
        ext
    } else {
        format!(".{ext}")
    }
}

fn unique_filename(extension: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "img_{}_{}{extension}",
        chrono::Utc::now().timestamp(),
        &id[..8]
    )
}

/// Image MIME type for a path, `image/png` when unknown.
fn image_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .filter(|m| m.type_() == mime_guess::mime::IMAGE)
        .map_or_else(|| "image/png".to_owned(), |m| m.essence_str().to_owned())
}
