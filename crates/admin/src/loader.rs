//! One-shot asynchronous loads: the baseline product list and product
//! images.
//!
//! Neither load retries, sets a timeout, or can be cancelled.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use storedash_core::Product;

/// Errors that can occur while loading external data.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading a local file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request failed or returned an error status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The document is not a JSON array of products.
    #[error("invalid baseline document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the baseline product list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaselineSource {
    /// A local JSON file.
    Path(PathBuf),
    /// A JSON document fetched over HTTP(S).
    Url(Url),
}

impl BaselineSource {
    /// Interpret `location` as an `http(s)` URL, or else a file path.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            _ => Self::Path(PathBuf::from(location)),
        }
    }
}

impl std::fmt::Display for BaselineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Fetch the baseline product list once.
///
/// # Errors
///
/// Returns an error if the source cannot be read or is not a JSON array of
/// products.
#[instrument(skip(source), fields(source = %source))]
pub async fn load_baseline(source: &BaselineSource) -> Result<Vec<Product>, LoadError> {
    let products: Vec<Product> = match source {
        BaselineSource::Path(path) => {
            let raw = read_file(path).await?;
            serde_json::from_slice(&raw)?
        }
        BaselineSource::Url(url) => {
            reqwest::get(url.clone())
                .await?
                .error_for_status()?
                .json()
                .await?
        }
    };
    tracing::info!(count = products.len(), "Baseline products loaded");
    Ok(products)
}

/// Read an image file into a `data:` URI.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
#[instrument]
pub async fn load_image(path: &Path) -> Result<String, LoadError> {
    let bytes = read_file(path).await?;
    Ok(format!(
        "data:{};base64,{}",
        mime_for(path),
        B64.encode(&bytes)
    ))
}

/// Produce an image preview for `input`.
///
/// Data URIs and `http(s)` URLs are used as given; anything else is read
/// as a local file. A failed read is logged and yields no preview.
pub async fn preview_image(input: &str) -> Option<String> {
    if input.starts_with("data:") || matches!(BaselineSource::parse(input), BaselineSource::Url(_)) {
        return Some(input.to_owned());
    }
    match load_image(Path::new(input)).await {
        Ok(uri) => Some(uri),
        Err(e) => {
            tracing::error!(error = %e, "Image read failed");
            None
        }
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse() {
        assert!(matches!(
            BaselineSource::parse("https://shop.test/products.json"),
            BaselineSource::Url(_)
        ));
        assert_eq!(
            BaselineSource::parse("products.json"),
            BaselineSource::Path(PathBuf::from("products.json"))
        );
        assert!(matches!(
            BaselineSource::parse("/srv/data/products.json"),
            BaselineSource::Path(_)
        ));
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("a")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_load_baseline_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"[{"name":"Pen","price":"5","category":"Stationery","image":"pen.png"},
                {"name":"Cup","price":20,"category":"Kitchen"}]"#,
        )
        .unwrap();

        let products = load_baseline(&BaselineSource::Path(path)).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].price, "20");
    }

    #[tokio::test]
    async fn test_load_baseline_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_baseline(&BaselineSource::Path(dir.path().join("nope.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_baseline_not_an_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, r#"{"products":[]}"#).unwrap();
        let err = load_baseline(&BaselineSource::Path(path)).await.unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[tokio::test]
    async fn test_load_image_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();
        let uri = load_image(&path).await.unwrap();
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }

    #[tokio::test]
    async fn test_preview_passthrough_and_failure() {
        assert_eq!(
            preview_image("https://cdn.test/a.png").await.as_deref(),
            Some("https://cdn.test/a.png")
        );
        assert_eq!(
            preview_image("data:image/png;base64,AA==").await.as_deref(),
            Some("data:image/png;base64,AA==")
        );
        assert_eq!(preview_image("/definitely/not/here.png").await, None);
    }
}
