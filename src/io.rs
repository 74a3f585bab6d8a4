/*!
Retrieval and persistence collaborators.

Feeds are fetched through a [FeedFetcher], so callers can substitute their own transport (or
canned bodies in tests). The generated document is written atomically with [write_document].
*/
use crate::error::BogonsError;
use crate::models::SlurmDocument;
use log::info;
use std::io::Write;
use std::path::Path;

/// Returns the body of a feed for a given URL.
pub trait FeedFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, BogonsError>;

    /// Fetch and parse a JSON body. A body that is not JSON is a fetch failure.
    fn fetch_json(&self, url: &str) -> Result<serde_json::Value, BogonsError> {
        let body = self.fetch_text(url)?;
        serde_json::from_str(&body).map_err(|e| BogonsError::Fetch {
            url: url.to_string(),
            reason: format!("response is not valid JSON: {}", e),
        })
    }
}

impl<T: FeedFetcher + ?Sized> FeedFetcher for &T {
    fn fetch_text(&self, url: &str) -> Result<String, BogonsError> {
        (**self).fetch_text(url)
    }

    fn fetch_json(&self, url: &str) -> Result<serde_json::Value, BogonsError> {
        (**self).fetch_json(url)
    }
}

/// Fetches local or remote (HTTP/HTTPS) feeds with `oneio`.
#[cfg(feature = "remote")]
#[derive(Debug, Clone, Copy, Default)]
pub struct OneIoFetcher;

#[cfg(feature = "remote")]
impl FeedFetcher for OneIoFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, BogonsError> {
        info!("fetching {}", url);
        oneio::read_to_string(url).map_err(|source| BogonsError::Remote {
            url: url.to_string(),
            source,
        })
    }
}

/// Write `document` as 2-space indented JSON to `path`.
///
/// The content goes to a temporary file in the destination directory first and is then renamed
/// over `path`, so readers never observe a partially written document.
pub fn write_document(document: &SlurmDocument, path: &Path) -> Result<(), BogonsError> {
    let content = document.to_json_pretty()?;
    let persist_err = |source: std::io::Error| BogonsError::Persist {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(persist_err)?;
    tmp.write_all(content.as_bytes()).map_err(persist_err)?;
    tmp.as_file().sync_all().map_err(persist_err)?;
    tmp.persist(path).map_err(|e| persist_err(e.error))?;

    info!(
        "wrote {} prefix assertions to {}",
        document.prefix_assertions().len(),
        path.display()
    );
    Ok(())
}
