use crate::error::DocumentError;
use anyhow::{Error, anyhow};
use bytes::Bytes;
use core::future::Future;
use core::pin::Pin;
use reqwest::get as reqwest_get;
use tokio::fs::read as tokio_fs_read;
use tokio_stream::{Stream, StreamExt as _, once};
use url::Url;

/// Async result of a document fetch.
pub type TextFuture<'a> = Pin<Box<dyn Future<Output = Result<String, DocumentError>> + Send + 'a>>;

/// Fetches HSX source text on behalf of the runtime.
///
/// Kept as a narrow capability so hosts can substitute caches, bundlers,
/// or test fixtures for real network access.
pub trait DocumentSource: Send + Sync {
    /// Fetch the document at `url` as text.
    fn fetch_text<'a>(&'a self, url: &'a Url) -> TextFuture<'a>;
}

/// Default [`DocumentSource`] over `http`, `https`, and `file` URLs.
#[derive(Default)]
pub struct UrlSource;

impl UrlSource {
    /// Create a new source.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentSource for UrlSource {
    fn fetch_text<'a>(&'a self, url: &'a Url) -> TextFuture<'a> {
        Box::pin(async move {
            collect_text(url)
                .await
                .map_err(|error| DocumentError::Fetch(error.to_string()))
        })
    }
}

/// Creates a byte stream from a URL.
///
/// Supported URL schemes:
/// - `http`, `https`: Fetched via `reqwest` as a streaming response
/// - `file`: Read from the local filesystem (emitted as a single chunk)
///
/// # Errors
///
/// - Returns `Err` if the URL scheme is unsupported
/// - Returns `Err` if HTTP fetch fails or returns a non-success status
/// - Returns `Err` if the file path is invalid or the file cannot be read
async fn stream_url(
    url: &Url,
) -> Result<Box<dyn Stream<Item = Result<Bytes, Error>> + Send + Unpin>, Error> {
    Ok(match url.scheme() {
        "http" | "https" => {
            let response = reqwest_get(url.clone())
                .await
                .map_err(|err| anyhow!("Failed to fetch URL {url}: {err}"))?;

            if !response.status().is_success() {
                return Err(anyhow!(
                    "Failed to fetch URL: {} (Status: {})",
                    url,
                    response.status()
                ));
            }
            let stream = response.bytes_stream().map(|res| match res {
                Ok(bytes) => Ok::<Bytes, Error>(bytes),
                Err(err) => Err::<Bytes, Error>(anyhow!(err)),
            });
            Box::new(stream)
        }
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| anyhow!("Invalid file path for file url: {url}"))?;
            let data = tokio_fs_read(path).await.map(Bytes::from)?;
            // Emit the entire file as a single chunk for now.
            let stream = once(Ok::<Bytes, Error>(data));
            Box::new(stream)
        }
        _ => return Err(anyhow!("Unsupported url scheme {}", url.scheme())),
    })
}

/// Drain the URL's byte stream into one lossily-decoded string.
async fn collect_text(url: &Url) -> Result<String, Error> {
    let mut stream = stream_url(url).await?;
    let mut data: Vec<u8> = Vec::new();
    while let Some(chunk) = stream.next().await {
        data.extend_from_slice(&chunk?);
    }
    Ok(String::from_utf8_lossy(&data).into_owned())
}
