use anyhow::{Error, anyhow};
use std::path::{Path, PathBuf};
use url::Url;

/// Directory holding `.hsx` fixture documents.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Turn a fixture path into a `file://` URL.
pub fn to_file_url(path: &Path) -> Result<Url, Error> {
    Url::from_file_path(path).map_err(|()| anyhow!("invalid fixture path: {}", path.display()))
}

/// Initialize logging for visibility during test runs.
pub fn init_logs() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .is_test(true)
        .try_init();
}
