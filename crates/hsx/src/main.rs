//! Command-line host for the HSX runtime.
//!
//! Loads one HSX document by path or URL, interprets its directives with
//! the literal engine, and prints the rendered output snapshot.

#![allow(clippy::print_stdout, reason = "Rendered output goes to stdout")]

use anyhow::{Error, anyhow};
use document_handler::{HsxRuntime, MemorySink, RuntimeConfig, UrlSource};
use log::{error, info};
use script::LiteralEngine;
use std::env;
use tokio::runtime::Runtime;
use url::Url;

pub fn main() {
    env_logger::init();

    if let Err(error) = run() {
        error!("hsx: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let argument = env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("usage: hsx <document.hsx | url>"))?;
    let url = to_url(&argument)?;

    let config = RuntimeConfig::from_env();
    let sink = MemorySink::with_default_target(&config.default_insertion_point);
    let mut instance = HsxRuntime::with_config(
        Box::new(LiteralEngine::new()),
        Box::new(sink.clone()),
        config,
    );

    let runtime = Runtime::new()?;
    runtime.block_on(instance.load_url(&url, &UrlSource::new()))?;
    info!("HSX runtime fully loaded: {url}");

    for (selector, text) in sink.rendered() {
        println!("{selector}: {text}");
    }
    for media in sink.media() {
        println!("[media {} {} -> {}]", media.media_type, media.url, media.selector);
    }
    for (kind, path) in sink.scripts() {
        println!("[script {kind} {path}]");
    }
    Ok(())
}

/// Interpret the argument as a URL, falling back to a filesystem path
/// resolved against the current directory.
fn to_url(argument: &str) -> Result<Url, Error> {
    if let Ok(url) = Url::parse(argument) {
        return Ok(url);
    }
    let path = env::current_dir()?.join(argument);
    Url::from_file_path(&path).map_err(|()| anyhow!("Invalid document path: {}", path.display()))
}
