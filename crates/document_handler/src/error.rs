use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Fatal errors surfaced by a document load.
///
/// Everything else that can go wrong while loading (parse failures,
/// evaluation errors, missing components) degrades gracefully with a
/// diagnostic and never aborts the load.
#[derive(Debug)]
pub enum DocumentError {
    /// The source text has no `<hsx>...</hsx>` wrapper.
    MissingWrapper,
    /// The document could not be fetched from its URL.
    Fetch(String),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DocumentError::MissingWrapper => {
                f.write_str("invalid HSX document: missing <hsx> wrapper")
            }
            DocumentError::Fetch(message) => {
                write!(f, "failed to fetch document: {}", message)
            }
        }
    }
}

impl Error for DocumentError {}
