//! Line parser for HSX directives.
//!
//! Matching is substring containment followed by structured extraction, in
//! a fixed priority order; the first grammar whose containment check hits
//! owns the line. A line that contains a grammar's keywords but fails its
//! extraction is a local [`ParseError`]; callers report it and keep going.

use crate::command::Command;
use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Prefix marking a trimmed line as a directive. Lines without it are
/// ordinary document content and are skipped without comment.
pub const DIRECTIVE_PREFIX: &str = "hsx ";

/// Keyword prefix that makes a variable declaration reactive.
const REACTIVE_VARIABLE_PREFIX: &str = "hsx reactive variable";

/// A directive line that matched a grammar but could not be extracted.
#[derive(Debug)]
pub enum ParseError {
    /// Wrong arity or a missing delimiter for the named grammar.
    Malformed {
        /// The grammar that claimed the line.
        directive: &'static str,
        /// The offending line, verbatim.
        line: String,
    },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ParseError::Malformed { directive, line } => {
                write!(f, "malformed `{directive}` directive: {line}")
            }
        }
    }
}

impl Error for ParseError {}

/// Parse one source line.
///
/// Returns `None` when the line is not a directive at all, or carries the
/// prefix but matches no known grammar (such lines are dropped silently).
/// Returns `Some(Err(_))` when a grammar claimed the line but extraction
/// failed; the caller reports it and continues with the next line.
pub fn parse_line(line: &str) -> Option<Result<Command, ParseError>> {
    let line = line.trim();
    if !line.starts_with(DIRECTIVE_PREFIX) {
        return None;
    }

    // Priority order is part of the wire format: when a line could satisfy
    // several containment checks, the first listed grammar wins.
    if line.contains("exist import correct file") {
        let path = tail_text(line, "exist import correct file");
        return Some(Ok(Command::ImportModule { path }));
    }
    if line.contains("exist import simple file") {
        let path = tail_text(line, "exist import simple file");
        return Some(Ok(Command::ImportScript { path }));
    }
    if line.contains("file import all to") {
        let dest = tail_text(line, "file import all to");
        return Some(Ok(Command::BundleFiles { dest }));
    }
    if line.contains("file import/make/rename") {
        let info = tail_text(line, "file import/make/rename");
        return Some(Ok(Command::RelocateFile { info }));
    }
    if line.contains("media load") {
        return Some(extract_media(line).ok_or_else(|| malformed("media load", line)));
    }
    if line.contains("run async") {
        let code = tail_text(line, "run async");
        return Some(Ok(Command::RunAsync { code }));
    }
    if line.contains("define component") {
        return Some(extract_define(line).ok_or_else(|| malformed("define component", line)));
    }
    if line.contains("render component") {
        return Some(extract_render(line).ok_or_else(|| malformed("render component", line)));
    }
    if line.contains("variable") {
        return Some(extract_variable(line).ok_or_else(|| malformed("variable", line)));
    }

    None
}

fn malformed(directive: &'static str, line: &str) -> ParseError {
    ParseError::Malformed {
        directive,
        line: line.to_owned(),
    }
}

/// Everything after the first occurrence of `marker`, trimmed. Grammars
/// using this never fail: an empty tail is passed through as-is.
fn tail_text(line: &str, marker: &str) -> String {
    line.split_once(marker)
        .map(|(_, tail)| tail.trim().to_owned())
        .unwrap_or_default()
}

/// Leading run of word characters, plus the remainder.
fn split_word(text: &str) -> Option<(&str, &str)> {
    let end = text
        .find(|character: char| !(character.is_ascii_alphanumeric() || character == '_'))
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    Some((&text[..end], &text[end..]))
}

/// Try `extract` on the tail after each occurrence of `marker`, front to
/// back, mirroring how a scanning pattern match settles on the first
/// position where the whole grammar fits.
fn scan_occurrences<T>(
    line: &str,
    marker: &str,
    extract: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let mut rest = line;
    while let Some(position) = rest.find(marker) {
        let tail = &rest[position + marker.len()..];
        if let Some(found) = extract(tail) {
            return Some(found);
        }
        rest = &rest[position + 1..];
    }
    None
}

/// `media load <type> from <url> to <selector>`; the url may contain
/// spaces, so the split happens at the *last* ` to `.
fn extract_media(line: &str) -> Option<Command> {
    scan_occurrences(line, "media load ", |tail| {
        let (media_type, rest) = split_word(tail)?;
        let rest = rest.strip_prefix(" from ")?;
        let split = rest.rfind(" to ")?;
        let url = &rest[..split];
        let selector = &rest[split + " to ".len()..];
        if url.is_empty() || selector.is_empty() {
            return None;
        }
        Some(Command::LoadMedia {
            media_type: media_type.to_owned(),
            url: url.to_owned(),
            selector: selector.to_owned(),
        })
    })
}

/// `define component <name> <content...>`.
fn extract_define(line: &str) -> Option<Command> {
    scan_occurrences(line, "define component ", |tail| {
        let (name, rest) = split_word(tail)?;
        let content = rest.strip_prefix(' ')?;
        if content.is_empty() {
            return None;
        }
        Some(Command::DefineComponent {
            name: name.to_owned(),
            content: content.to_owned(),
        })
    })
}

/// `render component <name> to <selector>`.
fn extract_render(line: &str) -> Option<Command> {
    scan_occurrences(line, "render component ", |tail| {
        let (name, rest) = split_word(tail)?;
        let selector = rest.strip_prefix(" to ")?;
        if selector.is_empty() {
            return None;
        }
        Some(Command::RenderComponent {
            name: name.to_owned(),
            selector: selector.to_owned(),
        })
    })
}

/// `... variable <name> = <value-expr>`; the declaration is reactive iff
/// the line opens with the reactive keyword form.
fn extract_variable(line: &str) -> Option<Command> {
    let reactive = line.starts_with(REACTIVE_VARIABLE_PREFIX);
    scan_occurrences(line, "variable ", move |tail| {
        let (name, rest) = split_word(tail)?;
        let value = rest.strip_prefix(" = ")?;
        if value.is_empty() {
            return None;
        }
        Some(Command::SetVariable {
            name: name.to_owned(),
            value: value.to_owned(),
            reactive,
        })
    })
}
