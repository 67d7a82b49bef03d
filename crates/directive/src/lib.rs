//! The HSX directive language: structured commands and the line parser.
//!
//! HSX source documents carry line-oriented directives alongside ordinary
//! markup. Each line that starts with the directive prefix is matched
//! against a fixed set of grammars and turned into a [`Command`] for the
//! interpreter; everything else is passed over untouched. The grammar
//! surface is a wire format: keyword spelling, matching order, and the
//! greedy splits below are all load-bearing for existing documents.

pub mod command;
pub use command::Command;

pub mod parser;
pub use parser::{DIRECTIVE_PREFIX, ParseError, parse_line};
