use std::{
    fmt::{self, Display},
    io, result,
};

use thiserror::Error;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorKind {
    UnterminatedString,
    UnexpectedCharacter,
}

impl LexicalErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            LexicalErrorKind::UnterminatedString => "Unterminated string.",
            LexicalErrorKind::UnexpectedCharacter => "Unexpected character.",
        }
    }
}

impl Display for LexicalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("[line {line}] Error: {kind}")]
    Lexical { line: usize, kind: LexicalErrorKind },

    #[error("Usage: lox [script]")]
    Usage,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn lexical(line: usize, kind: LexicalErrorKind) -> Error {
        Error::Lexical { line, kind }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Lexical { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn lexical_kind(&self) -> Option<LexicalErrorKind> {
        match self {
            Error::Lexical { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Receives lexical errors as the scanner detects them.
///
/// Reporting never interrupts a scan, so one pass can surface several
/// independent errors. Formatting and "did anything go wrong" bookkeeping
/// belong to the implementor.
pub trait Reporter {
    fn report(&mut self, error: Error);
}

impl Reporter for Vec<Error> {
    fn report(&mut self, error: Error) {
        self.push(error);
    }
}
