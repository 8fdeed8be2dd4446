pub mod config;
pub mod driver;
pub mod error;
pub mod logger;
pub mod scanner;
pub mod token;

pub use crate::error::{Error, LexicalErrorKind, Reporter, Result};
pub use crate::scanner::{scan, Scanner};
pub use crate::token::{Literal, Token, TokenKind};
