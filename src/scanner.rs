use crate::{
    error::{Error, LexicalErrorKind, Reporter, Result},
    token::{Literal, Token, TokenKind},
};
use peekmore::{PeekMore, PeekMoreIterator};
use phf::phf_map;
use std::str::CharIndices;
use tracing::{debug, trace};

pub(crate) static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "and" => TokenKind::And,
    "class" => TokenKind::Class,
    "else" => TokenKind::Else,
    "false" => TokenKind::False,
    "for" => TokenKind::For,
    "fun" => TokenKind::Fun,
    "if" => TokenKind::If,
    "nil" => TokenKind::Nil,
    "or" => TokenKind::Or,
    "print" => TokenKind::Print,
    "return" => TokenKind::Return,
    "super" => TokenKind::Super,
    "this" => TokenKind::This,
    "true" => TokenKind::True,
    "var" => TokenKind::Var,
    "while" => TokenKind::While,
};

/// Scans `source` in one go, collecting lexical errors rather than reporting them.
pub fn scan(source: &str) -> (Vec<Token>, Vec<Error>) {
    let mut errors = Vec::new();
    let tokens = Scanner::new(source).scan_tokens(&mut errors);
    (tokens, errors)
}

/// Single-use tokenizer over one source text.
///
/// As an iterator it yields tokens and lexical errors in source order,
/// followed by exactly one `EndOfFile` token.
pub struct Scanner<'a> {
    source: &'a str,
    src: PeekMoreIterator<CharIndices<'a>>,
    start: usize,
    current: usize,
    line: usize,
    emitted: usize,
    done: bool,
}

impl <'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        if self.done {
            return None;
        }

        // Whitespace and comments produce nothing, so keep going until
        // something does.
        loop {
            self.start = self.current;
            let start_line = self.line;

            let next_char = match self.advance() {
                Some(c) => c,
                None => {
                    self.done = true;
                    debug!(tokens = self.emitted, lines = self.line, "scan complete");
                    return Some(Ok(Token::end_of_file(self.line)));
                },
            };

            if let Some(scanned) = self.next_token(next_char) {
                return Some(scanned.map(|(kind, literal)| {
                    self.emitted += 1;
                    let token = Token::new(kind, self.lexeme(), literal, start_line);
                    trace!(line = token.line, "{}", token);
                    token
                }).map_err(|e| {
                    debug!("{}", e);
                    e
                }));
            }
        }
    }
}

impl <'a> std::iter::FusedIterator for Scanner<'a> {}

impl <'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            src: source.char_indices().peekmore(),
            start: 0,
            current: 0,
            line: 1,
            emitted: 0,
            done: false,
        }
    }

    /// Drives the scan to completion. Lexical errors go to `reporter` as
    /// soon as they are found; the returned tokens always end with `EndOfFile`.
    pub fn scan_tokens(self, reporter: &mut dyn Reporter) -> Vec<Token> {
        self.filter_map(|scanned| match scanned {
            Ok(token) => Some(token),
            Err(e) => {
                reporter.report(e);
                None
            },
        }).collect()
    }

    fn next_token(&mut self, c: char) -> Option<Result<(TokenKind, Option<Literal>)>> {
        use TokenKind::*;
        let kind = match c {
            '(' => LeftParen,
            ')' => RightParen,
            '{' => LeftBrace,
            '}' => RightBrace,
            ',' => Comma,
            '.' => Dot,
            '-' => Minus,
            '+' => Plus,
            ';' => Semicolon,
            '*' => Star,
            '!' => if self.does_next_match('=') { BangEqual } else { Bang },
            '=' => if self.does_next_match('=') { EqualEqual } else { Equal },
            '<' => if self.does_next_match('=') { LessEqual } else { Less },
            '>' => if self.does_next_match('=') { GreaterEqual } else { Greater },
            '/' => {
                if self.does_next_match('/') { // is this a comment?
                    self.advance_until(|n| n == '\n');
                    return None;
                }
                Slash
            },
            ' ' | '\r' | '\t' => return None,
            '\n' => {
                self.line += 1;
                return None;
            },
            '"' => return self.extract_string(),
            c if c.is_ascii_digit() => return Some(Ok(self.extract_number())),
            c if can_start_identifier(c) => return Some(Ok((self.extract_identifier(), None))),
            _ => return Some(Err(Error::lexical(self.line, LexicalErrorKind::UnexpectedCharacter))),
        };
        Some(Ok((kind, None)))
    }

    fn lexeme(&self) -> &'a str {
        let source: &'a str = self.source;
        &source[self.start..self.current]
    }

    fn advance(&mut self) -> Option<char> {
        let (offset, c) = self.src.next()?;
        self.current = offset + c.len_utf8();
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.src.peek().map(|&(_, c)| c)
    }

    fn peek_second(&mut self) -> Option<char> {
        self.src.peek_nth(1).map(|&(_, c)| c)
    }

    fn does_next_match(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn extract_string(&mut self) -> Option<Result<(TokenKind, Option<Literal>)>> {
        self.advance_until(|n| n == '"');
        if self.advance().is_none() {
            return Some(Err(Error::lexical(self.line, LexicalErrorKind::UnterminatedString)));
        }

        let lexeme = self.lexeme();
        let value = &lexeme[1..lexeme.len() - 1];
        Some(Ok((TokenKind::String, Some(Literal::String(value.to_string())))))
    }

    fn extract_number(&mut self) -> (TokenKind, Option<Literal>) {
        self.advance_until(|n| !n.is_ascii_digit());

        let has_fraction = self.peek() == Some('.')
            && self.peek_second().map_or(false, |n| n.is_ascii_digit());
        if has_fraction {
            self.advance();
            self.advance_until(|n| !n.is_ascii_digit());
        }

        // Digits with an optional `.digits` suffix always parse as f64.
        let value: f64 = self.lexeme().parse()
            .expect("a digit run is a valid float literal");
        (TokenKind::Number, Some(Literal::Number(value)))
    }

    fn extract_identifier(&mut self) -> TokenKind {
        self.advance_until(|n| !is_part_of_valid_identifier(n));
        TokenKind::keyword(self.lexeme()).unwrap_or(TokenKind::Identifier)
    }

    /// Consumes characters up to, but not including, the first one matching
    /// `should_stop` (or end of input). Newlines passed over bump the line count.
    fn advance_until(&mut self, should_stop: impl Fn(char) -> bool) {
        while let Some(next) = self.peek() {
            if should_stop(next) {
                break;
            }
            if next == '\n' {
                self.line += 1;
            }
            self.advance();
        }
    }
}

fn can_start_identifier(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_part_of_valid_identifier(c: char) -> bool {
    can_start_identifier(c) || c.is_ascii_digit()
}
