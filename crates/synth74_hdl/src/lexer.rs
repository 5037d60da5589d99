//! Lexical analyzer for the restricted HDL subset.
//!
//! Strips `//` line comments and `/* … */` block comments, then tokenizes
//! identifiers, integer literals, and the fixed set of punctuation and
//! operators this grammar accepts. String literals are not part of the
//! accepted subset and are not recognized.

use crate::token::{lookup_keyword, HdlToken, Token};
use synth74_diagnostics::code::{Category, DiagnosticCode};
use synth74_diagnostics::{Diagnostic, DiagnosticSink};
use synth74_source::{FileId, Span};

/// Lexes `source` into a vector of tokens, always terminated by [`HdlToken::Eof`].
///
/// Unrecognized characters produce an [`HdlToken::Error`] token and a
/// diagnostic on `sink`; lexing continues past them.
pub fn lex(source: &str, file: FileId, sink: &DiagnosticSink) -> Vec<Token> {
    let mut lexer = Lexer {
        source: source.as_bytes(),
        pos: 0,
        file,
        sink,
    };
    lexer.lex_all()
}

struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    file: FileId,
    sink: &'a DiagnosticSink,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            if self.pos >= self.source.len() {
                tokens.push(Token {
                    kind: HdlToken::Eof,
                    span: Span::new(self.file, self.pos as u32, self.pos as u32),
                });
                break;
            }
            tokens.push(self.next_token());
        }
        tokens
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        let idx = self.pos + offset;
        if idx < self.source.len() {
            self.source[idx]
        } else {
            0
        }
    }

    fn advance(&mut self) -> u8 {
        let b = self.source[self.pos];
        self.pos += 1;
        b
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(self.file, start as u32, self.pos as u32)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.advance();
                }
                b'/' if self.peek_at(1) == b'/' => {
                    while self.pos < self.source.len() && self.peek() != b'\n' {
                        self.advance();
                    }
                }
                b'/' if self.peek_at(1) == b'*' => {
                    self.advance();
                    self.advance();
                    while self.pos < self.source.len()
                        && !(self.peek() == b'*' && self.peek_at(1) == b'/')
                    {
                        self.advance();
                    }
                    if self.pos < self.source.len() {
                        self.advance();
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let c = self.peek();
        let kind = if c.is_ascii_alphabetic() || c == b'_' {
            self.lex_ident_or_keyword()
        } else if c.is_ascii_digit() {
            self.lex_int()
        } else {
            self.lex_punct()
        };
        Token {
            kind,
            span: self.span_from(start),
        }
    }

    fn lex_ident_or_keyword(&mut self) -> HdlToken {
        let start = self.pos;
        while self.peek().is_ascii_alphanumeric() || self.peek() == b'_' {
            self.advance();
        }
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap_or("");
        lookup_keyword(text).unwrap_or(HdlToken::Ident)
    }

    fn lex_int(&mut self) -> HdlToken {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        HdlToken::Int
    }

    fn lex_punct(&mut self) -> HdlToken {
        let start = self.pos;
        let c = self.advance();
        match c {
            b'(' => HdlToken::LParen,
            b')' => HdlToken::RParen,
            b'[' => HdlToken::LBracket,
            b']' => HdlToken::RBracket,
            b':' => HdlToken::Colon,
            b',' => HdlToken::Comma,
            b';' => HdlToken::Semi,
            b'.' => HdlToken::Dot,
            b'@' => HdlToken::At,
            b'~' => HdlToken::Tilde,
            b'&' => HdlToken::Amp,
            b'|' => HdlToken::Pipe,
            b'^' => HdlToken::Caret,
            b'?' => HdlToken::Question,
            b'=' => HdlToken::Eq,
            b'<' if self.peek() == b'=' => {
                self.advance();
                HdlToken::LtEq
            }
            _ => {
                let span = self.span_from(start);
                self.sink.emit(Diagnostic::error(
                    DiagnosticCode::new(Category::Parse, 100),
                    format!("unexpected character {:?}", c as char),
                    span,
                ));
                HdlToken::Error
            }
        }
    }
}
