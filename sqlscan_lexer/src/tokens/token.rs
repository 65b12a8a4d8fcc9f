//! Token model for the sqlscan lexical front-end
//!
//! A token is an immutable tagged record: a kind, the exact text it denotes,
//! and a half-open byte span into the source buffer. Tokens are produced only
//! by the scanner and compared structurally.
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of token kinds produced by the scanner.
///
/// `Literal` is reserved for future numeric/date literal classification and
/// is never produced today; the fallback rule emits `Word` and leaves finer
/// classification to downstream passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// End-of-source marker, unique and always terminal
    Eof,
    /// Significant whitespace (a configured marker, e.g. a meaningful line break)
    Newline,
    /// Line or block comment, marker(s) included in the text
    Comment,
    /// Delimiters and unclassified identifier/literal runs
    Word,
    /// A configured operator literal
    Operator,
    /// Quoted string, outer quotes stripped, escapes left verbatim
    Str,
    /// Reserved: classified literal (numeric/date) — not yet produced
    Literal,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Eof => "eof",
            TokenKind::Newline => "newline",
            TokenKind::Comment => "comment",
            TokenKind::Word => "word",
            TokenKind::Operator => "operator",
            TokenKind::Str => "string",
            TokenKind::Literal => "literal",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single lexical token with its source span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// What kind of token this is
    pub kind: TokenKind,
    /// The exact substring this token denotes (quotes stripped for `Str`)
    pub text: String,
    /// Half-open byte span `[start, end)` into the source
    pub span: Span,
}

impl Token {
    /// Create a new token over `[start, end)`
    pub fn new(kind: TokenKind, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            span: Span::new(start, end),
        }
    }

    /// Create the eof token at `[offset, offset)`
    pub fn eof(offset: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: String::new(),
            span: Span::empty_at(offset),
        }
    }

    /// Byte offset where this token starts
    pub fn start_idx(&self) -> usize {
        self.span.start
    }

    /// Byte offset one past where this token ends
    pub fn end_idx(&self) -> usize {
        self.span.end
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    pub fn is_newline(&self) -> bool {
        matches!(self.kind, TokenKind::Newline)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::Comment)
    }

    pub fn is_word(&self) -> bool {
        matches!(self.kind, TokenKind::Word)
    }

    pub fn is_operator(&self) -> bool {
        matches!(self.kind, TokenKind::Operator)
    }

    pub fn is_str(&self) -> bool {
        matches!(self.kind, TokenKind::Str)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, TokenKind::Literal)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            write!(f, "<EOF>@{}", self.span)
        } else {
            write!(f, "{}({:?})@{}", self.kind, self.text, self.span)
        }
    }
}
