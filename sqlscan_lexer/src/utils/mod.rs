//! Shared utility types for the lexer

pub mod span;

pub use span::Span;
