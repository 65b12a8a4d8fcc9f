//! Token model and lazy token streams

pub mod stream;
pub mod token;

pub use stream::{FilteredStream, TokenStream, Tokens};
pub use token::{Token, TokenKind};
