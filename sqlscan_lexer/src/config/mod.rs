//! Lexical configuration for the sqlscan lexer
//!
//! A [`LexConfig`] is the immutable, per-dialect set of ordered literal-marker
//! lists that parametrizes scanning. It is built once — via the builder, the
//! built-in SQL constructor, or a TOML dialect document — and passed by
//! reference into every scan call; no scan can observe a configuration
//! mutated mid-flight.

pub mod constants;
pub mod dialect;

pub use dialect::{ConfigError, LexConfig, LexConfigBuilder};
