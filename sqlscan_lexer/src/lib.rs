// Internal modules
pub mod config;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use config::{ConfigError, LexConfig, LexConfigBuilder};
pub use lexical::{scan_one, scan_source, ScanError, ScanMetrics};
pub use tokens::{FilteredStream, Token, TokenKind, TokenStream};
pub use utils::Span;
