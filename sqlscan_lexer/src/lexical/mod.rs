//! Lexical analysis for the sqlscan front-end

pub mod scanner;

pub use scanner::{scan_one, ScanError};

use crate::config::LexConfig;
use crate::tokens::{Token, TokenKind, TokenStream};
use crate::utils::Span;

/// Summary statistics for a completed scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanMetrics {
    pub total_tokens: usize,
    pub word_tokens: usize,
    pub operator_tokens: usize,
    pub string_tokens: usize,
    pub comment_tokens: usize,
    pub newline_tokens: usize,
    pub max_string_length: usize,
}

impl ScanMetrics {
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut metrics = Self::default();
        for token in tokens {
            metrics.total_tokens += 1;
            match token.kind {
                TokenKind::Word => metrics.word_tokens += 1,
                TokenKind::Operator => metrics.operator_tokens += 1,
                TokenKind::Str => {
                    metrics.string_tokens += 1;
                    metrics.max_string_length = metrics.max_string_length.max(token.text.len());
                }
                TokenKind::Comment => metrics.comment_tokens += 1,
                TokenKind::Newline => metrics.newline_tokens += 1,
                TokenKind::Eof | TokenKind::Literal => {}
            }
        }
        metrics
    }

    /// Token count excluding comments, newlines, and the eof marker
    pub fn significant_tokens(&self) -> usize {
        self.word_tokens + self.operator_tokens + self.string_tokens
    }
}

/// Scan a whole source buffer into a token vector, eof token included last.
///
/// Fails fast on the first malformed token; the error is logged with its
/// source span before being returned.
pub fn scan_source(config: &LexConfig, source: &str) -> Result<Vec<Token>, ScanError> {
    let result = TokenStream::open(config, source).and_then(|stream| stream.to_vec());

    match result {
        Ok(tokens) => {
            let metrics = ScanMetrics::from_tokens(&tokens);
            crate::log_success!(
                crate::logging::codes::success::SCAN_COMPLETE,
                "Source scanned to end of input",
                "tokens" => metrics.total_tokens,
                "significant" => metrics.significant_tokens(),
                "source_bytes" => source.len()
            );
            Ok(tokens)
        }
        Err(err) => {
            crate::log_error!(
                err.error_code(),
                "Scanning failed",
                span = Span::empty_at(err.offset()),
                "offset" => err.offset()
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_scan_source_full_statement() {
        let config = LexConfig::sql();
        let tokens = scan_source(&config, "select a from t;").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["select", "a", "from", "t", ";", ""]);
        assert!(tokens.last().unwrap().is_eof());
    }

    #[test]
    fn test_scan_source_propagates_error() {
        let config = LexConfig::sql();
        let result = scan_source(&config, "select 'oops");
        assert_matches!(result, Err(ScanError::UnterminatedString { offset: 7 }));
    }

    #[test]
    fn test_metrics_from_tokens() {
        let config = LexConfig::sql();
        let tokens = scan_source(&config, "a = 'xy' -- done").unwrap();
        let metrics = ScanMetrics::from_tokens(&tokens);

        assert_eq!(metrics.total_tokens, 5);
        assert_eq!(metrics.word_tokens, 1);
        assert_eq!(metrics.operator_tokens, 1);
        assert_eq!(metrics.string_tokens, 1);
        assert_eq!(metrics.comment_tokens, 1);
        assert_eq!(metrics.max_string_length, 2);
        assert_eq!(metrics.significant_tokens(), 3);
    }

    #[test]
    fn test_metrics_empty_source() {
        let config = LexConfig::sql();
        let tokens = scan_source(&config, "").unwrap();
        let metrics = ScanMetrics::from_tokens(&tokens);
        assert_eq!(metrics.total_tokens, 1);
        assert_eq!(metrics.significant_tokens(), 0);
    }
}
