//! Single-token scanner
//!
//! [`scan_one`] produces exactly one token starting at a byte offset. Leading
//! insignificant whitespace is skipped inside the call, so the returned span
//! never covers whitespace. Classification is priority ordered and
//! first-match-wins within each marker list; the scanner never backtracks and
//! never looks past the token it returns.

use crate::config::LexConfig;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind};

/// Fatal scanning errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("unterminated string literal at offset {offset}")]
    UnterminatedString { offset: usize },
}

impl ScanError {
    /// Byte offset the error is anchored at (the opening quote for
    /// unterminated strings)
    pub fn offset(&self) -> usize {
        match self {
            ScanError::UnterminatedString { offset } => *offset,
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ScanError::UnterminatedString { .. } => codes::lexical::UNTERMINATED_STRING,
        }
    }
}

/// Scan exactly one token from `source` starting at byte offset `offset`.
///
/// Classification priority at the first significant character:
/// end of input, significant whitespace, line comment, block comment,
/// delimiter, operator, quoted string, then the fallback word rule. The
/// returned token's span satisfies `offset <= span.start <= span.end`, and
/// every non-eof token has a non-empty span, so repeated calls at the
/// previous token's end offset always make progress.
pub fn scan_one(source: &str, offset: usize, config: &LexConfig) -> Result<Token, ScanError> {
    let mut pos = offset;

    loop {
        let rest = &source[pos..];

        if rest.is_empty() {
            return Ok(Token::eof(pos));
        }

        if let Some(marker) = match_one_of(rest, config.significant_whitespace()) {
            let end = pos + marker.len();
            return Ok(Token::new(TokenKind::Newline, marker, pos, end));
        }

        let Some(ch) = rest.chars().next() else {
            return Ok(Token::eof(pos));
        };
        if ch.is_whitespace() {
            pos += ch.len_utf8();
            continue;
        }

        if let Some(marker) = match_one_of(rest, config.line_comments()) {
            // Runs to the line break, exclusive; an unterminated line
            // comment silently consumes the rest of the source.
            let end = match rest[marker.len()..].find('\n') {
                Some(nl) => pos + marker.len() + nl,
                None => source.len(),
            };
            return Ok(Token::new(TokenKind::Comment, &source[pos..end], pos, end));
        }

        if let Some((open, close)) = config.block_comment() {
            if rest.starts_with(open) {
                // Close marker is part of the comment; an unterminated block
                // comment silently consumes the rest of the source.
                let end = match rest[open.len()..].find(close) {
                    Some(cl) => pos + open.len() + cl + close.len(),
                    None => source.len(),
                };
                return Ok(Token::new(TokenKind::Comment, &source[pos..end], pos, end));
            }
        }

        if let Some(marker) = match_one_of(rest, config.delimiters()) {
            let end = pos + marker.len();
            return Ok(Token::new(TokenKind::Word, marker, pos, end));
        }

        if let Some(marker) = match_one_of(rest, config.operators()) {
            let end = pos + marker.len();
            return Ok(Token::new(TokenKind::Operator, marker, pos, end));
        }

        if let Some(quote) = match_one_of(rest, config.quotation_marks()) {
            return scan_string(source, pos, quote);
        }

        return Ok(scan_word(source, pos, config));
    }
}

/// First marker in `markers` that is a prefix of `rest`. List order is match
/// priority; length is never consulted.
fn match_one_of<'a>(rest: &str, markers: &'a [String]) -> Option<&'a str> {
    markers
        .iter()
        .find(|marker| rest.starts_with(marker.as_str()))
        .map(|marker| marker.as_str())
}

/// Scan a quoted string opened at `start` by `quote`. The same mark must
/// close it; a backslash escapes the following character, including the
/// quote. Reaching end of input before the closing mark is fatal, anchored
/// at the opening quote.
fn scan_string(source: &str, start: usize, quote: &str) -> Result<Token, ScanError> {
    let body_start = start + quote.len();
    let mut pos = body_start;

    loop {
        let rest = &source[pos..];

        if rest.is_empty() {
            return Err(ScanError::UnterminatedString { offset: start });
        }

        if let Some(after_backslash) = rest.strip_prefix('\\') {
            match after_backslash.chars().next() {
                Some(escaped) => {
                    pos += 1 + escaped.len_utf8();
                }
                // Lone trailing backslash is a body character; the next
                // iteration reports the string unterminated.
                None => {
                    pos += 1;
                }
            }
            continue;
        }

        if rest.starts_with(quote) {
            let end = pos + quote.len();
            let body = &source[body_start..pos];
            return Ok(Token::new(TokenKind::Str, body, start, end));
        }

        let Some(ch) = rest.chars().next() else {
            return Err(ScanError::UnterminatedString { offset: start });
        };
        pos += ch.len_utf8();
    }
}

/// Fallback word rule: consume characters until whitespace or the start of
/// any configured marker. Always consumes at least one character, so a
/// character that is the first byte of no marker still becomes a (possibly
/// one-character) word.
fn scan_word(source: &str, start: usize, config: &LexConfig) -> Token {
    let mut pos = start;

    for ch in source[start..].chars() {
        let rest = &source[pos..];
        let at_boundary = pos > start
            && (ch.is_whitespace()
                || match_one_of(rest, config.significant_whitespace()).is_some()
                || match_one_of(rest, config.line_comments()).is_some()
                || starts_block_comment_marker(rest, config)
                || match_one_of(rest, config.quotation_marks()).is_some()
                || match_one_of(rest, config.delimiters()).is_some()
                || match_one_of(rest, config.operators()).is_some());
        if at_boundary {
            break;
        }
        pos += ch.len_utf8();
    }

    Token::new(TokenKind::Word, &source[start..pos], start, pos)
}

/// A word also stops at a block comment close marker, so `a*/b` inside a
/// word position does not swallow the close.
fn starts_block_comment_marker(rest: &str, config: &LexConfig) -> bool {
    match config.block_comment() {
        Some((open, close)) => rest.starts_with(open) || rest.starts_with(close),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sql() -> LexConfig {
        LexConfig::sql()
    }

    fn one(source: &str, offset: usize) -> Token {
        scan_one(source, offset, &sql()).unwrap()
    }

    #[test]
    fn test_empty_source_is_eof() {
        let token = one("", 0);
        assert!(token.is_eof());
        assert_eq!(token.span.start, 0);
        assert_eq!(token.span.end, 0);
    }

    #[test]
    fn test_whitespace_only_source_is_eof_at_len() {
        let token = one("  ", 0);
        assert!(token.is_eof());
        assert_eq!(token.start_idx(), 2);
        assert_eq!(token.end_idx(), 2);
    }

    #[test]
    fn test_leading_whitespace_skipped() {
        let token = one("   select", 0);
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "select");
        assert_eq!(token.start_idx(), 3);
        assert_eq!(token.end_idx(), 9);
    }

    #[test]
    fn test_word_run() {
        let token = one("select id", 0);
        assert_eq!(token, Token::new(TokenKind::Word, "select", 0, 6));
    }

    #[test]
    fn test_delimiter_is_single_word() {
        let token = one("(a", 0);
        assert_eq!(token, Token::new(TokenKind::Word, "(", 0, 1));
    }

    #[test]
    fn test_adjacent_delimiters_stay_atomic() {
        // "(a=b)" scans as five tokens with no merging
        let config = sql();
        let source = "(a=b)";
        let mut offset = 0;
        let mut tokens = Vec::new();
        loop {
            let token = scan_one(source, offset, &config).unwrap();
            offset = token.end_idx();
            let eof = token.is_eof();
            tokens.push((token.kind, token.text));
            if eof {
                break;
            }
        }
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Word, "(".to_string()),
                (TokenKind::Word, "a".to_string()),
                (TokenKind::Operator, "=".to_string()),
                (TokenKind::Word, "b".to_string()),
                (TokenKind::Word, ")".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_operator_first_match_wins() {
        assert_eq!(one("<=3", 0), Token::new(TokenKind::Operator, "<=", 0, 2));
        assert_eq!(one("<>3", 0), Token::new(TokenKind::Operator, "<>", 0, 2));
        assert_eq!(one("<3", 0), Token::new(TokenKind::Operator, "<", 0, 1));
    }

    #[test]
    fn test_priority_is_list_order_not_length() {
        // With "<" listed before "<=", the shorter marker wins on "<=".
        let config = LexConfig::builder()
            .operators(["<", "<="])
            .build()
            .unwrap();
        let token = scan_one("<=", 0, &config).unwrap();
        assert_eq!(token, Token::new(TokenKind::Operator, "<", 0, 1));
    }

    #[test]
    fn test_line_comment_excludes_newline() {
        let token = one("-- note\nselect", 0);
        assert_eq!(token, Token::new(TokenKind::Comment, "-- note", 0, 7));
    }

    #[test]
    fn test_line_comment_runs_to_eof() {
        let token = one("-- note", 0);
        assert_eq!(token, Token::new(TokenKind::Comment, "-- note", 0, 7));
    }

    #[test]
    fn test_block_comment_includes_markers() {
        let token = one("/* x */y", 0);
        assert_eq!(token, Token::new(TokenKind::Comment, "/* x */", 0, 7));
    }

    #[test]
    fn test_unterminated_block_comment_consumes_rest() {
        // Silent, unlike strings
        let token = one("/* x", 0);
        assert_eq!(token, Token::new(TokenKind::Comment, "/* x", 0, 4));
    }

    #[test]
    fn test_block_comment_close_needs_full_marker() {
        let token = one("/* a * b */", 0);
        assert_eq!(token.text, "/* a * b */");
        assert_eq!(token.end_idx(), 11);
    }

    #[test]
    fn test_string_strips_quotes() {
        let token = one("'abc' rest", 0);
        assert_eq!(token, Token::new(TokenKind::Str, "abc", 0, 5));
    }

    #[test]
    fn test_string_escaped_quote_stays_inside() {
        let token = one(r"'a\'b'", 0);
        assert_eq!(token.kind, TokenKind::Str);
        assert_eq!(token.text, r"a\'b");
        assert_eq!(token.end_idx(), 6);
    }

    #[test]
    fn test_string_escaped_backslash() {
        let token = one(r"'a\\'", 0);
        assert_eq!(token.text, r"a\\");
        assert_eq!(token.end_idx(), 5);
    }

    #[test]
    fn test_double_quoted_string_needs_matching_close() {
        let token = one("\"a'b\"", 0);
        assert_eq!(token, Token::new(TokenKind::Str, "a'b", 0, 5));
    }

    #[test]
    fn test_unterminated_string_is_fatal_at_open_quote() {
        let err = scan_one("'abc", 0, &sql()).unwrap_err();
        assert_matches!(err, ScanError::UnterminatedString { offset: 0 });
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn test_unterminated_string_offset_after_prefix() {
        let err = scan_one("a 'bc", 2, &sql()).unwrap_err();
        assert_matches!(err, ScanError::UnterminatedString { offset: 2 });
    }

    #[test]
    fn test_lone_trailing_backslash_is_unterminated() {
        let err = scan_one("'a\\", 0, &sql()).unwrap_err();
        assert_matches!(err, ScanError::UnterminatedString { offset: 0 });
    }

    #[test]
    fn test_comment_beats_operator_on_shared_prefix() {
        // "--" is a comment even though "-" is an operator, and "/*" is a
        // comment even though "/" is an operator
        assert_eq!(one("--x", 0).kind, TokenKind::Comment);
        assert_eq!(one("-x", 0), Token::new(TokenKind::Operator, "-", 0, 1));
        assert_eq!(one("/*x", 0).kind, TokenKind::Comment);
        assert_eq!(one("/x", 0), Token::new(TokenKind::Operator, "/", 0, 1));
    }

    #[test]
    fn test_word_stops_at_operator() {
        let token = one("a=b", 0);
        assert_eq!(token, Token::new(TokenKind::Word, "a", 0, 1));
    }

    #[test]
    fn test_word_stops_at_quote() {
        let token = one("x'y'", 0);
        assert_eq!(token, Token::new(TokenKind::Word, "x", 0, 1));
    }

    #[test]
    fn test_word_stops_at_block_comment_close() {
        let config = LexConfig::builder().block_comment("/*", "*/").build().unwrap();
        let token = scan_one("ab*/cd", 0, &config).unwrap();
        assert_eq!(token, Token::new(TokenKind::Word, "ab", 0, 2));
    }

    #[test]
    fn test_significant_whitespace_token() {
        let config = LexConfig::builder()
            .significant_whitespace(["\n"])
            .build()
            .unwrap();
        let token = scan_one("  \nx", 0, &config).unwrap();
        assert_eq!(token, Token::new(TokenKind::Newline, "\n", 2, 3));
    }

    #[test]
    fn test_insignificant_newline_skipped() {
        let token = one("\nselect", 0);
        assert_eq!(token, Token::new(TokenKind::Word, "select", 1, 7));
    }

    #[test]
    fn test_multibyte_source_uses_byte_offsets() {
        let token = one("été = 1", 0);
        assert_eq!(token.text, "été");
        assert_eq!(token.start_idx(), 0);
        assert_eq!(token.end_idx(), "été".len());
    }

    #[test]
    fn test_multibyte_in_string_body() {
        let source = "'héllo'";
        let token = one(source, 0);
        assert_eq!(token.text, "héllo");
        assert_eq!(token.end_idx(), source.len());
    }

    #[test]
    fn test_scan_at_offset_resumes_mid_source() {
        let source = "a = b";
        let first = one(source, 0);
        assert_eq!(first.text, "a");
        let second = one(source, first.end_idx());
        assert_eq!(second, Token::new(TokenKind::Operator, "=", 2, 3));
    }

    #[test]
    fn test_round_trip_spans_reconstruct_source() {
        // Concatenating whitespace gaps and token spans reproduces the input
        let config = sql();
        let source = "select a, b -- trailing\nfrom t /* c */ where a <> 'x\\'y'";
        let mut offset = 0;
        let mut rebuilt = String::new();
        loop {
            let token = scan_one(source, offset, &config).unwrap();
            rebuilt.push_str(&source[offset..token.start_idx()]);
            rebuilt.push_str(token.span.slice(source));
            if token.is_eof() {
                break;
            }
            offset = token.end_idx();
        }
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_no_marker_config_yields_words() {
        let config = LexConfig::builder().build().unwrap();
        let token = scan_one("a=b c", 0, &config).unwrap();
        assert_eq!(token, Token::new(TokenKind::Word, "a=b", 0, 3));
    }
}
