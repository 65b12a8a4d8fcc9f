//! Lazy persistent token streams
//!
//! A [`TokenStream`] is an immutable snapshot: one scanned head token plus
//! the offset where the next scan starts. Advancing never mutates; it scans
//! fresh and returns a new snapshot, so two holders of the same stream can
//! advance independently and observe identical tokens. Nothing past the head
//! is scanned until asked for, so errors later in the source surface only
//! when an advance reaches them.

use crate::config::LexConfig;
use crate::lexical::scanner::{scan_one, ScanError};
use crate::tokens::Token;

/// An immutable position in the token sequence of one source buffer.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    config: &'a LexConfig,
    source: &'a str,
    current: Token,
    next_offset: usize,
}

impl<'a> TokenStream<'a> {
    /// Open a stream at the start of `source`. The head token is scanned
    /// eagerly, so a malformed first token fails here.
    pub fn open(config: &'a LexConfig, source: &'a str) -> Result<Self, ScanError> {
        Self::open_at(config, source, 0)
    }

    /// Open a stream with its head token scanned at byte offset `offset`
    pub fn open_at(config: &'a LexConfig, source: &'a str, offset: usize) -> Result<Self, ScanError> {
        let current = scan_one(source, offset, config)?;
        let next_offset = current.end_idx();
        Ok(Self {
            config,
            source,
            current,
            next_offset,
        })
    }

    /// The head token of this snapshot. Repeated calls return the same token.
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Whether the head token is the eof marker
    pub fn is_eof(&self) -> bool {
        self.current.is_eof()
    }

    /// Byte offset where the head token starts
    pub fn offset(&self) -> usize {
        self.current.start_idx()
    }

    /// The source buffer this stream scans
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// A new snapshot whose head is the token after this one. At eof the
    /// returned stream is again at eof; `self` is never modified.
    pub fn advance(&self) -> Result<Self, ScanError> {
        Self::open_at(self.config, self.source, self.next_offset)
    }

    /// Drain the stream into a vector, eof token included last
    pub fn to_vec(&self) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        let mut stream = self.clone();
        loop {
            tokens.push(stream.current().clone());
            if stream.is_eof() {
                return Ok(tokens);
            }
            stream = stream.advance()?;
        }
    }

    /// Iterate the remaining tokens, eof included last. The iterator is
    /// fused: after eof (or an error) it yields `None`.
    pub fn iter(&self) -> Tokens<'a> {
        Tokens {
            next: Some(Ok(self.clone())),
        }
    }

    /// This stream with comment tokens hidden
    pub fn filter_comments(&self) -> Result<FilteredStream<'a, fn(&Token) -> bool>, ScanError> {
        FilteredStream::open(self.clone(), not_comment as fn(&Token) -> bool)
    }
}

fn not_comment(token: &Token) -> bool {
    !token.is_comment()
}

/// Iterator over the tokens of a stream
pub struct Tokens<'a> {
    next: Option<Result<TokenStream<'a>, ScanError>>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next.take()? {
            Err(err) => Some(Err(err)),
            Ok(stream) => {
                let token = stream.current().clone();
                if !token.is_eof() {
                    self.next = Some(stream.advance());
                }
                Some(Ok(token))
            }
        }
    }
}

/// A stream decorator that hides tokens rejected by a predicate.
///
/// The eof token is always visible regardless of the predicate, so consumers
/// looping until eof still terminate.
#[derive(Debug, Clone)]
pub struct FilteredStream<'a, P>
where
    P: Fn(&Token) -> bool + Clone,
{
    stream: TokenStream<'a>,
    predicate: P,
}

impl<'a, P> FilteredStream<'a, P>
where
    P: Fn(&Token) -> bool + Clone,
{
    /// Wrap `stream`, skipping forward until its head is accepted by
    /// `predicate` or is eof
    pub fn open(stream: TokenStream<'a>, predicate: P) -> Result<Self, ScanError> {
        let mut stream = stream;
        while !stream.is_eof() && !predicate(stream.current()) {
            stream = stream.advance()?;
        }
        Ok(Self { stream, predicate })
    }

    /// The head token; always accepted by the predicate or eof
    pub fn current(&self) -> &Token {
        self.stream.current()
    }

    pub fn is_eof(&self) -> bool {
        self.stream.is_eof()
    }

    pub fn offset(&self) -> usize {
        self.stream.offset()
    }

    /// A new snapshot at the next accepted token
    pub fn advance(&self) -> Result<Self, ScanError> {
        Self::open(self.stream.advance()?, self.predicate.clone())
    }

    /// Drain the remaining accepted tokens, eof included last
    pub fn to_vec(&self) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        let mut filtered = self.clone();
        loop {
            tokens.push(filtered.current().clone());
            if filtered.is_eof() {
                return Ok(tokens);
            }
            filtered = filtered.advance()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;

    fn sql() -> LexConfig {
        LexConfig::sql()
    }

    #[test]
    fn test_open_scans_head_eagerly() {
        let config = sql();
        let stream = TokenStream::open(&config, "select 1").unwrap();
        assert_eq!(stream.current().text, "select");
        assert_eq!(stream.offset(), 0);
        assert!(!stream.is_eof());
    }

    #[test]
    fn test_open_empty_source_is_eof() {
        let config = sql();
        let stream = TokenStream::open(&config, "").unwrap();
        assert!(stream.is_eof());
        assert_eq!(stream.current().span.start, 0);
    }

    #[test]
    fn test_open_fails_on_malformed_head() {
        let config = sql();
        let result = TokenStream::open(&config, "'abc");
        assert_matches!(result, Err(ScanError::UnterminatedString { offset: 0 }));
    }

    #[test]
    fn test_errors_are_lazy_past_the_head() {
        // The unterminated string is only reached by the second advance
        let config = sql();
        let stream = TokenStream::open(&config, "a b 'x").unwrap();
        assert_eq!(stream.current().text, "a");
        let second = stream.advance().unwrap();
        assert_eq!(second.current().text, "b");
        assert_matches!(
            second.advance(),
            Err(ScanError::UnterminatedString { offset: 4 })
        );
    }

    #[test]
    fn test_advance_does_not_mutate() {
        let config = sql();
        let stream = TokenStream::open(&config, "a b c").unwrap();
        let advanced = stream.advance().unwrap();
        assert_eq!(stream.current().text, "a");
        assert_eq!(advanced.current().text, "b");
        // Two independent advances from the same snapshot agree
        assert_eq!(
            stream.advance().unwrap().current(),
            advanced.current()
        );
    }

    #[test]
    fn test_advance_at_eof_stays_at_eof() {
        let config = sql();
        let stream = TokenStream::open(&config, "a").unwrap();
        let eof = stream.advance().unwrap();
        assert!(eof.is_eof());
        let still_eof = eof.advance().unwrap();
        assert!(still_eof.is_eof());
        assert_eq!(still_eof.current(), eof.current());
    }

    #[test]
    fn test_to_vec_includes_eof_last() {
        let config = sql();
        let stream = TokenStream::open(&config, "a = 1").unwrap();
        let tokens = stream.to_vec().unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Word,
                TokenKind::Operator,
                TokenKind::Word,
                TokenKind::Eof
            ]
        );
        assert_eq!(tokens.last().unwrap().span.start, 5);
    }

    #[test]
    fn test_to_vec_leaves_stream_usable() {
        let config = sql();
        let stream = TokenStream::open(&config, "a b").unwrap();
        let _ = stream.to_vec().unwrap();
        assert_eq!(stream.current().text, "a");
        assert_eq!(stream.to_vec().unwrap(), stream.to_vec().unwrap());
    }

    #[test]
    fn test_iter_yields_tokens_then_fuses() {
        let config = sql();
        let stream = TokenStream::open(&config, "a b").unwrap();
        let mut iter = stream.iter();
        assert_eq!(iter.next().unwrap().unwrap().text, "a");
        assert_eq!(iter.next().unwrap().unwrap().text, "b");
        assert!(iter.next().unwrap().unwrap().is_eof());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_iter_surfaces_error_then_fuses() {
        let config = sql();
        let stream = TokenStream::open(&config, "a 'x").unwrap();
        let mut iter = stream.iter();
        assert_eq!(iter.next().unwrap().unwrap().text, "a");
        assert_matches!(
            iter.next(),
            Some(Err(ScanError::UnterminatedString { offset: 2 }))
        );
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_filter_comments_hides_comments() {
        let config = sql();
        let source = "-- lead\nselect /* mid */ 1 -- tail";
        let stream = TokenStream::open(&config, source).unwrap();
        let filtered = stream.filter_comments().unwrap();
        let texts: Vec<String> = filtered
            .to_vec()
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["select", "1", ""]);
    }

    #[test]
    fn test_filter_never_hides_eof() {
        let config = sql();
        let stream = TokenStream::open(&config, "-- only comments").unwrap();
        let filtered = FilteredStream::open(stream, |_| false).unwrap();
        assert!(filtered.is_eof());
        let advanced = filtered.advance().unwrap();
        assert!(advanced.is_eof());
    }

    #[test]
    fn test_filtered_stream_is_persistent() {
        let config = sql();
        let stream = TokenStream::open(&config, "a -- c\nb").unwrap();
        let filtered = stream.filter_comments().unwrap();
        let advanced = filtered.advance().unwrap();
        assert_eq!(filtered.current().text, "a");
        assert_eq!(advanced.current().text, "b");
    }

    #[test]
    fn test_filter_skips_consecutive_rejects() {
        let config = sql();
        let source = "/* a */ -- b\n/* c */ x";
        let stream = TokenStream::open(&config, source).unwrap();
        let filtered = stream.filter_comments().unwrap();
        assert_eq!(filtered.current().text, "x");
    }

    #[test]
    fn test_custom_predicate_filter() {
        let config = sql();
        let stream = TokenStream::open(&config, "a = b").unwrap();
        let filtered = FilteredStream::open(stream, |t: &Token| !t.is_operator()).unwrap();
        let texts: Vec<String> = filtered
            .to_vec()
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["a", "b", ""]);
    }

    #[test]
    fn test_offset_tracks_head_start() {
        let config = sql();
        let stream = TokenStream::open(&config, "  ab cd").unwrap();
        assert_eq!(stream.offset(), 2);
        assert_eq!(stream.advance().unwrap().offset(), 5);
    }
}
