//! Immutable dialect configuration and its builder

use crate::config::constants::sql_dialect;
use crate::logging::codes;
use serde::{Deserialize, Serialize};

/// Dialect construction and loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("empty marker in {category} list")]
    EmptyMarker { category: &'static str },

    #[error("invalid dialect document: {0}")]
    InvalidToml(#[from] toml::de::Error),
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ConfigError::EmptyMarker { .. } => codes::config::EMPTY_MARKER,
            ConfigError::InvalidToml(_) => codes::config::INVALID_DIALECT_DOC,
        }
    }
}

/// Ordered literal-marker lists parametrizing scanning for one dialect.
///
/// List order encodes match priority: among configured literals competing at
/// the same offset, the first one in list order that matches wins, regardless
/// of length. Dialect authors must therefore list multi-character markers
/// before any marker that is a prefix of them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexConfig {
    delimiters: Vec<String>,
    operators: Vec<String>,
    quotation_marks: Vec<String>,
    line_comments: Vec<String>,
    block_comment: Option<(String, String)>,
    significant_whitespace: Vec<String>,
    /// Reserved for future language-specific literal syntaxes; never
    /// consulted by the scanner today.
    literal_prefixes: Vec<String>,
}

impl LexConfig {
    /// Start building a configuration
    pub fn builder() -> LexConfigBuilder {
        LexConfigBuilder::default()
    }

    /// The built-in SQL dialect: `--` line comments, `/* */` block comments,
    /// `'`/`"` quotes, common operators and delimiters, no significant
    /// whitespace.
    pub fn sql() -> Self {
        Self {
            delimiters: to_owned_list(sql_dialect::DELIMITERS),
            operators: to_owned_list(sql_dialect::OPERATORS),
            quotation_marks: to_owned_list(sql_dialect::QUOTATION_MARKS),
            line_comments: to_owned_list(sql_dialect::LINE_COMMENTS),
            block_comment: Some((
                sql_dialect::BLOCK_COMMENT_START.to_string(),
                sql_dialect::BLOCK_COMMENT_END.to_string(),
            )),
            significant_whitespace: Vec::new(),
            literal_prefixes: Vec::new(),
        }
    }

    /// Load a dialect from a TOML document. Missing categories default to
    /// empty lists; every present marker is validated to be non-empty.
    pub fn from_toml_str(doc: &str) -> Result<Self, ConfigError> {
        let config: LexConfig = toml::from_str(doc)?;
        config.validate()?;
        crate::log_debug!("dialect configuration loaded",
            "delimiters" => config.delimiters.len(),
            "operators" => config.operators.len(),
            "quotation_marks" => config.quotation_marks.len()
        );
        Ok(config)
    }

    pub fn delimiters(&self) -> &[String] {
        &self.delimiters
    }

    pub fn operators(&self) -> &[String] {
        &self.operators
    }

    pub fn quotation_marks(&self) -> &[String] {
        &self.quotation_marks
    }

    pub fn line_comments(&self) -> &[String] {
        &self.line_comments
    }

    pub fn block_comment(&self) -> Option<(&str, &str)> {
        self.block_comment
            .as_ref()
            .map(|(open, close)| (open.as_str(), close.as_str()))
    }

    pub fn significant_whitespace(&self) -> &[String] {
        &self.significant_whitespace
    }

    pub fn literal_prefixes(&self) -> &[String] {
        &self.literal_prefixes
    }

    /// Reject empty markers: an empty literal would match at every offset
    /// without consuming input, breaking forward progress.
    fn validate(&self) -> Result<(), ConfigError> {
        let lists: [(&'static str, &[String]); 5] = [
            ("delimiters", &self.delimiters),
            ("operators", &self.operators),
            ("quotation_marks", &self.quotation_marks),
            ("line_comments", &self.line_comments),
            ("significant_whitespace", &self.significant_whitespace),
        ];
        for (category, markers) in lists {
            if markers.iter().any(|m| m.is_empty()) {
                return Err(ConfigError::EmptyMarker { category });
            }
        }
        if let Some((open, close)) = &self.block_comment {
            if open.is_empty() || close.is_empty() {
                return Err(ConfigError::EmptyMarker {
                    category: "block_comment",
                });
            }
        }
        Ok(())
    }
}

fn to_owned_list(markers: &[&str]) -> Vec<String> {
    markers.iter().map(|m| m.to_string()).collect()
}

/// Builder for [`LexConfig`]; the built value is immutable.
#[derive(Debug, Clone, Default)]
pub struct LexConfigBuilder {
    delimiters: Vec<String>,
    operators: Vec<String>,
    quotation_marks: Vec<String>,
    line_comments: Vec<String>,
    block_comment: Option<(String, String)>,
    significant_whitespace: Vec<String>,
    literal_prefixes: Vec<String>,
}

impl LexConfigBuilder {
    pub fn delimiters<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delimiters = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn operators<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operators = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn quotation_marks<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quotation_marks = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn line_comments<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.line_comments = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn block_comment(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.block_comment = Some((open.into(), close.into()));
        self
    }

    pub fn significant_whitespace<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.significant_whitespace = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn literal_prefixes<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.literal_prefixes = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<LexConfig, ConfigError> {
        let config = LexConfig {
            delimiters: self.delimiters,
            operators: self.operators,
            quotation_marks: self.quotation_marks,
            line_comments: self.line_comments,
            block_comment: self.block_comment,
            significant_whitespace: self.significant_whitespace,
            literal_prefixes: self.literal_prefixes,
        };
        config.validate()?;
        Ok(config)
    }
}
