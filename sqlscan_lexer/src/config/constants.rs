//! Compile-time marker tables for the built-in SQL dialect

pub mod sql_dialect {
    /// Structural delimiters, consumed atomically and never combined
    pub const DELIMITERS: &[&str] = &["(", ")", ",", ";"];

    /// Operator literals in priority order. Matching is first-match-wins,
    /// so every multi-character operator must precede its single-character
    /// prefix in this table.
    pub const OPERATORS: &[&str] = &[
        "||", "**", "!=", "<>", "<=", ">=", ":=", "=", "<", ">", "+", "-", "*", "/", "%", ".",
    ];

    /// Quotation marks; SQL string literals use `'`, quoted identifiers `"`
    pub const QUOTATION_MARKS: &[&str] = &["'", "\""];

    /// Line comment markers (comment runs to end of line)
    pub const LINE_COMMENTS: &[&str] = &["--"];

    /// Block comment start marker
    pub const BLOCK_COMMENT_START: &str = "/*";

    /// Block comment end marker
    pub const BLOCK_COMMENT_END: &str = "*/";
}
