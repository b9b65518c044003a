//! Parser configuration

use crate::error::ConfigurationError;

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Limits and checking mode of [`JsonPathParser`](crate::parser::JsonPathParser)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest allowed nesting of parentheses, filters and nested queries
    pub max_nesting_depth: usize,
    /// Turn declared-type diagnostics found while parsing into parse failures
    pub strict_typing: bool,
}

impl ParserConfig {
    pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;
    pub const MAX_NESTING_DEPTH_LIMIT: usize = 1024;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// RFC 9535 well-typedness: reject queries with type errors
    #[must_use]
    pub fn strict() -> Self {
        Self::default().with_strict_typing(true)
    }

    #[must_use]
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    #[must_use]
    pub fn with_strict_typing(mut self, strict: bool) -> Self {
        self.strict_typing = strict;
        self
    }

    /// Check the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidParameter` when `max_nesting_depth`
    /// is outside `1..=1024`.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(1..=Self::MAX_NESTING_DEPTH_LIMIT).contains(&self.max_nesting_depth) {
            return Err(ConfigurationError::InvalidParameter(format!(
                "max_nesting_depth must be between 1 and {}, got {}",
                Self::MAX_NESTING_DEPTH_LIMIT,
                self.max_nesting_depth
            )));
        }
        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH,
            strict_typing: false,
        }
    }
}
