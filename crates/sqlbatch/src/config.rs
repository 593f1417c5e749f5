use crate::alias::DEFAULT_CANONICAL_ALIAS;

/// Placeholder syntax used in the execution form of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderStyle {
    /// `@p1, @p2, ...` (SQL Server)
    #[default]
    AtP,
    /// `$1, $2, ...`
    Dollar,
}

impl PlaceholderStyle {
    /// Render the placeholder for a 1-based parameter index.
    pub fn render(self, index: usize) -> String {
        match self {
            Self::AtP => format!("@p{index}"),
            Self::Dollar => format!("${index}"),
        }
    }
}

/// Configuration for statement derivation.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Alias every statement is normalized to before it is reshaped.
    pub canonical_alias: String,
    /// Placeholder syntax of the execution form.
    pub placeholder: PlaceholderStyle,
    /// Tracing event level for derived statements.
    #[cfg(feature = "tracing")]
    pub log_level: tracing::Level,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            canonical_alias: DEFAULT_CANONICAL_ALIAS.to_string(),
            placeholder: PlaceholderStyle::default(),
            #[cfg(feature = "tracing")]
            log_level: tracing::Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl BatchConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canonical alias (validated when the builder is created).
    pub fn with_canonical_alias(mut self, alias: impl Into<String>) -> Self {
        self.canonical_alias = alias.into();
        self
    }

    /// Set the placeholder syntax.
    pub fn with_placeholder(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder = style;
        self
    }

    /// Override the tracing event level.
    #[cfg(feature = "tracing")]
    pub fn with_log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = level;
        self
    }

    /// Set maximum SQL length to log.
    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_rendering() {
        assert_eq!(PlaceholderStyle::AtP.render(1), "@p1");
        assert_eq!(PlaceholderStyle::Dollar.render(12), "$12");
    }

    #[test]
    fn builder_setters() {
        let c = BatchConfig::new()
            .with_canonical_alias("t")
            .with_placeholder(PlaceholderStyle::Dollar)
            .no_truncate();
        assert_eq!(c.canonical_alias, "t");
        assert_eq!(c.placeholder, PlaceholderStyle::Dollar);
        assert_eq!(c.max_sql_length, None);
        assert_eq!(BatchConfig::default().max_sql_length, Some(200));
    }

    #[test]
    fn log_setters() {
        let c = BatchConfig::new().no_truncate().with_max_sql_length(64);
        assert_eq!(c.max_sql_length, Some(64));

        #[cfg(feature = "tracing")]
        {
            assert_eq!(BatchConfig::default().log_level, tracing::Level::DEBUG);
            let c = c.with_log_level(tracing::Level::WARN);
            assert_eq!(c.log_level, tracing::Level::WARN);
        }
    }
}
