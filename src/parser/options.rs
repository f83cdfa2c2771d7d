//! Reading options and configuration.

/// Options for reading Word documents.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether to read document properties (title, author, dates)
    pub include_metadata: bool,
}

impl ReadOptions {
    /// Create new read options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip invalid attributes and properties).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable reading document properties.
    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            include_metadata: true,
        }
    }
}

/// Error handling mode during reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip invalid content and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_options_builder() {
        let options = ReadOptions::new().lenient().with_metadata(false);

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.include_metadata);
    }

    #[test]
    fn test_default_is_strict() {
        let options = ReadOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.include_metadata);
    }
}
