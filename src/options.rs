use crate::store::PARAM_VALUE_LENGTH;

/// How a malformed value token is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionMode {
    /// Numbers are read like C's `atoi`/`atof`: the longest numeric prefix wins
    /// and text with no numeric prefix becomes `0`. Never an error.
    #[default]
    Permissive,
    /// The whole token must be a valid literal of the declared type.
    Strict,
}

/// What an I/O failure partway through the file means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadErrorPolicy {
    /// Stop reading and keep what was parsed so far. Logged as a warning.
    #[default]
    TreatAsEof,
    /// Abort the parse with [`ParseError::Read`](crate::ParseError::Read).
    Fail,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub conversion: ConversionMode,
    pub read_errors: ReadErrorPolicy,
    /// String values longer than this many grapheme clusters are truncated.
    pub max_string_len: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            conversion: ConversionMode::Permissive,
            read_errors: ReadErrorPolicy::TreatAsEof,
            max_string_len: PARAM_VALUE_LENGTH,
        }
    }
}

impl ParseOptions {
    /// Strict conversions and hard read errors.
    pub fn strict() -> Self {
        Self {
            conversion: ConversionMode::Strict,
            read_errors: ReadErrorPolicy::Fail,
            ..Self::default()
        }
    }

    pub fn with_conversion(mut self, conversion: ConversionMode) -> Self {
        self.conversion = conversion;
        self
    }

    pub fn with_read_errors(mut self, read_errors: ReadErrorPolicy) -> Self {
        self.read_errors = read_errors;
        self
    }

    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = max_string_len;
        self
    }
}
