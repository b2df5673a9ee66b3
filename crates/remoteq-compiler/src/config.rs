//! Configuration for query translation.

/// Configuration for translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Maximum nesting depth for expression and operator-chain traversal
    pub(crate) recursion_limit: usize,
    /// Whether `$filter` values are percent-encoded
    pub(crate) encode_filter: bool,
    /// Whether a second `Expand` appends to the first instead of replacing it
    pub(crate) combine_expand: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            recursion_limit: Self::DEFAULT_RECURSION_LIMIT,
            encode_filter: true,
            combine_expand: false,
        }
    }
}

impl TranslatorConfig {
    pub const DEFAULT_RECURSION_LIMIT: usize = 256;

    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum traversal depth.
    pub fn recursion_limit(mut self, value: usize) -> Self {
        self.recursion_limit = value;
        self
    }

    /// Set whether `$filter` is percent-encoded.
    pub fn encode_filter(mut self, value: bool) -> Self {
        self.encode_filter = value;
        self
    }

    /// Set whether repeated `Expand` calls accumulate.
    pub fn combine_expand(mut self, value: bool) -> Self {
        self.combine_expand = value;
        self
    }

    pub fn get_recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    pub fn get_encode_filter(&self) -> bool {
        self.encode_filter
    }

    pub fn get_combine_expand(&self) -> bool {
        self.combine_expand
    }
}
