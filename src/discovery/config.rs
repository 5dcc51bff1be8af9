//! Parser configuration for discovery documents.

/// Options controlling how strictly incoming documents are read.
///
/// # Examples
///
/// ```rust
/// use xrd_entity::discovery::ParserConfig;
///
/// let config = ParserConfig::default();
/// assert!(config.require_xrd_namespace);
///
/// let lenient = ParserConfig::new().with_require_xrd_namespace(false);
/// assert!(!lenient.require_xrd_namespace);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Only match elements bound to the XRD namespace.
    ///
    /// When disabled, `XRD`, `Subject`, `Alias` and `Link` are matched on
    /// their local names whatever namespace they are in.
    pub require_xrd_namespace: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            require_xrd_namespace: true,
        }
    }
}

impl ParserConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether elements must be in the XRD namespace.
    pub fn with_require_xrd_namespace(mut self, require: bool) -> Self {
        self.require_xrd_namespace = require;
        self
    }
}
