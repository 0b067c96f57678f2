//! Parsing options and configuration.

/// Options for decoding note files.
///
/// The binary layout itself (address size, length-field width, page
/// dimensions) is fixed per format variant and is not configurable here;
/// see [`crate::format`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Whether to decode pages in parallel.
    ///
    /// Pages only read the footer and the source buffer, so they can be
    /// decoded independently; the result is identical either way.
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel page decoding.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel page decoding.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}
