//! Extraction options and configuration.

/// Which document family a dump belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentVariant {
    /// State/county directory listings with provider numbers.
    #[default]
    Directory,
    /// Healthcare system and network sections.
    Systems,
}

/// Options for running the extraction pipeline.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Document variant to extract.
    pub variant: DocumentVariant,

    /// Maximum lines merged when completing a wrapped header.
    pub max_lookahead: usize,

    /// Fraction of the page width dividing the two columns.
    pub column_split: f32,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document variant.
    pub fn with_variant(mut self, variant: DocumentVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Extract the directory variant.
    pub fn directory(mut self) -> Self {
        self.variant = DocumentVariant::Directory;
        self
    }

    /// Extract the systems/networks variant.
    pub fn systems(mut self) -> Self {
        self.variant = DocumentVariant::Systems;
        self
    }

    /// Set the wrapped-header lookahead bound.
    pub fn with_max_lookahead(mut self, lines: usize) -> Self {
        self.max_lookahead = lines;
        self
    }

    /// Set the column split fraction.
    pub fn with_column_split(mut self, split: f32) -> Self {
        self.column_split = split.clamp(0.1, 0.9);
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            variant: DocumentVariant::Directory,
            max_lookahead: 3,
            column_split: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ExtractOptions::new()
            .systems()
            .with_max_lookahead(2)
            .with_column_split(0.45);
        assert_eq!(options.variant, DocumentVariant::Systems);
        assert_eq!(options.max_lookahead, 2);
        assert_eq!(options.column_split, 0.45);
    }

    #[test]
    fn test_column_split_clamped() {
        let options = ExtractOptions::new().with_column_split(2.0);
        assert_eq!(options.column_split, 0.9);
    }
}
