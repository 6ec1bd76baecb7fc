//! Image file name matching over a GlobSet
//!
//! File names are compared against the supported extensions in any letter
//! case, so `c.JPG` and `scan.TiFf` are both images.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

use super::{
    DiscoveryError, Result,
    extensions::{IMAGE_EXTENSIONS, extensions_to_patterns},
};

/// Case-insensitive matcher for supported image file names
#[derive(Debug, Clone)]
pub struct ImageMatcher {
    globset: GlobSet,
    patterns: Vec<String>,
}

impl ImageMatcher {
    /// Matcher for every supported image extension
    pub fn new() -> Result<Self> {
        Self::from_patterns(&extensions_to_patterns(IMAGE_EXTENSIONS))
    }

    fn from_patterns(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(true)
                .literal_separator(true)
                .build()
                .map_err(|e| DiscoveryError::InvalidPattern(format!("{pattern}: {e}")))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| DiscoveryError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            globset,
            patterns: patterns.to_vec(),
        })
    }

    /// Check if a file name is a supported image
    pub fn matches(&self, file_name: &Path) -> bool {
        self.globset.is_match(file_name)
    }

    /// Glob patterns the matcher was built from
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
