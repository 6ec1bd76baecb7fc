//! Directory walker for file discovery
//!
//! Streams matching files using walkdir. A batch only looks at the entries
//! directly inside its input folder.

use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use super::{DiscoveredFile, DiscoveryError, Result, filter::ImageMatcher};

/// Options for file discovery
#[derive(Debug, Clone)]
pub struct FileDiscoveryOptions {
    /// Yield entries sorted by file name instead of listing order
    pub sort_by_name: bool,
}

impl Default for FileDiscoveryOptions {
    fn default() -> Self {
        Self { sort_by_name: true }
    }
}

impl FileDiscoveryOptions {
    /// Create new options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether entries are sorted by file name
    pub fn with_sort_by_name(mut self, sort: bool) -> Self {
        self.sort_by_name = sort;
        self
    }
}

/// Iterator over the images directly inside one folder
///
/// Subdirectories are never entered. Symbolic links are followed, so a link
/// to an image counts as an image.
pub struct FileDiscovery {
    walker: walkdir::IntoIter,
    matcher: ImageMatcher,
}

impl FileDiscovery {
    /// Create a new file discovery iterator
    pub fn new(path: &Path, options: FileDiscoveryOptions) -> Result<Self> {
        if !path.exists() {
            return Err(DiscoveryError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(DiscoveryError::NotADirectory(path.to_path_buf()));
        }

        let mut walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);

        if options.sort_by_name {
            walker = walker.sort_by_file_name();
        }

        Ok(Self {
            walker: walker.into_iter(),
            matcher: ImageMatcher::new()?,
        })
    }

    /// Check if an entry is a file we should include
    fn should_include_entry(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_file() {
            return false;
        }

        // Match on the name only so the folder path cannot influence the result.
        self.matcher.matches(Path::new(entry.file_name()))
    }
}

impl Iterator for FileDiscovery {
    type Item = Result<DiscoveredFile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    if !self.should_include_entry(&entry) {
                        continue;
                    }
                    match entry.metadata() {
                        Ok(metadata) => {
                            return Some(Ok(DiscoveredFile {
                                path: entry.path().to_path_buf(),
                                size: metadata.len(),
                            }));
                        }
                        Err(e) => {
                            log::warn!("Failed to read metadata for {:?}: {}", entry.path(), e);
                            continue;
                        }
                    }
                }
                // The folder itself could not be read.
                Err(e) if e.depth() == 0 => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_default();
                    return Some(Err(DiscoveryError::Walk {
                        path,
                        message: e.to_string(),
                    }));
                }
                Err(e) => {
                    log::warn!("Walk error: {e}");
                    continue;
                }
            }
        }
    }
}

/// Convenience function to discover files in a directory
pub fn discover_files(path: &Path, options: FileDiscoveryOptions) -> Result<Vec<DiscoveredFile>> {
    FileDiscovery::new(path, options)?.collect()
}
