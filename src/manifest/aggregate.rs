//! Sub-manifest aggregation
//!
//! Scans immediate subdirectories of the project root for requirements files
//! and concatenates them into the root manifest, path-sorted so repeated runs
//! produce identical output.

use crate::error::ManifestError;
use crate::manifest::REQUIREMENTS_FILE;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of scanning for sub-manifests
#[derive(Debug, Clone)]
pub struct AggregateOutcome {
    /// Discovered sub-manifests, relative to the project root, path-sorted
    pub files: Vec<PathBuf>,
    /// Newline-joined concatenation of their contents
    pub content: String,
}

impl AggregateOutcome {
    /// Whether any sub-manifests were discovered
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Find `*/requirements.txt` exactly one directory level below `root` and
/// concatenate their contents in path-sorted order.
pub fn collect_sub_manifests(root: &Path) -> Result<AggregateOutcome, ManifestError> {
    let entries =
        fs::read_dir(root).map_err(|e| ManifestError::scan_error(root.to_path_buf(), e))?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ManifestError::scan_error(root.to_path_buf(), e))?;
        let path = entry.path();
        if path.is_dir() && path.join(REQUIREMENTS_FILE).is_file() {
            files.push(PathBuf::from(entry.file_name()).join(REQUIREMENTS_FILE));
        }
    }
    files.sort();

    let mut contents = Vec::with_capacity(files.len());
    for file in &files {
        let absolute = root.join(file);
        let text =
            fs::read_to_string(&absolute).map_err(|e| ManifestError::read_error(absolute, e))?;
        contents.push(text);
    }

    Ok(AggregateOutcome {
        files,
        content: contents.join("\n"),
    })
}

/// Overwrite the root manifest with the aggregated content
pub fn write_root_manifest(root: &Path, content: &str) -> Result<PathBuf, ManifestError> {
    let path = root.join(REQUIREMENTS_FILE);
    fs::write(&path, content).map_err(|e| ManifestError::write_error(path.clone(), e))?;
    Ok(path)
}
