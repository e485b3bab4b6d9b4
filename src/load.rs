//! Reading the codebook file from disk.
//!
//! Like the core loader, this never fails: an unreadable file is logged and
//! becomes an empty dataset, which the caller then reports as a load failure.

use codebook_core::{Dataset, DatasetError, LoadReport};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Where a dataset came from and what happened while reading it.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    pub path: PathBuf,
    /// Set when the file could not be read at all.
    pub read_error: Option<String>,
    /// Hex SHA-256 of the file contents, when read.
    pub sha256: Option<String>,
    pub report: LoadReport,
}

pub fn load_dataset(path: &Path) -> (DatasetSource, Dataset) {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read codebook");
            let source = DatasetSource {
                path: path.to_path_buf(),
                read_error: Some(e.to_string()),
                sha256: None,
                report: LoadReport::default(),
            };
            return (source, Dataset::default());
        }
    };

    let sha256 = format!("{:x}", Sha256::digest(&bytes));
    let loaded = Dataset::from_json_slice(&bytes);

    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        sha256 = %sha256,
        "codebook read"
    );

    let source = DatasetSource {
        path: path.to_path_buf(),
        read_error: None,
        sha256: Some(sha256),
        report: loaded.report,
    };
    (source, loaded.dataset)
}

/// The "could not load" message, distinct from an empty listing.
pub fn failure_message(source: &DatasetSource, err: &DatasetError) -> String {
    let mut msg = format!(
        "could not load codebook from {}: {}",
        source.path.display(),
        err
    );
    if let Some(ref read_error) = source.read_error {
        msg.push_str(&format!("\n  cause: {}", read_error));
    }
    if let Some(ref problem) = source.report.problem {
        msg.push_str(&format!("\n  cause: {}", problem));
    }
    msg.push_str(
        "\n  check that the file exists and has non-empty `macros`, `codes` and `items` arrays",
    );
    msg
}
