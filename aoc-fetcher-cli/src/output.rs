//! Output file for fetched puzzle inputs

use crate::error::OutputError;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// A freshly created output file
///
/// Creation fails if the path already exists, so existing data is never
/// truncated.
pub struct OutputFile {
    path: PathBuf,
    file: File,
}

impl OutputFile {
    /// Create the file, failing if it already exists
    pub fn create(path: &Path) -> Result<Self, OutputError> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|source| match source.kind() {
                io::ErrorKind::AlreadyExists => OutputError::AlreadyExists {
                    path: path.to_path_buf(),
                },
                _ => OutputError::Io {
                    path: path.to_path_buf(),
                    source,
                },
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Copy `body` into the file verbatim and return the number of bytes written
    ///
    /// A partially written file is removed on failure.
    pub fn write_from<R: Read + ?Sized>(mut self, body: &mut R) -> Result<u64, OutputError> {
        let result = io::copy(body, &mut self.file).and_then(|written| {
            self.file.flush()?;
            Ok(written)
        });

        match result {
            Ok(written) => Ok(written),
            Err(source) => {
                drop(self.file);
                if let Err(e) = fs::remove_file(&self.path) {
                    tracing::warn!(path = %self.path.display(), "failed to remove partial output: {}", e);
                }
                Err(OutputError::Io {
                    path: self.path,
                    source,
                })
            }
        }
    }
}
