//! Hands the exported CSV to a share action via a temporary file.
//!
//! The flow mirrors the share screen: render the CSV, write it to a
//! temporary file, pass the file to the platform share action, then remove
//! the file. The share action itself is abstract; the CLI copies the file to
//! a destination path.

use std::{
    fs, io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{Error, csv::render_csv, record::ExpenseRecord};

/// A platform share action that receives a file to hand off.
pub trait Share {
    /// Hand the file at `path` off. The file only exists for the duration of
    /// this call.
    fn share(&self, path: &Path) -> Result<(), Error>;
}

/// A [Share] action that copies the shared file to a fixed destination path.
#[derive(Debug)]
pub struct SaveToPath {
    destination: PathBuf,
}

impl SaveToPath {
    /// Share by copying to `destination`.
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}

impl Share for SaveToPath {
    fn share(&self, path: &Path) -> Result<(), Error> {
        fs::copy(path, &self.destination)?;

        Ok(())
    }
}

/// Render `records` as CSV, share the file, then delete it.
///
/// # Errors
/// Returns [Error::Io] if the file cannot be written or the share action
/// fails. The temporary file is removed either way; nothing is considered
/// committed on failure.
pub fn export_and_share(records: &[ExpenseRecord], action: &impl Share) -> Result<(), Error> {
    let text = render_csv(records)?;

    let mut file = NamedTempFile::new()?;
    file.write_all(text.as_bytes())?;
    file.flush()?;

    action.share(file.path())?;

    file.close()?;

    Ok(())
}
