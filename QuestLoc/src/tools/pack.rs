//! Resource pack packaging
//!
//! Reads a JSON list of directories and zips each one:
//!
//! ```json
//! { "paths": ["CNPack/resourcepacks/CNPack", "CNPack/kubejs"] }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::archive::zip_directory;
use crate::error::{Error, Result};

/// Directories to package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackConfig {
    pub paths: Vec<PathBuf>,
}

impl PackConfig {
    /// Read the packer configuration.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// A produced archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedArchive {
    pub source: PathBuf,
    pub archive: PathBuf,
    pub files: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackReport {
    pub archives: Vec<PackedArchive>,
}

/// Zip each configured directory into `<target_dir>/<directory name>.zip`.
///
/// # Errors
/// Returns an error if a configured path is not a directory or an archive
/// cannot be written.
pub fn pack_directories<P: AsRef<Path>>(config: &PackConfig, target_dir: P) -> Result<PackReport> {
    let target_dir = target_dir.as_ref();
    let mut report = PackReport::default();

    for source in &config.paths {
        if !source.is_dir() {
            return Err(Error::InvalidPath(format!("{} is not a directory", source.display())));
        }
        let name = source
            .file_name()
            .ok_or_else(|| Error::InvalidPath(source.display().to_string()))?;
        let archive = target_dir.join(format!("{}.zip", name.to_string_lossy()));

        let files = zip_directory(source, &archive)?;
        tracing::info!("Packed {} ({files} files) into {}", source.display(), archive.display());
        report.archives.push(PackedArchive {
            source: source.clone(),
            archive,
            files,
        });
    }

    Ok(report)
}
