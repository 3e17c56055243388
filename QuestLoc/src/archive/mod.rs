//! Release archive handling
//!
//! Modpack releases ship as ZIP or TAR(.gz) files. Extraction unpacks them
//! into a scratch directory for comparison; [`zip_directory`] builds the
//! resource-pack ZIPs produced by the `pack` tool.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;

use crate::error::{Error, Result};
use crate::utils::normalize_path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    Tar,
    TarGz,
}

impl ArchiveKind {
    /// Detect the format from the file name, case-insensitively.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedArchive`] for anything other than
    /// `.zip`, `.tar`, `.tar.gz` or `.tgz`.
    pub fn detect<P: AsRef<Path>>(path: P) -> Result<Self> {
        let name = path
            .as_ref()
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if name.ends_with(".zip") {
            Ok(Self::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Ok(Self::TarGz)
        } else if name.ends_with(".tar") {
            Ok(Self::Tar)
        } else {
            Err(Error::UnsupportedArchive(path.as_ref().display().to_string()))
        }
    }
}

/// Unpack an archive into `dest`.
///
/// TAR input is decompressed when it starts with the gzip magic, whatever
/// its extension says.
///
/// # Errors
/// Returns an error if the archive is missing, of an unsupported type, or
/// cannot be unpacked.
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(path: P, dest: Q) -> Result<ArchiveKind> {
    let path = path.as_ref();
    let dest = dest.as_ref();
    if !path.is_file() {
        return Err(Error::ArchiveNotFound(path.to_path_buf()));
    }
    let kind = ArchiveKind::detect(path)?;
    std::fs::create_dir_all(dest).map_err(|e| Error::file_io(dest, e))?;

    let file = File::open(path).map_err(|e| Error::file_io(path, e))?;
    match kind {
        ArchiveKind::Zip => {
            let mut archive = zip::ZipArchive::new(file)?;
            archive.extract(dest)?;
        }
        ArchiveKind::Tar | ArchiveKind::TarGz => {
            let mut reader = BufReader::new(file);
            let gzipped = reader
                .fill_buf()
                .map_err(|e| Error::file_io(path, e))?
                .starts_with(&GZIP_MAGIC);
            let reader: Box<dyn Read> = if gzipped {
                Box::new(GzDecoder::new(reader))
            } else {
                Box::new(reader)
            };
            tar::Archive::new(reader)
                .unpack(dest)
                .map_err(|e| Error::file_io(path, e))?;
        }
    }

    tracing::info!("Extracted {} ({kind:?}) to {}", path.display(), dest.display());
    Ok(kind)
}

/// Zip the contents of `source_dir` into `zip_path` with deflate.
///
/// Entry names are relative to `source_dir` and use forward slashes.
/// Returns the number of files added.
///
/// # Errors
/// Returns an error if the directory cannot be walked or the ZIP written.
pub fn zip_directory<P: AsRef<Path>, Q: AsRef<Path>>(source_dir: P, zip_path: Q) -> Result<usize> {
    let source_dir = source_dir.as_ref();
    let zip_path = zip_path.as_ref();
    if let Some(parent) = zip_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::file_io(parent, e))?;
    }

    let file = File::create(zip_path).map_err(|e| Error::file_io(zip_path, e))?;
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut count = 0;
    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .map_err(|_| Error::InvalidPath(entry.path().display().to_string()))?;
        if relative.as_os_str().is_empty() {
            continue;
        }
        let name = normalize_path(relative);

        if entry.file_type().is_dir() {
            writer.add_directory(format!("{name}/"), options)?;
        } else {
            writer.start_file(name, options)?;
            let mut input = File::open(entry.path()).map_err(|e| Error::file_io(entry.path(), e))?;
            std::io::copy(&mut input, &mut writer)?;
            count += 1;
        }
    }

    writer.finish()?;
    Ok(count)
}
