//! Error types for `QuestLoc`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `QuestLoc` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO error tied to a specific file.
    #[error("{path}: {source}")]
    FileIo {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    // ==================== SNBT Errors ====================
    /// The SNBT text could not be parsed.
    #[error("SNBT parse error at line {line}, column {column}: {message}")]
    SnbtParse {
        /// 1-based line of the offending character.
        line: usize,
        /// 1-based column of the offending character.
        column: usize,
        /// What the parser expected or found.
        message: String,
    },

    /// The SNBT document root is not a compound.
    #[error("SNBT root must be a compound, found {found}")]
    SnbtRootNotCompound {
        /// Kind of value found at the root.
        found: &'static str,
    },

    // ==================== Language Data Errors ====================
    /// A language entry holds a value that is neither a string nor a list of strings.
    #[error("unsupported value for language key '{key}': expected string or list of strings, found {found}")]
    UnsupportedLangValue {
        /// The offending key.
        key: String,
        /// Kind of value found.
        found: &'static str,
    },

    /// A JSON language file is not a JSON object.
    #[error("language file {path} must contain a JSON object")]
    LangFileNotObject {
        /// Path of the offending file.
        path: PathBuf,
    },

    /// Merging produced no entries, nothing would be written.
    #[error("no language entries were loaded from {dir}, refusing to write an empty SNBT file")]
    EmptyMerge {
        /// The JSON directory that was merged.
        dir: PathBuf,
    },

    /// Reconstruction was given no entries at all.
    #[error("no language entries to reconstruct")]
    NothingToReconstruct,

    /// The JSON directory to merge does not exist.
    #[error("JSON directory not found: {0}")]
    JsonDirNotFound(PathBuf),

    // ==================== Hierarchy Errors ====================
    /// A chapter document has no `id` field.
    #[error("chapter file {path} has no id")]
    ChapterMissingId {
        /// Path of the chapter document.
        path: PathBuf,
    },

    // ==================== Archive Errors ====================
    /// The archive extension is not one of zip/tar/tar.gz/tgz.
    #[error("unsupported archive format: {0}")]
    UnsupportedArchive(String),

    /// The archive file does not exist.
    #[error("archive not found: {0}")]
    ArchiveNotFound(PathBuf),

    /// ZIP reading or writing failed.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ==================== Report Errors ====================
    /// The report template references a placeholder that has no value.
    #[error("report template placeholder '${{{0}}}' has no value")]
    TemplatePlaceholder(String),

    /// The report template has an unterminated `${` placeholder.
    #[error("report template has an unterminated placeholder at byte {0}")]
    TemplateSyntax(usize),

    // ==================== Remote API Errors ====================
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials cannot be used in a request.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// A remote file name is not a safe relative path.
    #[error("remote file path '{0}' must be relative and stay inside the output root")]
    UnsafeRemotePath(String),

    /// A required environment variable is not set.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    // ==================== Config Errors ====================
    /// The TOML configuration could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ==================== File System Errors ====================
    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

impl Error {
    /// Attach the file path to an IO error.
    pub(crate) fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileIo {
            path: path.into(),
            source,
        }
    }
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `QuestLoc` operations.
pub type Result<T> = std::result::Result<T, Error>;
