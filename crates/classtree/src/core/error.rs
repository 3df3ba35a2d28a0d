//! Core error types for class graph processing
//!
//! The analysis pipeline itself never fails. These errors cover the edges
//! around it: loading sources, serializing exports and parsing options.

use std::path::PathBuf;
use thiserror::Error;

/// Error types for the fallible edges of the pipeline
#[derive(Error, Debug)]
pub enum ClassTreeError {
    #[error("Source error: {message} ({path})")]
    SourceError { path: PathBuf, message: String },

    #[error("No .cpp or .h files found in folder: {folder}")]
    NoSources { folder: PathBuf },

    #[error("Export error: {message}")]
    ExportError { message: String },

    #[error("Invalid option: {message}")]
    InvalidOption { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl ClassTreeError {
    /// Create a new source error
    pub fn source_error(path: impl Into<PathBuf>, message: String) -> Self {
        Self::SourceError {
            path: path.into(),
            message,
        }
    }

    /// Create a new "no sources" error
    pub fn no_sources(folder: impl Into<PathBuf>) -> Self {
        Self::NoSources {
            folder: folder.into(),
        }
    }

    /// Create a new export error
    pub fn export_error(message: String) -> Self {
        Self::ExportError { message }
    }

    /// Create a new invalid option error
    pub fn invalid_option(message: String) -> Self {
        Self::InvalidOption { message }
    }
}
