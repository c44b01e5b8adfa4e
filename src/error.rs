//! Error handling for the Mason application.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Custom error types for Mason operations.
///
/// This enum represents all possible errors that can occur within the Mason application.
/// It implements the standard Error trait through thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Failure to read a template source file
    #[error("Cannot read '{path}': {source}.")]
    ReadError { path: String, source: io::Error },

    /// Failure to write or copy into the destination tree
    #[error("Cannot write '{path}': {source}.")]
    WriteError { path: String, source: io::Error },

    /// Represents errors that occur during template processing
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents validation failures in user input or data
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Represents errors in processing .masonignore files
    #[error("Ignore file error: {0}.")]
    IgnoreError(String),

    /// The destination project directory already exists and the user declined to overwrite it
    #[error("Project directory '{project_dir}' already exists.")]
    ProjectDirectoryExistsError { project_dir: String },

    /// The user interrupted an interactive prompt (Ctrl-C / closed terminal)
    #[error("Interrupted.")]
    Interrupted,
}

impl Error {
    /// Wraps an IO error with the path of the file that could not be read.
    pub fn read<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Error::ReadError { path: path.as_ref().display().to_string(), source }
    }

    /// Wraps an IO error with the path of the file that could not be written.
    pub fn write<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Error::WriteError { path: path.as_ref().display().to_string(), source }
    }
}

/// Convenience type alias for Results with Mason's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1,
/// or 130 when the run was interrupted at a prompt.
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{}", err);
    let code = match err {
        Error::Interrupted => 130,
        _ => 1,
    };
    std::process::exit(code);
}
