//! Defines the app level error type.

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used for an expense title.
    #[error("the title must not be empty")]
    EmptyTitle,

    /// The amount text could not be parsed as a finite number.
    ///
    /// Callers should pass in the text that the user entered so it can be
    /// echoed back in the error message.
    #[error("could not parse \"{0}\" as an amount")]
    InvalidAmount(String),

    /// The text does not name one of the four priorities.
    #[error("\"{0}\" is not a priority (expected URGENT, HIGH, MEDIUM or LOW)")]
    InvalidPriority(String),

    /// The text does not name a sort option.
    #[error("\"{0}\" is not a sort option")]
    InvalidSortOption(String),

    /// The CSV had issues that prevented it from being parsed.
    #[error("could not parse the CSV file: {0}")]
    InvalidCsv(String),

    /// An error occurred while serializing the record set as JSON.
    ///
    /// The error string should only be logged for debugging; the user sees a
    /// generic save failure.
    #[error("could not serialize as JSON: {0}")]
    JsonSerialization(String),

    /// A file could not be read, written or shared.
    #[error("file operation failed: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}
