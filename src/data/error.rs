use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the data layer.
///
/// An empty filter selection is deliberately NOT an error: it is the
/// "no filter applied" sentinel and callers treat it as "show everything".
#[derive(Debug, Error)]
pub enum DataError {
    /// The input file is missing.  Fatal: the session renders nothing past
    /// the error message.
    #[error("dataset not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A requested column is absent from the table.  The UI only offers
    /// columns that exist, but engine operations still validate explicitly
    /// rather than silently producing empty output.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// The aggregation target is not a numeric column.
    #[error("column '{0}' is not numeric")]
    TypeMismatch(String),
}
