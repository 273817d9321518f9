//! Error taxonomy shared by both computation cores.

use thiserror::Error;

/// Typed outcomes for every failure the cores can report.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoreError {
    /// A physical dimension was non-positive or not a finite number.
    #[error("invalid parameter `{name}`: {value} (must be a positive finite number)")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A month label has no entry in the calendar lookup.
    #[error("unresolvable month label: {0:?}")]
    UnresolvableMonthLabel(String),

    /// Required columns were absent from the raw table header.
    #[error("missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Two canonical columns were mapped onto the same header text.
    #[error("header {0:?} is mapped to more than one column")]
    DuplicateHeader(String),

    /// The raw input could not be read as a table.
    #[error("failed to parse input table: {0}")]
    ParseFailure(String),

    /// Registration collided with an existing username.
    #[error("account already exists: {0}")]
    DuplicateAccount(String),

    /// Writing a table back out as CSV failed.
    #[error("failed to export table: {0}")]
    Export(String),

    /// A queried month is not present in the table.
    #[error("no row for month: {0:?}")]
    NotFound(String),
}

impl CoreError {
    pub(crate) fn invalid(name: &'static str, value: f64) -> Self {
        CoreError::InvalidParameter { name, value }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_names() {
        let err = CoreError::MissingColumns(vec!["Likes".to_string(), "Comments".to_string()]);
        assert_eq!(err.to_string(), "missing columns: Likes, Comments");
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = CoreError::invalid("stroke", 0.0);
        assert!(err.to_string().contains("stroke"));
    }
}
