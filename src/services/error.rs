// src/services/error.rs
use std::fmt;

/// Why a data table could not be turned into a dataset.
///
/// `Fetch` covers the resource never arriving; every other variant means
/// the bytes arrived but did not hold valid data.
#[derive(Debug)]
pub enum LoadError {
    Fetch {
        resource: String,
        message: String,
    },
    Csv {
        resource: String,
        source: csv::Error,
    },
    MissingColumn {
        resource: String,
        line: u64,
        column: String,
    },
    InvalidField {
        resource: String,
        line: u64,
        column: String,
        value: String,
    },
    DuplicateYear {
        resource: String,
        line: u64,
        reform: String,
        year: i32,
    },
}

impl LoadError {
    pub fn fetch(resource: impl Into<String>, message: impl fmt::Display) -> Self {
        LoadError::Fetch {
            resource: resource.into(),
            message: message.to_string(),
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, LoadError::Fetch { .. })
    }

    pub fn resource(&self) -> &str {
        match self {
            LoadError::Fetch { resource, .. }
            | LoadError::Csv { resource, .. }
            | LoadError::MissingColumn { resource, .. }
            | LoadError::InvalidField { resource, .. }
            | LoadError::DuplicateYear { resource, .. } => resource,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::Fetch { resource, message } => {
                write!(f, "Failed to load {}: {}", resource, message)
            }
            LoadError::Csv { resource, source } => {
                write!(f, "Malformed CSV in {}: {}", resource, source)
            }
            LoadError::MissingColumn { resource, line, column } => {
                write!(f, "{} line {}: missing column '{}'", resource, line, column)
            }
            LoadError::InvalidField { resource, line, column, value } => write!(
                f,
                "{} line {}: invalid number '{}' in column '{}'",
                resource, line, value, column
            ),
            LoadError::DuplicateYear { resource, line, reform, year } => write!(
                f,
                "{} line {}: duplicate year {} for reform '{}'",
                resource, line, year, reform
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}
