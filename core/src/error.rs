//! Error types for the explorer core

use thiserror::Error;

/// Errors returned by edit actions on a schema form. The editor tree is left
/// unchanged whenever one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// No schema is loaded into the form
    #[error("No request schema is active")]
    NoSchema,

    /// Path does not address an editor
    #[error("No editor at path: {0}")]
    PathNotFound(String),

    /// Editor at the path cannot perform the action
    #[error("Editor at '{path}' is a {actual} editor, expected {expected}")]
    WrongKind {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Key is not a property of the object
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    /// Key already has an editor
    #[error("Property already added: {0}")]
    AlreadyAdded(String),

    /// Key has no editor to remove
    #[error("Property not added: {0}")]
    NotAdded(String),

    /// Required rows have no remove affordance
    #[error("Property '{0}' is required and cannot be removed")]
    Required(String),

    /// Array or option index out of range
    #[error("Index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors building request paths.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("{0}")]
    InvalidArgument(&'static str),

    #[error("Method not found: {0}")]
    UnknownMethod(String),
}
