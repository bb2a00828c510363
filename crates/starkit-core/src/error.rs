//! Error handling for StarKit
//!
//! Provides the error types for each layer of the editor:
//! - History errors (undo/redo stack boundaries and malformed commands)
//! - Scene errors (unknown objects/handles, scene serialization)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// History error type
///
/// None of these are fatal. Boundary errors are surfaced to the user as a
/// notice; a malformed command is logged and dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// The cursor is at the start of the stack
    #[error("Nothing to undo!")]
    NothingToUndo,

    /// The cursor is at the end of the stack
    #[error("Nothing to redo!")]
    NothingToRedo,

    /// A command was recorded without both of its halves
    #[error("History records must be callable, command '{label}' is missing its {missing} action")]
    MalformedCommand {
        /// The label of the rejected command.
        label: String,
        /// Which half is missing (`undo`, `redo` or `undo and redo`).
        missing: &'static str,
    },
}

impl HistoryError {
    /// Check if this error only reports a stack boundary
    pub fn is_boundary(&self) -> bool {
        matches!(self, HistoryError::NothingToUndo | HistoryError::NothingToRedo)
    }
}

/// Scene error type
///
/// Represents errors raised by the canvas and the scene controller.
#[derive(Error, Debug)]
pub enum SceneError {
    /// No object with this id is on the canvas
    #[error("Unknown object: {id}")]
    UnknownObject {
        /// The object id that was looked up.
        id: u64,
    },

    /// No handle with this key is registered on the object
    #[error("Unknown handle '{key}' on object {id}")]
    UnknownHandle {
        /// The object id.
        id: u64,
        /// The handle key that was looked up.
        key: String,
    },

    /// The scene document has a version this build cannot read
    #[error("Unsupported scene document version {found} (expected {expected})")]
    UnsupportedVersion {
        /// The version found in the document.
        found: u32,
        /// The version this build writes.
        expected: u32,
    },

    /// Scene JSON could not be written or read
    #[error("Scene serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Undo/redo failed
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Main error type for StarKit
///
/// Aggregates all error types into a single error type.
#[derive(Error, Debug)]
pub enum Error {
    /// History error
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Scene error
    #[error(transparent)]
    Scene(#[from] SceneError),
}

impl Error {
    /// Check if this error only reports an undo/redo boundary
    pub fn is_history_boundary(&self) -> bool {
        match self {
            Error::History(e) => e.is_boundary(),
            Error::Scene(SceneError::History(e)) => e.is_boundary(),
            _ => false,
        }
    }
}

/// Result type alias using StarKit's Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_error_display() {
        assert_eq!(HistoryError::NothingToUndo.to_string(), "Nothing to undo!");
        assert_eq!(HistoryError::NothingToRedo.to_string(), "Nothing to redo!");

        let err = HistoryError::MalformedCommand {
            label: "Roundness".to_string(),
            missing: "redo",
        };
        assert_eq!(
            err.to_string(),
            "History records must be callable, command 'Roundness' is missing its redo action"
        );
    }

    #[test]
    fn test_scene_error_display() {
        let err = SceneError::UnknownObject { id: 7 };
        assert_eq!(err.to_string(), "Unknown object: 7");

        let err = SceneError::UnknownHandle {
            id: 3,
            key: "spin".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown handle 'spin' on object 3");
    }

    #[test]
    fn test_boundary_detection() {
        let err: Error = HistoryError::NothingToUndo.into();
        assert!(err.is_history_boundary());

        let err: Error = SceneError::History(HistoryError::NothingToRedo).into();
        assert!(err.is_history_boundary());

        let err: Error = SceneError::UnknownObject { id: 1 }.into();
        assert!(!err.is_history_boundary());

        let malformed = HistoryError::MalformedCommand {
            label: "x".to_string(),
            missing: "undo",
        };
        assert!(!malformed.is_boundary());
    }
}
