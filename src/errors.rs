// Copyright 2025 Cowboy AI, LLC.

//! Error types for workflow operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, resolving or executing a workflow
#[derive(Debug, Clone, Error)]
pub enum WorkflowError {
    /// Definition file not found in any base directory
    #[error("Could not find workflow file \"{file}\" in addons paths {searched:?}")]
    DefinitionNotFound {
        /// File name that was searched for
        file: String,
        /// Base directories that were tried, in order
        searched: Vec<PathBuf>,
    },

    /// Definition file could not be parsed
    #[error("Malformed workflow definition {file}: {message}")]
    MalformedDefinition {
        /// File (or `<inline>`) that failed to parse
        file: String,
        /// Parser message
        message: String,
    },

    /// Definition file could not be read
    #[error("I/O error reading {path}: {message}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// Two states share the same name
    #[error("Duplicate state in workflow: {0}")]
    DuplicateState(String),

    /// Two transitions of the same state share the same name
    #[error("Duplicate transition {transition} in state {state}")]
    DuplicateTransition {
        /// Source state
        state: String,
        /// Repeated transition name
        transition: String,
    },

    /// A transition targets a state the definition does not declare
    #[error("Transition {state}.{transition} targets unknown state {target}")]
    UnknownTargetState {
        /// Source state
        state: String,
        /// Transition name
        transition: String,
        /// Undeclared target
        target: String,
    },

    /// A required request context value is absent
    #[error("Missing {0} in workflow context")]
    MissingContext(&'static str),

    /// No transition matches the (state, transition) pair
    #[error("Transition not found: {transition} from state {state}")]
    TransitionNotFound {
        /// State that was searched
        state: String,
        /// Transition that was searched
        transition: String,
    },

    /// The transition declares no confirmation screen fields
    #[error("Transition {state}.{transition} has no transition_screen fields")]
    MissingConfirmationFields {
        /// Source state
        state: String,
        /// Transition name
        transition: String,
    },

    /// The record is not in the state the request was issued for
    #[error("Record state mismatch: expected {expected}, found {actual}")]
    StateMismatch {
        /// State named by the request context
        expected: String,
        /// State currently stored on the record
        actual: String,
    },

    /// No workflow is registered for the model
    #[error("No workflow registered for model {0}")]
    UnknownModel(String),

    /// Settings could not be loaded
    #[error("Settings error: {0}")]
    Settings(String),

    /// The host failed to persist the record
    #[error("Record write failed: {0}")]
    Record(String),
}

/// Result type for workflow operations
pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl From<config::ConfigError> for WorkflowError {
    fn from(err: config::ConfigError) -> Self {
        WorkflowError::Settings(err.to_string())
    }
}

impl WorkflowError {
    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WorkflowError::DefinitionNotFound { .. }
                | WorkflowError::TransitionNotFound { .. }
                | WorkflowError::UnknownModel(_)
        )
    }

    /// Check if this error comes from a bad definition file
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            WorkflowError::MalformedDefinition { .. }
                | WorkflowError::DuplicateState(_)
                | WorkflowError::DuplicateTransition { .. }
                | WorkflowError::UnknownTargetState { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = WorkflowError::DefinitionNotFound {
            file: "sale/workflow.yml".to_string(),
            searched: vec![PathBuf::from("/opt/addons")],
        };
        assert_eq!(
            err.to_string(),
            "Could not find workflow file \"sale/workflow.yml\" in addons paths [\"/opt/addons\"]"
        );

        let err = WorkflowError::TransitionNotFound {
            state: "draft".to_string(),
            transition: "cancel".to_string(),
        };
        assert_eq!(err.to_string(), "Transition not found: cancel from state draft");

        let err = WorkflowError::MissingContext("workflow_state");
        assert_eq!(err.to_string(), "Missing workflow_state in workflow context");

        let err = WorkflowError::MissingConfirmationFields {
            state: "draft".to_string(),
            transition: "confirm".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Transition draft.confirm has no transition_screen fields"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(WorkflowError::UnknownModel("sale.order".to_string()).is_not_found());
        assert!(WorkflowError::TransitionNotFound {
            state: "a".to_string(),
            transition: "b".to_string(),
        }
        .is_not_found());

        assert!(!WorkflowError::MissingContext("x").is_not_found());
        assert!(!WorkflowError::DuplicateState("a".to_string()).is_not_found());
    }

    #[test]
    fn test_is_definition_error() {
        assert!(WorkflowError::DuplicateState("draft".to_string()).is_definition_error());
        assert!(WorkflowError::UnknownTargetState {
            state: "draft".to_string(),
            transition: "go".to_string(),
            target: "nowhere".to_string(),
        }
        .is_definition_error());

        assert!(!WorkflowError::Record("locked".to_string()).is_definition_error());
    }
}
