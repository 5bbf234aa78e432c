// Copyright 2025 Cowboy AI, LLC.

//! Transition execution
//!
//! Two entry points act on a single host record:
//! - [`TransitionExecutor::action_direct`] applies a transition immediately,
//!   taking the source state from the record itself
//! - [`TransitionExecutor::action_transition`] goes through the transition
//!   screen first when the transition declares one
//!
//! Nothing is rolled back here; a failed write surfaces as
//! [`WorkflowError::Record`] and the host's persistence decides the rest.

use crate::errors::{WorkflowError, WorkflowResult};
use crate::events::TransitionApplied;
use crate::identifiers::{ModelName, StateId};
use crate::settings::WorkflowSettings;
use crate::workflow::{State, Transition, WorkflowContext, WorkflowDefinition};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

/// A host record whose state the workflow drives
#[cfg_attr(test, mockall::automock)]
pub trait WorkflowRecord {
    /// Host identifier of the record
    fn id(&self) -> i64;

    /// Value of the state field, if set
    fn current_state(&self) -> Option<StateId>;

    /// Persist a new value of the state field
    fn write_state(&mut self, state: &StateId) -> anyhow::Result<()>;
}

/// What the host client should do after an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionDirective {
    /// Open the transition screen as a modal form
    ShowTransitionScreen(TransitionScreenRequest),
    /// Close the modal form; the transition was applied
    CloseModal,
    /// Reload the record; the transition was applied directly
    Reload,
}

/// Everything the host needs to open a transition screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionScreenRequest {
    /// Model of the record
    pub model: ModelName,
    /// Host identifier of the record
    pub record_id: i64,
    /// Window title
    pub title: String,
    /// Context to open the form with, naming the state and transition
    pub context: Map<String, Value>,
}

/// Result of an action: the client directive plus the applied event, if any
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    /// Client directive
    pub directive: ActionDirective,
    /// Present when the record's state was written
    pub event: Option<TransitionApplied>,
}

/// Runs transitions of one model's workflow against host records
#[derive(Debug, Clone, Copy)]
pub struct TransitionExecutor<'a> {
    model: &'a ModelName,
    definition: &'a WorkflowDefinition,
    settings: &'a WorkflowSettings,
}

impl<'a> TransitionExecutor<'a> {
    /// Create an executor
    pub fn new(
        model: &'a ModelName,
        definition: &'a WorkflowDefinition,
        settings: &'a WorkflowSettings,
    ) -> Self {
        Self {
            model,
            definition,
            settings,
        }
    }

    /// Apply the requested transition out of the record's current state
    ///
    /// The context only needs the transition; a state in the context must
    /// agree with the record.
    pub fn action_direct<R>(&self, record: &mut R, context: &WorkflowContext) -> WorkflowResult<ActionOutcome>
    where
        R: WorkflowRecord + ?Sized,
    {
        let requested = context
            .transition
            .as_ref()
            .ok_or(WorkflowError::MissingContext("transition"))?;
        let current = record
            .current_state()
            .ok_or(WorkflowError::MissingContext("record state"))?;

        if let Some(expected) = &context.state {
            if *expected != current {
                return Err(WorkflowError::StateMismatch {
                    expected: expected.to_string(),
                    actual: current.to_string(),
                });
            }
        }

        let (state, transition) = self
            .definition
            .find_transition(current.as_str(), requested.as_str())
            .ok_or_else(|| WorkflowError::TransitionNotFound {
                state: current.to_string(),
                transition: requested.to_string(),
            })?;

        let event = self.apply(record, state, transition, false)?;
        Ok(ActionOutcome {
            directive: ActionDirective::Reload,
            event,
        })
    }

    /// Apply the transition named by the context, confirming first if needed
    pub fn action_transition<R>(&self, record: &mut R, context: &WorkflowContext) -> WorkflowResult<ActionOutcome>
    where
        R: WorkflowRecord + ?Sized,
    {
        let (state, transition) = self.definition.resolve(context)?;

        match record.current_state() {
            Some(current) if current == state.name => {}
            other => {
                return Err(WorkflowError::StateMismatch {
                    expected: state.name.to_string(),
                    actual: other.map(|s| s.to_string()).unwrap_or_default(),
                })
            }
        }

        if transition.requires_confirmation() && !context.confirmed {
            let screen_context = WorkflowContext::for_transition(
                state.name.clone(),
                transition.name.clone(),
            );
            return Ok(ActionOutcome {
                directive: ActionDirective::ShowTransitionScreen(TransitionScreenRequest {
                    model: self.model.clone(),
                    record_id: record.id(),
                    title: transition.screen_title().to_string(),
                    context: screen_context.to_values(&self.settings.context_keys),
                }),
                event: None,
            });
        }

        let event = self.apply(record, state, transition, context.confirmed)?;
        Ok(ActionOutcome {
            directive: ActionDirective::CloseModal,
            event,
        })
    }

    fn apply<R>(
        &self,
        record: &mut R,
        state: &State,
        transition: &Transition,
        confirmed: bool,
    ) -> WorkflowResult<Option<TransitionApplied>>
    where
        R: WorkflowRecord + ?Sized,
    {
        let Some(target) = &transition.new_state else {
            warn!(
                "Transition {}.{} on {} has no new_state; nothing written",
                state.name, transition.name, self.model
            );
            return Ok(None);
        };

        record
            .write_state(target)
            .map_err(|e| WorkflowError::Record(format!("{e:#}")))?;

        info!(
            "{} {}: {} -> {} via {}",
            self.model,
            record.id(),
            state.name,
            target,
            transition.name
        );

        Ok(Some(TransitionApplied::new(
            self.model.clone(),
            record.id(),
            transition.name.clone(),
            state.name.clone(),
            target.clone(),
            confirmed,
        )))
    }
}
