// Copyright (c) 2025 - Cowboy AI, LLC.

//! Workflow events
//!
//! Events record transitions that have been applied to a record. They are
//! immutable and returned to the host, which decides whether to log, audit
//! or publish them.

use crate::identifiers::{EventId, ModelName, StateId, TransitionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base trait for workflow events
pub trait WorkflowEvent: Send + Sync + std::fmt::Debug {
    /// Get the event type name
    fn event_type(&self) -> &'static str;

    /// Get the schema version
    fn version(&self) -> &'static str {
        "v1"
    }
}

/// A transition was applied and the record's state written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionApplied {
    /// The event ID
    pub event_id: EventId,
    /// Model of the record
    pub model: ModelName,
    /// Host identifier of the record
    pub record_id: i64,
    /// Transition that was applied
    pub transition: TransitionId,
    /// State before the transition
    pub from_state: StateId,
    /// State after the transition
    pub to_state: StateId,
    /// Whether the user went through the confirmation screen
    pub confirmed: bool,
    /// When the state was written
    pub applied_at: DateTime<Utc>,
}

impl TransitionApplied {
    /// Create an event stamped now
    pub fn new(
        model: ModelName,
        record_id: i64,
        transition: TransitionId,
        from_state: StateId,
        to_state: StateId,
        confirmed: bool,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            model,
            record_id,
            transition,
            from_state,
            to_state,
            confirmed,
            applied_at: Utc::now(),
        }
    }
}

impl WorkflowEvent for TransitionApplied {
    fn event_type(&self) -> &'static str {
        "TransitionApplied"
    }
}
