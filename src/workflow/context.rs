// Copyright 2025 Cowboy AI, LLC.

//! Request context for workflow operations
//!
//! The host hands every workflow operation the state the request was issued
//! for, the transition the user asked for, and whether the confirmation
//! screen has already been submitted.

use crate::identifiers::{StateId, TransitionId};
use crate::settings::ContextKeys;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Typed request context for one workflow operation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowContext {
    /// State the request was issued for
    pub state: Option<StateId>,

    /// Transition the user asked for
    pub transition: Option<TransitionId>,

    /// Confirmation screen already submitted
    #[serde(default)]
    pub confirmed: bool,
}

impl WorkflowContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Context naming a (state, transition) pair
    pub fn for_transition(state: impl Into<StateId>, transition: impl Into<TransitionId>) -> Self {
        Self {
            state: Some(state.into()),
            transition: Some(transition.into()),
            confirmed: false,
        }
    }

    /// Context naming only a transition
    pub fn for_action(transition: impl Into<TransitionId>) -> Self {
        Self {
            state: None,
            transition: Some(transition.into()),
            confirmed: false,
        }
    }

    /// Mark the confirmation screen as submitted
    pub fn confirmed(mut self) -> Self {
        self.confirmed = true;
        self
    }

    /// Read the context from the host's key/value request context
    ///
    /// Empty strings count as absent. The confirmation flag accepts
    /// booleans, non-zero numbers, and the strings `true`/`1`.
    pub fn from_values(values: &Map<String, Value>, keys: &ContextKeys) -> Self {
        let text = |key: &str| {
            values
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let confirmed = match values.get(&keys.confirmed) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => matches!(s.to_ascii_lowercase().as_str(), "true" | "1"),
            _ => false,
        };

        Self {
            state: text(&keys.state).map(StateId::from),
            transition: text(&keys.transition).map(TransitionId::from),
            confirmed,
        }
    }

    /// Write the context back as host key/value pairs
    ///
    /// Absent values are left out; `confirmed` is only written when set.
    pub fn to_values(&self, keys: &ContextKeys) -> Map<String, Value> {
        let mut values = Map::new();
        if let Some(state) = &self.state {
            values.insert(keys.state.clone(), Value::String(state.to_string()));
        }
        if let Some(transition) = &self.transition {
            values.insert(keys.transition.clone(), Value::String(transition.to_string()));
        }
        if self.confirmed {
            values.insert(keys.confirmed.clone(), Value::Bool(true));
        }
        values
    }
}
