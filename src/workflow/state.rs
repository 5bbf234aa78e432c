// Copyright 2025 Cowboy AI, LLC.

//! Workflow state definitions
//!
//! States are the nodes of a workflow. Each one owns the transitions that
//! leave it, in declaration order.

use crate::identifiers::StateId;
use crate::workflow::transition::Transition;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A state declared in a workflow definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct State {
    /// Unique name, also the value stored on the record
    pub name: StateId,

    /// Human-readable label
    pub label: String,

    /// Hide this state from the statusbar
    #[serde(default)]
    pub statusbar_hide: bool,

    /// Transitions leaving this state
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

impl State {
    /// Create a visible state without transitions
    pub fn new(name: impl Into<StateId>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            statusbar_hide: false,
            transitions: Vec::new(),
        }
    }

    /// Hide this state from the statusbar
    pub fn hidden(mut self) -> Self {
        self.statusbar_hide = true;
        self
    }

    /// Add an outgoing transition
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Whether the statusbar shows this state
    pub fn is_visible(&self) -> bool {
        !self.statusbar_hide
    }

    /// Look up an outgoing transition by name
    pub fn transition(&self, name: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.name == name)
    }

    /// A state without outgoing transitions ends the workflow
    pub fn is_terminal(&self) -> bool {
        self.transitions.is_empty()
    }
}
