// Copyright 2025 Cowboy AI, LLC.

//! Workflow definitions
//!
//! A definition is the ordered list of states of one record type, each
//! carrying its outgoing transitions. Definitions are parsed once, validated,
//! and never mutated afterwards.

use crate::errors::{WorkflowError, WorkflowResult};
use crate::workflow::{State, Transition, WorkflowContext};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Declarative state/transition graph of a record type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WorkflowDefinition {
    /// States in display order
    pub states: Vec<State>,
}

impl WorkflowDefinition {
    /// Build and validate a definition from states
    pub fn new(states: Vec<State>) -> WorkflowResult<Self> {
        let definition = Self { states };
        definition.validate()?;
        Ok(definition)
    }

    /// Parse and validate a YAML definition
    ///
    /// `origin` names the source in error messages.
    pub fn from_yaml_str(yaml: &str, origin: &str) -> WorkflowResult<Self> {
        let definition: WorkflowDefinition =
            serde_yaml::from_str(yaml).map_err(|e| WorkflowError::MalformedDefinition {
                file: origin.to_string(),
                message: e.to_string(),
            })?;
        definition.validate()?;
        Ok(definition)
    }

    /// Check name uniqueness and that every target state exists
    pub fn validate(&self) -> WorkflowResult<()> {
        let mut names = HashSet::new();
        for state in &self.states {
            if !names.insert(state.name.as_str()) {
                return Err(WorkflowError::DuplicateState(state.name.to_string()));
            }
        }

        for state in &self.states {
            let mut seen = HashSet::new();
            for transition in &state.transitions {
                if !seen.insert(transition.name.as_str()) {
                    return Err(WorkflowError::DuplicateTransition {
                        state: state.name.to_string(),
                        transition: transition.name.to_string(),
                    });
                }
                if let Some(target) = &transition.new_state {
                    if !names.contains(target.as_str()) {
                        return Err(WorkflowError::UnknownTargetState {
                            state: state.name.to_string(),
                            transition: transition.name.to_string(),
                            target: target.to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Find a transition by source state and transition name
    pub fn find_transition(&self, state: &str, transition: &str) -> Option<(&State, &Transition)> {
        self.states
            .iter()
            .find(|s| s.name == state)
            .and_then(|s| s.transition(transition).map(|t| (s, t)))
    }

    /// Resolve the (state, transition) pair named by a request context
    pub fn resolve(&self, context: &WorkflowContext) -> WorkflowResult<(&State, &Transition)> {
        let state = context
            .state
            .as_ref()
            .ok_or(WorkflowError::MissingContext("state"))?;
        let transition = context
            .transition
            .as_ref()
            .ok_or(WorkflowError::MissingContext("transition"))?;

        self.find_transition(state.as_str(), transition.as_str())
            .ok_or_else(|| WorkflowError::TransitionNotFound {
                state: state.to_string(),
                transition: transition.to_string(),
            })
    }

    /// `(name, label)` pairs in definition order, for the state selection field
    pub fn get_states(&self) -> Vec<(String, String)> {
        self.states
            .iter()
            .map(|s| (s.name.to_string(), s.label.clone()))
            .collect()
    }

    /// Look up a state by name
    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|s| s.name == name)
    }

    /// States shown in the statusbar
    pub fn visible_states(&self) -> impl Iterator<Item = &State> {
        self.states.iter().filter(|s| s.is_visible())
    }

    /// Every transition paired with its source state, in declaration order
    pub fn transitions(&self) -> impl Iterator<Item = (&State, &Transition)> {
        self.states
            .iter()
            .flat_map(|s| s.transitions.iter().map(move |t| (s, t)))
    }

    /// Number of states
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of transitions across all states
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::TransitionScreen;
    use pretty_assertions::assert_eq;

    fn sale_order() -> WorkflowDefinition {
        WorkflowDefinition::new(vec![
            State::new("draft", "Quotation")
                .with_transition(Transition::new("confirm", "Confirm").to("sale"))
                .with_transition(
                    Transition::new("cancel", "Cancel")
                        .to("cancel")
                        .with_screen(TransitionScreen::with_fields(["cancel_reason"])),
                ),
            State::new("sale", "Sales Order")
                .with_transition(Transition::new("cancel", "Cancel").to("cancel")),
            State::new("cancel", "Cancelled").hidden(),
        ])
        .unwrap()
    }

    #[test]
    fn test_find_transition() {
        let def = sale_order();

        let (state, transition) = def.find_transition("draft", "cancel").unwrap();
        assert_eq!(state.name, "draft");
        assert!(transition.requires_confirmation());

        let (state, transition) = def.find_transition("sale", "cancel").unwrap();
        assert_eq!(state.name, "sale");
        assert!(!transition.requires_confirmation());

        assert!(def.find_transition("sale", "confirm").is_none());
        assert!(def.find_transition("nowhere", "confirm").is_none());
    }

    #[test]
    fn test_resolve_requires_both_context_values() {
        let def = sale_order();

        let err = def.resolve(&WorkflowContext::for_action("confirm")).unwrap_err();
        assert!(matches!(err, WorkflowError::MissingContext("state")));

        let ctx = WorkflowContext {
            state: Some("draft".into()),
            ..WorkflowContext::default()
        };
        let err = def.resolve(&ctx).unwrap_err();
        assert!(matches!(err, WorkflowError::MissingContext("transition")));

        let err = def
            .resolve(&WorkflowContext::for_transition("cancel", "confirm"))
            .unwrap_err();
        assert!(err.is_not_found());

        let (_, t) = def
            .resolve(&WorkflowContext::for_transition("draft", "confirm"))
            .unwrap();
        assert_eq!(t.label, "Confirm");
    }

    #[test]
    fn test_get_states_and_counts() {
        let def = sale_order();

        assert_eq!(
            def.get_states(),
            vec![
                ("draft".to_string(), "Quotation".to_string()),
                ("sale".to_string(), "Sales Order".to_string()),
                ("cancel".to_string(), "Cancelled".to_string()),
            ]
        );
        assert_eq!(def.state_count(), 3);
        assert_eq!(def.transition_count(), 3);
        assert_eq!(
            def.visible_states().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["draft", "sale"]
        );
    }

    #[test]
    fn test_validation_rejects_unknown_target() {
        let err = WorkflowDefinition::new(vec![State::new("draft", "Draft")
            .with_transition(Transition::new("go", "Go").to("done"))])
        .unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::UnknownTargetState { ref target, .. } if target == "done"
        ));
    }

    #[test]
    fn test_validation_rejects_duplicates() {
        let err = WorkflowDefinition::new(vec![
            State::new("draft", "Draft"),
            State::new("draft", "Again"),
        ])
        .unwrap_err();
        assert!(matches!(err, WorkflowError::DuplicateState(ref s) if s == "draft"));

        let err = WorkflowDefinition::new(vec![State::new("draft", "Draft")
            .with_transition(Transition::new("go", "Go"))
            .with_transition(Transition::new("go", "Go again"))])
        .unwrap_err();
        assert!(matches!(err, WorkflowError::DuplicateTransition { .. }));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = WorkflowDefinition::from_yaml_str("states: [", "inline").unwrap_err();
        assert!(matches!(err, WorkflowError::MalformedDefinition { ref file, .. } if file == "inline"));

        let err = WorkflowDefinition::from_yaml_str("nodes: []", "inline").unwrap_err();
        assert!(err.is_definition_error());
    }
}
