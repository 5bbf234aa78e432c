// Copyright 2025 Cowboy AI, LLC.

//! Workflow transition definitions
//!
//! Transitions are the arrows of a workflow: a named, labelled move out of
//! one state, optionally into another, optionally behind a confirmation
//! screen.

use crate::identifiers::{StateId, TransitionId};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// A transition declared under a state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transition {
    /// Name, unique within the source state
    pub name: TransitionId,

    /// Button label
    pub label: String,

    /// State written to the record when the transition is applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_state: Option<StateId>,

    /// CSS class of the generated button
    #[serde(default, rename = "class", skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,

    /// Permission groups allowed to see the button
    #[serde(
        default,
        deserialize_with = "deserialize_groups",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(with = "Option<GroupsRepr>")]
    pub groups: Vec<String>,

    /// Confirmation screen shown before the transition commits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_screen: Option<TransitionScreen>,
}

impl Transition {
    /// Create a transition with just a name and label
    pub fn new(name: impl Into<TransitionId>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            new_state: None,
            css_class: None,
            groups: Vec::new(),
            transition_screen: None,
        }
    }

    /// Set the target state
    pub fn to(mut self, state: impl Into<StateId>) -> Self {
        self.new_state = Some(state.into());
        self
    }

    /// Attach a confirmation screen
    pub fn with_screen(mut self, screen: TransitionScreen) -> Self {
        self.transition_screen = Some(screen);
        self
    }

    /// Whether applying this transition needs a confirmation round-trip
    pub fn requires_confirmation(&self) -> bool {
        self.transition_screen.is_some()
    }

    /// Fields of the confirmation screen, if any are declared
    pub fn screen_fields(&self) -> Option<&[ScreenField]> {
        self.transition_screen
            .as_ref()
            .map(|s| s.fields.as_slice())
            .filter(|f| !f.is_empty())
    }

    /// Title of the confirmation screen, falling back to the label
    pub fn screen_title(&self) -> &str {
        self.transition_screen
            .as_ref()
            .and_then(|s| s.title.as_deref())
            .unwrap_or(&self.label)
    }

    /// Groups joined the way host views expect them
    pub fn groups_attr(&self) -> Option<String> {
        if self.groups.is_empty() {
            None
        } else {
            Some(self.groups.join(","))
        }
    }
}

/// Confirmation screen of a transition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TransitionScreen {
    /// Window title; the transition label is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Extra fields the user fills in before confirming
    #[serde(default)]
    pub fields: Vec<ScreenField>,
}

impl TransitionScreen {
    /// Create a screen from a list of plain field names
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: None,
            fields: fields.into_iter().map(|f| ScreenField::Name(f.into())).collect(),
        }
    }
}

/// One field on a confirmation screen
///
/// Either a bare field name or a mapping with display attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ScreenField {
    /// Just the field name
    Name(String),
    /// Field name plus attributes
    Detailed(FieldSpec),
}

/// Attributes of a confirmation screen field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    /// Field name on the record
    pub name: String,
    /// Field must be filled before confirming
    #[serde(default)]
    pub required: bool,
    /// Field is shown but not editable
    #[serde(default)]
    pub readonly: bool,
    /// Widget override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    /// Label override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
}

impl ScreenField {
    /// Field name on the record
    pub fn name(&self) -> &str {
        match self {
            ScreenField::Name(name) => name,
            ScreenField::Detailed(spec) => &spec.name,
        }
    }

    /// Markup attributes after `name`, in a stable order
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let ScreenField::Detailed(spec) = self else {
            return Vec::new();
        };

        let mut attrs = Vec::new();
        if let Some(widget) = &spec.widget {
            attrs.push(("widget", widget.clone()));
        }
        if let Some(string) = &spec.string {
            attrs.push(("string", string.clone()));
        }
        if spec.required {
            attrs.push(("required", "1".to_string()));
        }
        if spec.readonly {
            attrs.push(("readonly", "1".to_string()));
        }
        attrs
    }
}

/// Accepted spellings of `groups` in definition files
#[derive(Deserialize, JsonSchema)]
#[serde(untagged)]
enum GroupsRepr {
    Csv(String),
    List(Vec<String>),
}

fn deserialize_groups<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<GroupsRepr>::deserialize(deserializer)?;
    let groups = match repr {
        None => Vec::new(),
        Some(GroupsRepr::Csv(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect(),
        Some(GroupsRepr::List(list)) => list,
    };
    Ok(groups)
}
