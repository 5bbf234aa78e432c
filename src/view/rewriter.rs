// Copyright 2025 Cowboy AI, LLC.

//! Form view rewriting
//!
//! Replaces workflow markers in view markup with fragments generated from
//! the definition. Each marker kind is rendered at most once per call, and
//! only when it occurs; transition-scoped markers therefore only require a
//! context when the view actually uses them.

use crate::errors::{WorkflowError, WorkflowResult};
use crate::settings::WorkflowSettings;
use crate::view::markers::{find_markers, Marker};
use crate::view::markup::{expr_literal, Element};
use crate::workflow::{State, Transition, WorkflowContext, WorkflowDefinition};
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::debug;

/// Kind of view handed to the rewriter by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Form view, the only kind that carries workflow markers
    Form,
    /// List view
    List,
    /// Kanban view
    Kanban,
    /// Search view
    Search,
    /// Anything else
    Other,
}

/// Rewrites view markup for one workflow definition
#[derive(Debug, Clone, Copy)]
pub struct ViewRewriter<'a> {
    definition: &'a WorkflowDefinition,
    settings: &'a WorkflowSettings,
}

impl<'a> ViewRewriter<'a> {
    /// Create a rewriter
    pub fn new(definition: &'a WorkflowDefinition, settings: &'a WorkflowSettings) -> Self {
        Self {
            definition,
            settings,
        }
    }

    /// Rewrite a view of the given kind; non-form views pass through
    pub fn rewrite_view<'s>(
        &self,
        kind: ViewKind,
        arch: &'s str,
        context: &WorkflowContext,
    ) -> WorkflowResult<Cow<'s, str>> {
        match kind {
            ViewKind::Form => self.rewrite(arch, context),
            _ => Ok(Cow::Borrowed(arch)),
        }
    }

    /// Replace every marker in `arch`
    ///
    /// Markup without markers is returned borrowed and unchanged.
    pub fn rewrite<'s>(
        &self,
        arch: &'s str,
        context: &WorkflowContext,
    ) -> WorkflowResult<Cow<'s, str>> {
        let matches = find_markers(arch);
        if matches.is_empty() {
            return Ok(Cow::Borrowed(arch));
        }

        let mut fragments: HashMap<Marker, String> = HashMap::new();
        let mut out = String::with_capacity(arch.len() + 256);
        let mut cursor = 0;

        for m in &matches {
            out.push_str(&arch[cursor..m.start]);
            if !fragments.contains_key(&m.marker) {
                let fragment = self.render(m.marker, context)?;
                debug!("Replacing {} with {} bytes of markup", m.marker, fragment.len());
                fragments.insert(m.marker, fragment);
            }
            if let Some(fragment) = fragments.get(&m.marker) {
                out.push_str(fragment);
            }
            cursor = m.end;
        }
        out.push_str(&arch[cursor..]);

        Ok(Cow::Owned(out))
    }

    /// Render the replacement of a single marker
    pub fn render(&self, marker: Marker, context: &WorkflowContext) -> WorkflowResult<String> {
        match marker {
            Marker::Statusbar => Ok(self.statusbar()),
            Marker::Buttons => Ok(self.buttons()),
            Marker::TransitionButtons => {
                let (state, transition) = self.definition.resolve(context)?;
                Ok(self.transition_buttons(state, transition))
            }
            Marker::TransitionFields => {
                let (state, transition) = self.definition.resolve(context)?;
                self.transition_fields(state, transition)
            }
        }
    }

    fn statusbar(&self) -> String {
        let visible = self
            .definition
            .visible_states()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(",");

        Element::new("field")
            .attr("name", self.settings.state_field.as_str())
            .attr("widget", "statusbar")
            .attr("statusbar_visible", visible)
            .render()
    }

    /// Transitions with a screen go through the confirmed action; the
    /// rest call the direct action with only the transition name.
    fn buttons(&self) -> String {
        let mut out = String::new();
        for (state, transition) in self.definition.transitions() {
            let (action, context) = if transition.requires_confirmation() {
                (
                    self.settings.transition_action.as_str(),
                    self.button_context(state, transition, false),
                )
            } else {
                (
                    self.settings.direct_action.as_str(),
                    self.direct_context(transition),
                )
            };

            Element::new("button")
                .attr("name", action)
                .attr("type", "object")
                .attr("string", transition.label.as_str())
                .attr_opt("class", transition.css_class.as_deref())
                .attr_opt("groups", transition.groups_attr())
                .attr(
                    "invisible",
                    format!(
                        "{} != {}",
                        self.settings.state_field,
                        expr_literal(state.name.as_str())
                    ),
                )
                .attr("context", context)
                .render_into(&mut out);
        }
        out
    }

    fn transition_buttons(&self, state: &State, transition: &Transition) -> String {
        let mut out = String::new();
        Element::new("button")
            .attr("name", self.settings.transition_action.as_str())
            .attr("type", "object")
            .attr("string", transition.label.as_str())
            .attr("class", "btn-primary")
            .attr("context", self.button_context(state, transition, true))
            .render_into(&mut out);
        Element::new("button")
            .attr("string", "Cancel")
            .attr("class", "btn-secondary")
            .attr("special", "cancel")
            .render_into(&mut out);
        out
    }

    fn transition_fields(&self, state: &State, transition: &Transition) -> WorkflowResult<String> {
        let fields = transition
            .screen_fields()
            .ok_or_else(|| WorkflowError::MissingConfirmationFields {
                state: state.name.to_string(),
                transition: transition.name.to_string(),
            })?;

        let mut out = String::new();
        for field in fields {
            let mut element = Element::new("field").attr("name", field.name());
            for (name, value) in field.attributes() {
                element = element.attr(name, value);
            }
            element.render_into(&mut out);
        }
        Ok(out)
    }

    fn direct_context(&self, transition: &Transition) -> String {
        format!(
            "{{{}: {}}}",
            expr_literal(&self.settings.context_keys.transition),
            expr_literal(transition.name.as_str())
        )
    }

    /// Context expression carried by a generated button
    fn button_context(&self, state: &State, transition: &Transition, confirmed: bool) -> String {
        let keys = &self.settings.context_keys;
        let mut entries = vec![
            format!(
                "{}: {}",
                expr_literal(&keys.state),
                expr_literal(state.name.as_str())
            ),
            format!(
                "{}: {}",
                expr_literal(&keys.transition),
                expr_literal(transition.name.as_str())
            ),
        ];
        if confirmed {
            entries.push(format!("{}: True", expr_literal(&keys.confirmed)));
        }
        format!("{{{}}}", entries.join(", "))
    }
}
