// Copyright 2025 Cowboy AI, LLC.

//! Workflow model registration
//!
//! The host registers each model that carries a workflow once, at setup.
//! Registration loads the definition and produces a [`WorkflowModel`]: an
//! immutable per-model configuration object that every request for that
//! model then uses.

use crate::errors::{WorkflowError, WorkflowResult};
use crate::executor::{ActionOutcome, TransitionExecutor, WorkflowRecord};
use crate::identifiers::ModelName;
use crate::loader::DefinitionLoader;
use crate::settings::WorkflowSettings;
use crate::view::{ViewKind, ViewRewriter};
use crate::workflow::{WorkflowContext, WorkflowDefinition};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;

/// A model bound to its workflow definition
#[derive(Debug, Clone)]
pub struct WorkflowModel {
    name: ModelName,
    definition: Arc<WorkflowDefinition>,
    settings: Arc<WorkflowSettings>,
}

impl WorkflowModel {
    /// Bind a definition to a model
    pub fn new(
        name: ModelName,
        definition: Arc<WorkflowDefinition>,
        settings: Arc<WorkflowSettings>,
    ) -> Self {
        Self {
            name,
            definition,
            settings,
        }
    }

    /// Model name
    pub fn name(&self) -> &ModelName {
        &self.name
    }

    /// The shared definition
    pub fn definition(&self) -> &Arc<WorkflowDefinition> {
        &self.definition
    }

    /// Settings the model was registered with
    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// `(name, label)` pairs for the model's state selection field
    pub fn get_states(&self) -> Vec<(String, String)> {
        self.definition.get_states()
    }

    /// Read a typed context from the host's request context values
    pub fn context_from_values(&self, values: &Map<String, Value>) -> WorkflowContext {
        WorkflowContext::from_values(values, &self.settings.context_keys)
    }

    /// Executor over this model's definition
    pub fn executor(&self) -> TransitionExecutor<'_> {
        TransitionExecutor::new(&self.name, &self.definition, &self.settings)
    }

    /// Rewriter over this model's definition
    pub fn rewriter(&self) -> ViewRewriter<'_> {
        ViewRewriter::new(&self.definition, &self.settings)
    }

    /// Apply a transition directly, without confirmation
    pub fn action_direct<R>(&self, record: &mut R, context: &WorkflowContext) -> WorkflowResult<ActionOutcome>
    where
        R: WorkflowRecord + ?Sized,
    {
        self.executor().action_direct(record, context)
    }

    /// Apply a transition, going through its transition screen when declared
    pub fn action_transition<R>(&self, record: &mut R, context: &WorkflowContext) -> WorkflowResult<ActionOutcome>
    where
        R: WorkflowRecord + ?Sized,
    {
        self.executor().action_transition(record, context)
    }

    /// Inject workflow markup into a view of this model
    pub fn render_view<'s>(
        &self,
        kind: ViewKind,
        arch: &'s str,
        context: &WorkflowContext,
    ) -> WorkflowResult<Cow<'s, str>> {
        self.rewriter().rewrite_view(kind, arch, context)
    }
}

/// Registered workflow models, in registration order
#[derive(Debug, Clone)]
pub struct WorkflowRegistry {
    settings: Arc<WorkflowSettings>,
    loader: DefinitionLoader,
    models: IndexMap<ModelName, WorkflowModel>,
}

impl WorkflowRegistry {
    /// Create an empty registry searching the settings' addons path
    pub fn new(settings: WorkflowSettings) -> Self {
        let loader = DefinitionLoader::new(settings.addons_path.clone());
        Self {
            settings: Arc::new(settings),
            loader,
            models: IndexMap::new(),
        }
    }

    /// Settings shared by all registered models
    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Load `file` and register it for `model`, replacing any earlier registration
    pub fn register(&mut self, model: impl Into<ModelName>, file: &str) -> WorkflowResult<&WorkflowModel> {
        let model = model.into();
        debug!("Loading workflow for: {} from {}", model, file);
        let definition = self.loader.load(file)?;
        Ok(self.register_definition(model, definition))
    }

    /// Register an already-built definition for `model`
    pub fn register_definition(
        &mut self,
        model: impl Into<ModelName>,
        definition: WorkflowDefinition,
    ) -> &WorkflowModel {
        let model = model.into();
        let bound = WorkflowModel::new(model.clone(), Arc::new(definition), self.settings.clone());

        match self.models.entry(model) {
            indexmap::map::Entry::Occupied(mut entry) => {
                debug!("Replacing workflow registration for {}", entry.key());
                entry.insert(bound);
                entry.into_mut()
            }
            indexmap::map::Entry::Vacant(entry) => entry.insert(bound),
        }
    }

    /// Look up a model
    pub fn get(&self, model: &str) -> Option<&WorkflowModel> {
        self.models.get(&ModelName::new(model))
    }

    /// Look up a model, failing when it carries no workflow
    pub fn model(&self, model: &str) -> WorkflowResult<&WorkflowModel> {
        self.get(model)
            .ok_or_else(|| WorkflowError::UnknownModel(model.to_string()))
    }

    /// Registered model names, in registration order
    pub fn models(&self) -> impl Iterator<Item = &ModelName> {
        self.models.keys()
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no model is registered
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{State, Transition};
    use std::fs;
    use tempfile::TempDir;

    fn simple() -> WorkflowDefinition {
        WorkflowDefinition::new(vec![
            State::new("new", "New").with_transition(Transition::new("start", "Start").to("open")),
            State::new("open", "Open"),
        ])
        .unwrap()
    }

    #[test]
    fn test_register_from_addons_path() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("helpdesk")).unwrap();
        fs::write(
            dir.path().join("helpdesk/workflow.yml"),
            "states:\n  - name: new\n    label: New\n",
        )
        .unwrap();

        let mut registry = WorkflowRegistry::new(WorkflowSettings::with_addons_path([dir.path()]));
        let model = registry.register("helpdesk.ticket", "helpdesk/workflow.yml").unwrap();
        assert_eq!(model.get_states(), vec![("new".to_string(), "New".to_string())]);

        assert!(registry.get("helpdesk.ticket").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_missing_file() {
        let mut registry = WorkflowRegistry::new(WorkflowSettings::default());
        let err = registry.register("helpdesk.ticket", "missing.yml").unwrap_err();

        assert!(matches!(err, WorkflowError::DefinitionNotFound { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_reregistration_replaces_and_keeps_order() {
        let mut registry = WorkflowRegistry::new(WorkflowSettings::default());
        registry.register_definition("a.model", simple());
        registry.register_definition("b.model", WorkflowDefinition::default());
        registry.register_definition("a.model", WorkflowDefinition::default());

        assert_eq!(
            registry.models().map(|m| m.as_str()).collect::<Vec<_>>(),
            vec!["a.model", "b.model"]
        );
        assert_eq!(registry.model("a.model").unwrap().definition().state_count(), 0);
    }

    #[test]
    fn test_unknown_model() {
        let registry = WorkflowRegistry::new(WorkflowSettings::default());
        let err = registry.model("res.partner").unwrap_err();
        assert!(matches!(err, WorkflowError::UnknownModel(ref m) if m == "res.partner"));
    }

    #[test]
    fn test_models_share_definition() {
        let mut registry = WorkflowRegistry::new(WorkflowSettings::default());
        registry.register_definition("a.model", simple());

        let first = registry.model("a.model").unwrap().clone();
        let second = registry.model("a.model").unwrap();
        assert!(Arc::ptr_eq(first.definition(), second.definition()));
    }
}
