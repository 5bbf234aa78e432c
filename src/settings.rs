// Copyright 2025 Cowboy AI, LLC.

//! Workflow settings
//!
//! Loaded with precedence:
//! 1. Default values
//! 2. An optional settings file (any format the `config` crate reads)
//! 3. Environment variables prefixed with `CIM_WORKFLOW__`
//!    (e.g. `CIM_WORKFLOW__ADDONS_PATH=/opt/addons,/srv/custom`)

use crate::errors::WorkflowResult;
use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment variables read by [`WorkflowSettings::load`]
pub const ENV_PREFIX: &str = "CIM_WORKFLOW";

/// Settings shared by every registered workflow model
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkflowSettings {
    /// Base directories searched, in order, for definition files
    #[serde(deserialize_with = "deserialize_paths")]
    pub addons_path: Vec<PathBuf>,

    /// Record field holding the current state
    pub state_field: String,

    /// Method called by buttons of transitions with a confirmation screen,
    /// and by the confirm button on that screen
    pub transition_action: String,

    /// Method called by buttons of transitions applied without confirmation
    pub direct_action: String,

    /// Request context keys
    pub context_keys: ContextKeys,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            addons_path: Vec::new(),
            state_field: "state".to_string(),
            transition_action: "action_workflow_transition".to_string(),
            direct_action: "action_workflow_direct".to_string(),
            context_keys: ContextKeys::default(),
        }
    }
}

/// Names of the request context values the workflow reads and writes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContextKeys {
    /// Current state name
    pub state: String,
    /// Requested transition name
    pub transition: String,
    /// Confirmation flag
    pub confirmed: String,
}

impl Default for ContextKeys {
    fn default() -> Self {
        Self {
            state: "workflow_state".to_string(),
            transition: "workflow_transition".to_string(),
            confirmed: "workflow_confirmed".to_string(),
        }
    }
}

impl WorkflowSettings {
    /// Settings with the given base directories and defaults elsewhere
    pub fn with_addons_path<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            addons_path: paths.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Load settings from an optional file, then the environment
    pub fn load(file: Option<&Path>) -> WorkflowResult<Self> {
        Self::load_with(file, environment())
    }

    fn load_with(file: Option<&Path>, env: Environment) -> WorkflowResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        Self::from_config(builder.add_source(env).build()?)
    }

    /// Deserialize from an already-built configuration
    pub fn from_config(config: Config) -> WorkflowResult<Self> {
        let settings: WorkflowSettings = config.try_deserialize()?;
        tracing::debug!(
            "Workflow settings loaded: {} addons paths, state field {}",
            settings.addons_path.len(),
            settings.state_field
        );
        Ok(settings)
    }
}

/// `CIM_WORKFLOW__*` variables; nested keys use `__`, lists use `,`
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("addons_path")
        .try_parsing(true)
}

/// `addons_path` may be a list or a single comma-separated string
fn deserialize_paths<'de, D>(deserializer: D) -> Result<Vec<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PathsRepr {
        Csv(String),
        List(Vec<PathBuf>),
    }

    Ok(match PathsRepr::deserialize(deserializer)? {
        PathsRepr::Csv(s) => s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect(),
        PathsRepr::List(list) => list,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = WorkflowSettings::default();

        assert!(settings.addons_path.is_empty());
        assert_eq!(settings.state_field, "state");
        assert_eq!(settings.transition_action, "action_workflow_transition");
        assert_eq!(settings.direct_action, "action_workflow_direct");
        assert_eq!(settings.context_keys.state, "workflow_state");
        assert_eq!(settings.context_keys.transition, "workflow_transition");
        assert_eq!(settings.context_keys.confirmed, "workflow_confirmed");
    }

    #[test]
    fn test_from_config_with_csv_paths() {
        let config = Config::builder()
            .set_override("addons_path", "/opt/addons, /srv/custom")
            .unwrap()
            .set_override("state_field", "stage")
            .unwrap()
            .build()
            .unwrap();

        let settings = WorkflowSettings::from_config(config).unwrap();
        assert_eq!(
            settings.addons_path,
            vec![PathBuf::from("/opt/addons"), PathBuf::from("/srv/custom")]
        );
        assert_eq!(settings.state_field, "stage");
        assert_eq!(settings.context_keys, ContextKeys::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "addons_path = [\"/a\", \"/b\"]\n\n[context_keys]\nconfirmed = \"confirmed\""
        )
        .unwrap();

        let settings = WorkflowSettings::load(Some(file.path())).unwrap();
        assert_eq!(settings.addons_path, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(settings.context_keys.confirmed, "confirmed");
        assert_eq!(settings.context_keys.state, "workflow_state");
    }

    fn vars(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        let mut map = config::Map::new();
        for (key, value) in pairs {
            map.insert(key.to_string(), value.to_string());
        }
        map
    }

    #[test]
    fn test_environment_overrides() {
        let env = environment().source(Some(vars(&[
            ("CIM_WORKFLOW__ADDONS_PATH", "/a,/b"),
            ("CIM_WORKFLOW__CONTEXT_KEYS__STATE", "wf_state"),
            ("CIM_WORKFLOW__DIRECT_ACTION", "action_apply"),
            ("OTHER__STATE_FIELD", "ignored"),
        ])));

        let settings = WorkflowSettings::load_with(None, env).unwrap();
        assert_eq!(settings.addons_path, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(settings.context_keys.state, "wf_state");
        assert_eq!(settings.context_keys.transition, "workflow_transition");
        assert_eq!(settings.direct_action, "action_apply");
        assert_eq!(settings.state_field, "state");
    }

    #[test]
    fn test_environment_wins_over_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "state_field = \"stage\"\naddons_path = [\"/from/file\"]").unwrap();

        let env = environment().source(Some(vars(&[("CIM_WORKFLOW__ADDONS_PATH", "/from/env")])));

        let settings = WorkflowSettings::load_with(Some(file.path()), env).unwrap();
        assert_eq!(settings.addons_path, vec![PathBuf::from("/from/env")]);
        assert_eq!(settings.state_field, "stage");
    }

    #[test]
    fn test_missing_settings_file_is_an_error() {
        let err = WorkflowSettings::load(Some(Path::new("/nonexistent/workflow.toml"))).unwrap_err();
        assert!(matches!(err, crate::WorkflowError::Settings(_)));
    }
}
