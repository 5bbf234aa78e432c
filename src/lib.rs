// Copyright 2025 Cowboy AI, LLC.

//! # CIM Workflow
//!
//! Declarative, YAML-defined state machines for the record models of a host
//! business application.
//!
//! This crate provides:
//! - **Definitions**: states, transitions and transition screens parsed from YAML
//! - **Loading**: definition files found below a list of addons directories
//! - **Resolution**: (state, transition) lookup from a typed request context
//! - **Execution**: direct and confirmed transitions against a host record
//! - **Views**: statusbar, buttons and transition-screen markup injected into form views
//!
//! ## Example
//!
//! ```rust
//! use cim_workflow::{WorkflowContext, WorkflowDefinition, WorkflowRegistry, WorkflowSettings, ViewKind};
//!
//! let yaml = r#"
//! states:
//!   - name: draft
//!     label: Draft
//!     transitions:
//!       - name: confirm
//!         label: Confirm
//!         new_state: done
//!   - name: done
//!     label: Done
//! "#;
//!
//! let mut registry = WorkflowRegistry::new(WorkflowSettings::default());
//! let definition = WorkflowDefinition::from_yaml_str(yaml, "inline").unwrap();
//! let model = registry.register_definition("sale.order", definition);
//!
//! let form = model
//!     .render_view(ViewKind::Form, "<header><workflow_statusbar/></header>", &WorkflowContext::new())
//!     .unwrap();
//! assert!(form.contains(r#"statusbar_visible="draft,done""#));
//! ```

#![warn(missing_docs)]

mod errors;
mod events;
mod executor;
mod identifiers;
mod loader;
mod registry;
mod settings;
pub mod view;
pub mod workflow;

pub use errors::{WorkflowError, WorkflowResult};
pub use events::{TransitionApplied, WorkflowEvent};
pub use executor::{
    ActionDirective, ActionOutcome, TransitionExecutor, TransitionScreenRequest, WorkflowRecord,
};
pub use identifiers::{EventId, ModelName, StateId, TransitionId};
pub use loader::DefinitionLoader;
pub use registry::{WorkflowModel, WorkflowRegistry};
pub use settings::{ContextKeys, WorkflowSettings, ENV_PREFIX};
pub use view::{Marker, ViewKind, ViewRewriter};
pub use workflow::{
    FieldSpec, ScreenField, State, Transition, TransitionScreen, WorkflowContext,
    WorkflowDefinition,
};
