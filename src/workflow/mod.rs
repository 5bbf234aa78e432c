// Copyright 2025 Cowboy AI, LLC.

//! Workflow model
//!
//! This module provides the declarative workflow a record type carries:
//! - States are named, labelled and optionally hidden from the statusbar
//! - Transitions leave a state, optionally into another one, optionally
//!   behind a confirmation screen
//! - A typed request context names the state and transition an operation
//!   acts on

pub mod context;
pub mod definition;
pub mod state;
pub mod transition;

pub use context::*;
pub use definition::*;
pub use state::*;
pub use transition::*;
