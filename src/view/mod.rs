// Copyright 2025 Cowboy AI, LLC.

//! View markup injection
//!
//! Form views carry four placeholder markers that are replaced with
//! markup generated from the workflow definition:
//!
//! | Marker | Replacement |
//! |---|---|
//! | `<workflow_statusbar/>` | statusbar field listing the visible states |
//! | `<workflow_buttons/>` | one button per transition, shown in its source state; direct action unless the transition has a screen |
//! | `<workflow_transition_buttons/>` | confirm and cancel buttons of a transition screen |
//! | `<workflow_transition_fields/>` | extra fields of a transition screen |

pub mod markers;
pub mod markup;
pub mod rewriter;

pub use markers::{find_markers, Marker, MarkerMatch};
pub use rewriter::{ViewKind, ViewRewriter};
