// Copyright 2025 Cowboy AI, LLC.

//! Placeholder markers recognised in view markup

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Matches any of the four self-closing marker tags
static MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"<(workflow_statusbar|workflow_buttons|workflow_transition_buttons|workflow_transition_fields)\s*/>",
    )
    .expect("marker pattern is a valid regex")
});

/// A placeholder a view author drops into form markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Statusbar listing the visible states
    Statusbar,
    /// One button per transition across all states
    Buttons,
    /// Confirm and cancel buttons of the active transition screen
    TransitionButtons,
    /// Extra fields of the active transition screen
    TransitionFields,
}

impl Marker {
    /// All markers, in the order they are documented
    pub const ALL: [Marker; 4] = [
        Marker::Statusbar,
        Marker::Buttons,
        Marker::TransitionButtons,
        Marker::TransitionFields,
    ];

    /// Tag name as written in markup
    pub fn tag(&self) -> &'static str {
        match self {
            Marker::Statusbar => "workflow_statusbar",
            Marker::Buttons => "workflow_buttons",
            Marker::TransitionButtons => "workflow_transition_buttons",
            Marker::TransitionFields => "workflow_transition_fields",
        }
    }

    /// Parse a tag name
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.tag() == tag)
    }

    /// Whether the marker needs a resolvable (state, transition) in context
    pub fn is_transition_scoped(&self) -> bool {
        matches!(self, Marker::TransitionButtons | Marker::TransitionFields)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}/>", self.tag())
    }
}

/// A marker occurrence in a markup string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerMatch {
    /// Which marker
    pub marker: Marker,
    /// Byte offset of `<`
    pub start: usize,
    /// Byte offset one past `>`
    pub end: usize,
}

/// Find every marker occurrence, left to right
pub fn find_markers(arch: &str) -> Vec<MarkerMatch> {
    MARKER_PATTERN
        .captures_iter(arch)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let marker = Marker::from_tag(caps.get(1)?.as_str())?;
            Some(MarkerMatch {
                marker,
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}
