//! Hosting-environment seam: where markup is painted and clicks are bound.

use crate::view::{Control, ControlKind};

/// What a bound control does when clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ToggleFilter { label: String },
    SelectRover { name: String },
}

impl Action {
    /// Handler bound to a rendered control.
    pub fn for_control(control: &Control) -> Self {
        match control.kind {
            ControlKind::FilterToggle => Action::ToggleFilter {
                label: control.value.clone(),
            },
            ControlKind::RoverSelector => Action::SelectRover {
                name: control.value.clone(),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::ToggleFilter { .. } => "toggle_filter",
            Action::SelectRover { .. } => "select_rover",
        }
    }
}

pub trait Surface: Send {
    /// Replaces everything currently displayed.
    fn replace_content(&mut self, html: &str);

    /// Drops every click binding.
    fn clear_bindings(&mut self);

    fn bind(&mut self, control: &Control, action: Action);

    /// Action bound to the control with this kind and value, if it is on screen.
    fn resolve_click(&self, kind: ControlKind, value: &str) -> Option<Action>;
}

/// In-memory surface used by the command-line host and by tests.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    content: String,
    bindings: Vec<(Control, Action)>,
    paints: u64,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn bindings(&self) -> &[(Control, Action)] {
        &self.bindings
    }

    /// Number of times content has been replaced.
    pub fn paints(&self) -> u64 {
        self.paints
    }
}

impl Surface for HeadlessSurface {
    fn replace_content(&mut self, html: &str) {
        self.content.clear();
        self.content.push_str(html);
        self.paints += 1;
    }

    fn clear_bindings(&mut self) {
        self.bindings.clear();
    }

    fn bind(&mut self, control: &Control, action: Action) {
        self.bindings.push((control.clone(), action));
    }

    fn resolve_click(&self, kind: ControlKind, value: &str) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(control, _)| control.kind == kind && control.value == value)
            .map(|(_, action)| action.clone())
    }
}
