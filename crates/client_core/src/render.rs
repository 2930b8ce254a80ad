//! Render cycle and the state container it is coupled to.

use tracing::debug;

use crate::{
    state::{AppState, StatePatch},
    surface::{Action, Surface},
    view::root_view,
};

/// Paints `state` onto `surface` and re-binds every control in the new content.
///
/// Replacing the content invalidates all earlier bindings, so they are cleared
/// unconditionally before the fresh controls are bound.
pub fn render<S: Surface>(surface: &mut S, state: &AppState) {
    let (html, controls) = root_view(state).into_parts();
    surface.replace_content(&html);
    surface.clear_bindings();
    for control in &controls {
        surface.bind(control, Action::for_control(control));
    }
    debug!(
        bytes = html.len(),
        controls = controls.len(),
        "rendered dashboard"
    );
}

/// Owns the current snapshot and the surface it is painted on.
///
/// Every [`Store::update`] performs exactly one merge followed by exactly one render.
pub struct Store<S> {
    state: AppState,
    surface: S,
}

impl<S: Surface> Store<S> {
    pub fn new(state: AppState, surface: S) -> Self {
        Self { state, surface }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn update(&mut self, patch: StatePatch) {
        self.state = self.state.merge(patch);
        render(&mut self.surface, &self.state);
    }

    /// Paints the current snapshot without merging.
    pub fn render(&mut self) {
        render(&mut self.surface, &self.state);
    }
}
