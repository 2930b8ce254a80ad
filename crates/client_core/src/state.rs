//! Immutable application state and the copy-on-write merge that produces the next snapshot.

use std::{collections::HashSet, sync::Arc};

use shared::{
    domain::{default_filters, InfoFilter},
    protocol::{Photo, RoverManifest},
};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("filter list must not be empty")]
    EmptyFilters,
    #[error("duplicate filter key or label: {0}")]
    DuplicateFilter(String),
}

/// One snapshot of everything the view is derived from.
///
/// Nested values sit behind `Arc`, so cloning a snapshot is cheap and no
/// holder of an older snapshot can observe a later merge.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    infos: Arc<[InfoFilter]>,
    data: Option<Arc<RoverManifest>>,
    photos: Option<Arc<[Photo]>>,
}

impl AppState {
    pub fn new(infos: Vec<InfoFilter>) -> Result<Self, StateError> {
        if infos.is_empty() {
            return Err(StateError::EmptyFilters);
        }
        let mut keys = HashSet::new();
        let mut labels = HashSet::new();
        for info in &infos {
            if !keys.insert(info.key.as_str()) {
                return Err(StateError::DuplicateFilter(info.key.clone()));
            }
            if !labels.insert(info.label.as_str()) {
                return Err(StateError::DuplicateFilter(info.label.clone()));
            }
        }

        Ok(Self {
            infos: infos.into(),
            data: None,
            photos: None,
        })
    }

    /// Session start state: the six default filters, no rover data yet.
    pub fn initial() -> Self {
        Self {
            infos: default_filters().into(),
            data: None,
            photos: None,
        }
    }

    pub fn infos(&self) -> &[InfoFilter] {
        &self.infos
    }

    pub fn data(&self) -> Option<&RoverManifest> {
        self.data.as_deref()
    }

    pub fn photos(&self) -> Option<&[Photo]> {
        self.photos.as_deref()
    }

    pub fn find_filter(&self, label: &str) -> Option<&InfoFilter> {
        self.infos.iter().find(|info| info.label == label)
    }

    /// Returns the next snapshot; `self` is left untouched.
    pub fn merge(&self, patch: StatePatch) -> AppState {
        let mut next = self.clone();

        if let Some(filter) = patch.filter {
            match next.infos.iter().position(|info| info.label == filter.label) {
                Some(index) if next.infos[index].key != filter.key => warn!(
                    label = %filter.label,
                    key = %filter.key,
                    "ignoring filter patch whose key differs from the stored entry"
                ),
                Some(index) => {
                    let mut infos = next.infos.to_vec();
                    infos[index].selected = filter.selected;
                    next.infos = infos.into();
                }
                None => debug!(label = %filter.label, "filter patch matched no entry"),
            }
        }

        if let Some(data) = patch.data {
            next.data = Some(Arc::new(data));
        }

        if let Some(photos) = patch.photos {
            next.photos = Some(photos.into());
        }

        next
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Partial update: every populated key overwrites the matching key of the current state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch {
    filter: Option<InfoFilter>,
    data: Option<RoverManifest>,
    photos: Option<Vec<Photo>>,
}

impl StatePatch {
    /// Sets `selected` on the `infos` entry with the same label and key.
    ///
    /// Only the flag is copied; order, keys and labels of `infos` never change.
    pub fn filter(filter: InfoFilter) -> Self {
        Self::default().with_filter(filter)
    }

    pub fn data(data: RoverManifest) -> Self {
        Self::default().with_data(data)
    }

    pub fn photos(photos: Vec<Photo>) -> Self {
        Self::default().with_photos(photos)
    }

    pub fn with_filter(mut self, filter: InfoFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_data(mut self, data: RoverManifest) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_photos(mut self, photos: Vec<Photo>) -> Self {
        self.photos = Some(photos);
        self
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
