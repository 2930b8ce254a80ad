use super::*;

fn curiosity() -> RoverManifest {
    RoverManifest::new("Curiosity", "2011-11-26", "2012-08-06", "2022-03-05", "active")
}

#[test]
fn merge_leaves_the_source_snapshot_untouched() {
    let before = AppState::initial();
    let copy = before.clone();

    let after = before.merge(
        StatePatch::data(curiosity())
            .with_photos(vec![Photo::new("a.jpg")])
            .with_filter(before.infos()[2].toggled()),
    );

    assert_eq!(before, copy);
    assert!(before.data().is_none());
    assert!(before.photos().is_none());
    assert!(!before.infos()[2].selected);
    assert!(after.infos()[2].selected);
}

#[test]
fn merge_overrides_present_keys_and_keeps_the_rest() {
    let state = AppState::initial();
    let merged = state.merge(StatePatch::data(curiosity()));

    assert_eq!(merged.data(), Some(&curiosity()));
    assert_eq!(merged.infos(), state.infos());
    assert!(merged.photos().is_none());

    let replaced = merged.merge(StatePatch::data(RoverManifest::new(
        "Spirit",
        "2003-06-10",
        "2004-01-04",
        "2010-03-21",
        "complete",
    )));
    assert_eq!(replaced.data().map(|m| m.name.as_str()), Some("Spirit"));
}

#[test]
fn filter_patch_sets_selection_in_place() {
    let state = AppState::initial();
    let status = state.find_filter("Status").expect("status filter").toggled();

    let merged = state.merge(StatePatch::filter(status));

    let labels: Vec<_> = merged.infos().iter().map(|f| f.label.as_str()).collect();
    let original: Vec<_> = state.infos().iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, original);
    assert!(merged.find_filter("Status").expect("status").selected);
    assert_eq!(merged.infos().len(), 6);
}

#[test]
fn toggling_twice_restores_selection_flags() {
    let state = AppState::initial();
    let once = state.merge(StatePatch::filter(
        state.find_filter("Name").expect("name").toggled(),
    ));
    let twice = once.merge(StatePatch::filter(
        once.find_filter("Name").expect("name").toggled(),
    ));

    assert_eq!(twice, state);
}

#[test]
fn unknown_filter_patch_is_ignored() {
    let state = AppState::initial();
    let merged = state.merge(StatePatch::filter(InfoFilter::new("cameras", "Cameras", true)));
    assert_eq!(merged, state);
}

#[test]
fn filter_patch_with_a_different_key_is_ignored() {
    let state = AppState::initial();
    let merged = state.merge(StatePatch::filter(InfoFilter::new("launch_date", "Name", false)));

    assert_eq!(merged, state);
    let keys: Vec<_> = merged.infos().iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys.iter().filter(|k| **k == "launch_date").count(), 1);
    assert_eq!(
        merged.find_filter("Name").map(|f| f.key.as_str()),
        Some("name")
    );
}

#[test]
fn filter_patches_in_any_order_keep_display_order() {
    let state = AppState::initial();
    let mut merged = state.clone();
    for info in state.infos().iter().rev() {
        merged = merged.merge(StatePatch::filter(info.toggled()));
    }

    let pairs = |s: &AppState| -> Vec<(String, String)> {
        s.infos()
            .iter()
            .map(|f| (f.key.clone(), f.label.clone()))
            .collect()
    };
    assert_eq!(pairs(&merged), pairs(&state));
    assert!(merged
        .infos()
        .iter()
        .zip(state.infos())
        .all(|(after, before)| after.selected != before.selected));
}

#[test]
fn constructor_rejects_empty_and_duplicate_filters() {
    assert_eq!(AppState::new(Vec::new()), Err(StateError::EmptyFilters));
    assert_eq!(
        AppState::new(vec![
            InfoFilter::new("name", "Name", true),
            InfoFilter::new("status", "Name", false),
        ]),
        Err(StateError::DuplicateFilter("Name".to_string()))
    );
    assert!(AppState::new(vec![InfoFilter::new("name", "Name", true)]).is_ok());
}
