use super::*;
use shared::domain::default_filters;

use crate::state::StatePatch;

fn sample_infos(photos_selected: bool) -> Vec<InfoFilter> {
    vec![
        InfoFilter::new("name", "Name", true),
        InfoFilter::new("photos", "Most recent photos", photos_selected),
        InfoFilter::new("status", "Status", false),
    ]
}

fn sample_manifest() -> RoverManifest {
    RoverManifest::new("Curiosity", "2011-11-26", "2012-08-06", "2022-03-05", "active")
}

#[test]
fn derived_cards_skip_unselected_and_photo_filters() {
    let cards = derive_info_cards(&sample_infos(true), &sample_manifest());
    assert_eq!(
        cards,
        vec![InfoCard {
            title: "Name".to_string(),
            value: "Curiosity".to_string(),
        }]
    );

    let html = derived_info_cards(&sample_infos(true), &sample_manifest());
    assert_eq!(html.html().matches(r#"class="info-card""#).count(), 1);
    assert!(html.html().contains("<h3>Name</h3><div>Curiosity</div>"));
}

#[test]
fn derived_cards_follow_filter_order() {
    let cards = derive_info_cards(&default_filters(), &sample_manifest());
    let titles: Vec<_> = cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["Launch Date", "Landing Date", "Name"]);
    assert_eq!(cards[0].value, "2011-11-26");
}

#[test]
fn gallery_shows_placeholder_while_photos_are_pending() {
    let html = photo_gallery(&sample_infos(true), None);
    assert!(html.html().contains("Loading..."));
    assert!(!html.html().contains("<img"));
}

#[test]
fn gallery_renders_one_image_per_photo() {
    let photos = vec![Photo::new("a.jpg")];
    let html = photo_gallery(&sample_infos(true), Some(&photos));
    assert_eq!(html.html().matches("<img").count(), 1);
    assert!(html.html().contains(r#"src="a.jpg""#));
}

#[test]
fn gallery_is_empty_when_photo_filter_is_off() {
    let photos = vec![Photo::new("a.jpg")];
    assert!(photo_gallery(&sample_infos(false), Some(&photos)).is_empty());
    assert!(photo_gallery(&sample_infos(false), None).is_empty());
}

#[test]
fn filter_controls_carry_label_and_selection() {
    let markup = filter_controls(&sample_infos(false));
    assert!(markup
        .html()
        .contains(r#"<button class="btn selected" type="button" value="Name">Name</button>"#));
    assert!(markup
        .html()
        .contains(r#"<button class="btn" type="button" value="Status">Status</button>"#));

    let values: Vec<_> = markup.controls().iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, ["Name", "Most recent photos", "Status"]);
    assert!(markup
        .controls()
        .iter()
        .all(|c| c.kind == ControlKind::FilterToggle));
}

#[test]
fn rover_selector_lists_catalog() {
    let markup = rover_selector();
    let values: Vec<_> = markup.controls().iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, ["Curiosity", "Opportunity", "Spirit"]);
    assert!(markup
        .html()
        .contains(r#"<img src="./assets/images/mars-rover-spirit.jpeg" alt="Spirit mars rover">"#));
}

#[test]
fn root_view_omits_info_section_without_data() {
    let markup = root_view(&AppState::initial());
    assert!(markup.html().starts_with("<header><h1>Mars Rovers Dashboard</h1></header>"));
    assert!(!markup.html().contains("rover-data"));
    assert_eq!(markup.controls().len(), 9);
}

#[test]
fn root_view_omits_empty_info_section() {
    let infos = vec![
        InfoFilter::new("name", "Name", false),
        InfoFilter::new("photos", "Most recent photos", false),
    ];
    let state = AppState::new(infos)
        .expect("state")
        .merge(StatePatch::data(sample_manifest()));
    assert!(!root_view(&state).html().contains("rover-data"));
}

#[test]
fn root_view_is_deterministic() {
    let state = AppState::initial()
        .merge(StatePatch::data(sample_manifest()).with_photos(vec![Photo::new("a.jpg")]));
    assert_eq!(root_view(&state), root_view(&state));
    assert!(root_view(&state).html().contains(r#"<section class="rover-data">"#));
}

#[test]
fn text_and_attributes_are_escaped() {
    let manifest = RoverManifest::new("<b>Rover & co</b>", "", "", "", "");
    let html = derived_info_cards(&[InfoFilter::new("name", "Name", true)], &manifest);
    assert!(html
        .html()
        .contains("<div>&lt;b&gt;Rover &amp; co&lt;/b&gt;</div>"));

    let button = filter_button(&InfoFilter::new("quote", r#"Say "hi""#, false));
    assert!(button
        .html()
        .contains(r#"value="Say &quot;hi&quot;">Say &quot;hi&quot;</button>"#));
    assert_eq!(button.controls()[0].value, r#"Say "hi""#);

    let photos = vec![Photo::new(r#"x.jpg" onerror="alert(1)"#)];
    let gallery = photo_gallery(&sample_infos(true), Some(&photos));
    assert!(!gallery.html().contains(r#"" onerror=""#));
}

#[test]
fn root_view_keeps_controls_when_info_section_is_present() {
    let state = AppState::initial().merge(StatePatch::data(sample_manifest()));
    let markup = root_view(&state);
    assert!(markup.html().ends_with("</section>"));
    assert_eq!(markup.controls().len(), 9);
    assert_eq!(markup.controls()[0].value, "Launch Date");
    assert_eq!(markup.controls()[8].value, "Spirit");
}
