//! Pure view composers: every function here maps a state slice to a [`Markup`] fragment.

use maud::{html, Render};
use shared::{
    domain::{InfoFilter, RoverOption, PHOTOS_LABEL, ROVERS},
    protocol::{Photo, RoverManifest},
};

use crate::state::AppState;

/// Interactive element kinds the render cycle re-binds after every paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    FilterToggle,
    RoverSelector,
}

/// A clickable element inside a fragment, identified by its `value` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Control {
    pub kind: ControlKind,
    pub value: String,
}

/// Rendered HTML plus the controls it contains, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    html: String,
    controls: Vec<Control>,
}

impl Markup {
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    pub fn into_parts(self) -> (String, Vec<Control>) {
        (self.html, self.controls)
    }

    fn text(html: maud::Markup) -> Self {
        Self {
            html: html.into_string(),
            controls: Vec::new(),
        }
    }

    fn control(html: maud::Markup, kind: ControlKind, value: &str) -> Self {
        Self {
            html: html.into_string(),
            controls: vec![Control {
                kind,
                value: value.to_string(),
            }],
        }
    }

    /// Takes `html` as the fragment and the controls of every spliced child, in order.
    fn compose<'a>(html: maud::Markup, children: impl IntoIterator<Item = &'a Markup>) -> Self {
        Self {
            html: html.into_string(),
            controls: children
                .into_iter()
                .flat_map(|child| child.controls.iter().cloned())
                .collect(),
        }
    }
}

/// Child fragments are already escaped, so splicing one copies it verbatim.
impl Render for Markup {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&self.html);
    }
}

/// Title/value pair shown on one info card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoCard {
    pub title: String,
    pub value: String,
}

pub fn filter_button(info: &InfoFilter) -> Markup {
    Markup::control(
        html! {
            button.btn.selected[info.selected] type="button" value=(info.label) { (info.label) }
        },
        ControlKind::FilterToggle,
        &info.label,
    )
}

pub fn filter_controls(infos: &[InfoFilter]) -> Markup {
    let buttons: Vec<Markup> = infos.iter().map(filter_button).collect();
    Markup::compose(
        html! {
            section.info-buttons-section {
                h2 { "Select Filters" }
                div.buttons-list {
                    @for button in &buttons { (button) }
                }
            }
        },
        &buttons,
    )
}

pub fn rover_card(rover: &RoverOption) -> Markup {
    Markup::control(
        html! {
            button.rover-card type="button" value=(rover.name) {
                figure {
                    img src=(rover.image) alt=(format!("{} mars rover", rover.name));
                    figcaption { (rover.name) }
                }
            }
        },
        ControlKind::RoverSelector,
        rover.name,
    )
}

pub fn rover_selector() -> Markup {
    let cards: Vec<Markup> = ROVERS.iter().map(rover_card).collect();
    Markup::compose(
        html! {
            section.rover-card-section {
                h2 { "Rover Cards" }
                p { "Click on the cards to see the respective rover data" }
                div.rovers-list {
                    @for card in &cards { (card) }
                }
            }
        },
        &cards,
    )
}

/// Cards for the selected, non-gallery filters, in filter order.
pub fn derive_info_cards(infos: &[InfoFilter], manifest: &RoverManifest) -> Vec<InfoCard> {
    infos
        .iter()
        .filter(|info| info.selected && !info.is_photos())
        .map(|info| InfoCard {
            title: info.label.clone(),
            value: manifest.field(&info.key).unwrap_or_default(),
        })
        .collect()
}

pub fn info_card(card: &InfoCard) -> Markup {
    Markup::text(html! {
        div.info-card {
            h3 { (card.title) }
            div { (card.value) }
        }
    })
}

pub fn derived_info_cards(infos: &[InfoFilter], manifest: &RoverManifest) -> Markup {
    let cards = derive_info_cards(infos, manifest);
    if cards.is_empty() {
        return Markup::default();
    }
    Markup::text(html! {
        div.info-cards-list {
            @for card in &cards { (info_card(card)) }
        }
    })
}

pub fn photos_selected(infos: &[InfoFilter]) -> bool {
    infos
        .iter()
        .any(|info| info.selected && info.label == PHOTOS_LABEL)
}

pub fn photo_gallery(infos: &[InfoFilter], photos: Option<&[Photo]>) -> Markup {
    if !photos_selected(infos) {
        return Markup::default();
    }
    Markup::text(match photos {
        None => html! { div.loading { "Loading..." } },
        Some(photos) => html! {
            div.images-list {
                @for photo in photos {
                    img src=(photo.img_src) alt="Rover Photo";
                }
            }
        },
    })
}

pub fn info_section(cards: Markup, gallery: Markup) -> Markup {
    if cards.is_empty() && gallery.is_empty() {
        return Markup::default();
    }
    Markup::compose(
        html! {
            section.rover-data { (cards) (gallery) }
        },
        [&cards, &gallery],
    )
}

pub fn root_view(state: &AppState) -> Markup {
    let filters = filter_controls(state.infos());
    let rovers = rover_selector();
    let info = match state.data() {
        Some(manifest) => info_section(
            derived_info_cards(state.infos(), manifest),
            photo_gallery(state.infos(), state.photos()),
        ),
        None => Markup::default(),
    };

    Markup::compose(
        html! {
            header { h1 { "Mars Rovers Dashboard" } }
            (filters)
            (rovers)
            (info)
        },
        [&filters, &rovers, &info],
    )
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
