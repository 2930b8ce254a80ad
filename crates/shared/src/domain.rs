use serde::{Deserialize, Serialize};

/// Filter key whose facet is the photo gallery rather than an info card.
pub const PHOTOS_KEY: &str = "photos";

/// Label of the gallery filter; also the value carried by its toggle button.
pub const PHOTOS_LABEL: &str = "Most recent photos";

/// One togglable facet of rover information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoFilter {
    pub key: String,
    pub label: String,
    pub selected: bool,
}

impl InfoFilter {
    pub fn new(key: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            selected,
        }
    }

    pub fn toggled(&self) -> Self {
        Self {
            selected: !self.selected,
            ..self.clone()
        }
    }

    pub fn is_photos(&self) -> bool {
        self.key == PHOTOS_KEY
    }
}

/// Seeded filter list, in display order.
pub fn default_filters() -> Vec<InfoFilter> {
    vec![
        InfoFilter::new("launch_date", "Launch Date", true),
        InfoFilter::new("landing_date", "Landing Date", true),
        InfoFilter::new("max_date", "Date photos were taken", false),
        InfoFilter::new(PHOTOS_KEY, PHOTOS_LABEL, false),
        InfoFilter::new("status", "Status", false),
        InfoFilter::new("name", "Name", true),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoverOption {
    pub name: &'static str,
    pub image: &'static str,
}

impl RoverOption {
    /// Lookup key used against the data provider.
    pub fn slug(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

pub const ROVERS: [RoverOption; 3] = [
    RoverOption {
        name: "Curiosity",
        image: "./assets/images/mars-rover.jpeg",
    },
    RoverOption {
        name: "Opportunity",
        image: "./assets/images/mars-rover-opportunity.jpeg",
    },
    RoverOption {
        name: "Spirit",
        image: "./assets/images/mars-rover-spirit.jpeg",
    },
];

pub fn find_rover(name: &str) -> Option<&'static RoverOption> {
    ROVERS
        .iter()
        .find(|rover| rover.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_have_unique_keys_and_labels() {
        let filters = default_filters();
        for (i, a) in filters.iter().enumerate() {
            for b in &filters[i + 1..] {
                assert_ne!(a.key, b.key);
                assert_ne!(a.label, b.label);
            }
        }
        assert_eq!(filters.iter().filter(|f| f.selected).count(), 3);
    }

    #[test]
    fn rover_lookup_ignores_case() {
        assert_eq!(find_rover("curiosity").map(|r| r.name), Some("Curiosity"));
        assert_eq!(find_rover(" SPIRIT ").map(|r| r.name), Some("Spirit"));
        assert!(find_rover("sojourner").is_none());
    }
}
