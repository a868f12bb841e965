//! Presentation lookups shared by the page renderer and the CLI.

use url::Url;

use crate::domain::{Category, Filter, Place};

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDisplay {
    pub icon: &'static str,
    pub label: &'static str,
}

pub fn category_display(category: Category) -> CategoryDisplay {
    match category {
        Category::Restaurant => CategoryDisplay {
            icon: "🍴",
            label: "Restaurants",
        },
        Category::Pharmacy => CategoryDisplay {
            icon: "💊",
            label: "Pharmacys",
        },
        Category::Supermarket => CategoryDisplay {
            icon: "🛒",
            label: "Supermarkets",
        },
        Category::Cafe => CategoryDisplay {
            icon: "☕",
            label: "Cafes",
        },
        Category::Bar => CategoryDisplay {
            icon: "🍺",
            label: "Bars",
        },
        Category::Attraction => CategoryDisplay {
            icon: "🏛️",
            label: "Attractions",
        },
    }
}

/// Display descriptor for a filter button. Unrecognized filters have no
/// button and fall back to their raw text.
pub fn filter_display(filter: &Filter) -> Option<CategoryDisplay> {
    match filter {
        Filter::All => Some(CategoryDisplay {
            icon: "🏙️",
            label: "Alls",
        }),
        Filter::Category(category) => Some(category_display(*category)),
        Filter::Unrecognized(_) => None,
    }
}

/// External map search keyed by `"<name> <address>"`.
pub fn maps_search_url(place: &Place) -> String {
    let query = format!("{} {}", place.name, place.address);
    match Url::parse_with_params(MAPS_SEARCH_URL, &[("api", "1"), ("query", query.as_str())]) {
        Ok(url) => url.into(),
        Err(_) => MAPS_SEARCH_URL.to_string(),
    }
}
