//! HTML rendering of the guest page.
//!
//! The page is rebuilt on every request from a [`ViewState`] snapshot with the
//! askama templates under `templates/`. While the places load is in flight
//! only the spinner is rendered, and a meta refresh makes the browser poll
//! until the grid is ready.

use askama::Template;
use shared::{
    display::{filter_display, maps_search_url},
    domain::{Filter, Place, PropertyInfo},
    protocol::{PlaceCard, PlacesView, RenderPhase},
};
use url::form_urlencoded::byte_serialize;
use view_state::ViewState;

const LOADING_REFRESH_SECS: u32 = 1;

pub fn places_view(state: &ViewState) -> PlacesView {
    let places = match state.phase() {
        RenderPhase::Loading => Vec::new(),
        RenderPhase::Ready => state
            .filtered_places()
            .into_iter()
            .map(|place| PlaceCard {
                maps_url: maps_search_url(place),
                place: place.clone(),
            })
            .collect(),
    };

    PlacesView {
        phase: state.phase(),
        is_loading: state.is_loading(),
        active_filter: state.active_filter().clone(),
        places,
    }
}

#[derive(Debug, Clone)]
struct FilterButton {
    href: String,
    icon: &'static str,
    label: &'static str,
    active: bool,
}

#[derive(Debug, Clone)]
struct CardView<'a> {
    place: &'a Place,
    maps_url: String,
}

#[derive(Template)]
#[template(path = "guest_page.html")]
struct GuestPage<'a> {
    property: &'a PropertyInfo,
    loading: bool,
    refresh_secs: u32,
    refresh_url: String,
    buttons: Vec<FilterButton>,
    cards: Vec<CardView<'a>>,
}

pub fn render_page(property: &PropertyInfo, state: &ViewState) -> Result<String, askama::Error> {
    let active = state.active_filter();
    let buttons = Filter::choices()
        .filter_map(|filter| {
            let display = filter_display(&filter)?;
            Some(FilterButton {
                href: filter_href(&filter),
                icon: display.icon,
                label: display.label,
                active: &filter == active,
            })
        })
        .collect();

    let cards = match state.phase() {
        RenderPhase::Loading => Vec::new(),
        RenderPhase::Ready => state
            .filtered_places()
            .into_iter()
            .map(|place| CardView {
                place,
                maps_url: maps_search_url(place),
            })
            .collect(),
    };

    GuestPage {
        property,
        loading: state.phase() == RenderPhase::Loading,
        refresh_secs: LOADING_REFRESH_SECS,
        refresh_url: filter_href(active),
        buttons,
        cards,
    }
    .render()
}

fn filter_href(filter: &Filter) -> String {
    let value: String = byte_serialize(filter.as_str().as_bytes()).collect();
    format!("/?filter={value}")
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
