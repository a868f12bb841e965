//! Plain view state for the nearby places grid.

use shared::{
    domain::{Filter, Place},
    error::SourceError,
    protocol::RenderPhase,
};

/// Loading flag, loaded places and active filter. Places are replaced
/// wholesale by the single load and never edited afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    places: Vec<Place>,
    active_filter: Filter,
    is_loading: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn active_filter(&self) -> &Filter {
        &self.active_filter
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn phase(&self) -> RenderPhase {
        if self.is_loading {
            RenderPhase::Loading
        } else {
            RenderPhase::Ready
        }
    }

    pub fn set_filter(&mut self, filter: impl Into<Filter>) {
        self.active_filter = filter.into();
    }

    /// Places matching the active filter, in load order.
    pub fn filtered_places(&self) -> Vec<&Place> {
        self.places
            .iter()
            .filter(|place| self.active_filter.matches(place))
            .collect()
    }

    pub(crate) fn begin_load(&mut self) {
        self.is_loading = true;
    }

    /// Settles the in-flight load. Returns `false` when no load was in flight,
    /// in which case the state is left untouched.
    pub(crate) fn finish_load(&mut self, result: Result<Vec<Place>, SourceError>) -> bool {
        if !self.is_loading {
            return false;
        }
        if let Ok(places) = result {
            self.places = places;
        }
        self.is_loading = false;
        true
    }
}
