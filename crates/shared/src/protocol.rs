use serde::{Deserialize, Serialize};

use crate::domain::{Filter, Place};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderPhase {
    #[default]
    Loading,
    Ready,
}

/// JSON shape of the places grid as served by `/api/places`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesView {
    pub phase: RenderPhase,
    pub is_loading: bool,
    pub active_filter: Filter,
    pub places: Vec<PlaceCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceCard {
    #[serde(flatten)]
    pub place: Place,
    pub maps_url: String,
}
