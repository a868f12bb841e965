use std::time::Duration;

use async_trait::async_trait;
use shared::{
    domain::{Category, Place},
    error::SourceError,
};
use tracing::debug;

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

/// Supplier of the nearby places list. Implementations return the whole data
/// set or an error, never a partial list.
#[async_trait]
pub trait PlaceSource: Send + Sync {
    async fn fetch_places(&self) -> Result<Vec<Place>, SourceError>;
}

/// Hard-coded places around the property, served after a fixed delay that
/// stands in for a network round trip.
#[derive(Debug, Clone)]
pub struct StaticPlaceSource {
    latency: Duration,
}

impl StaticPlaceSource {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for StaticPlaceSource {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

#[async_trait]
impl PlaceSource for StaticPlaceSource {
    async fn fetch_places(&self) -> Result<Vec<Place>, SourceError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let places = reference_places();
        debug!(
            count = places.len(),
            latency_ms = self.latency.as_millis() as u64,
            "served static places"
        );
        Ok(places)
    }
}

fn place(
    name: &str,
    category: Category,
    address: &str,
    rating: f64,
    image_url: &str,
    featured: bool,
) -> Place {
    Place {
        name: name.to_string(),
        category,
        address: address.to_string(),
        rating,
        image_url: image_url.to_string(),
        featured,
    }
}

/// The six reference places, one per category, in display order.
pub fn reference_places() -> Vec<Place> {
    vec![
        place(
            "Restaurante A Brasileira",
            Category::Restaurant,
            "Rua Garrett 120",
            4.5,
            "https://images.unsplash.com/photo-1555396273-367ea4eb4db5?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            true,
        ),
        place(
            "Farmácia Estácio",
            Category::Pharmacy,
            "Rua da Misericórdia 14",
            4.2,
            "https://images.unsplash.com/photo-1585435557343-3b092031a831?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            true,
        ),
        place(
            "Mercado da Baixa",
            Category::Supermarket,
            "Rua da Prata 52",
            4.0,
            "https://images.unsplash.com/photo-1578916171728-46686eac8d58?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            false,
        ),
        place(
            "Café Nicola",
            Category::Cafe,
            "Praça Dom Pedro IV 24",
            4.7,
            "https://images.unsplash.com/photo-1501339847302-ac426a4a7cbb?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            true,
        ),
        place(
            "Ginjinha Sem Rival",
            Category::Bar,
            "Rua das Portas de Santo Antão 7",
            4.3,
            "https://images.unsplash.com/photo-1514933651103-005eec06c04b?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            false,
        ),
        place(
            "Elevador de Santa Justa",
            Category::Attraction,
            "Rua do Ouro",
            4.8,
            "https://images.unsplash.com/photo-1507676184212-d03ab07a01bf?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            true,
        ),
    ]
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
