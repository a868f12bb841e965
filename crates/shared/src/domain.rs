use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Restaurant,
    Pharmacy,
    Supermarket,
    Cafe,
    Bar,
    Attraction,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Restaurant,
        Category::Pharmacy,
        Category::Supermarket,
        Category::Cafe,
        Category::Bar,
        Category::Attraction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Pharmacy => "pharmacy",
            Category::Supermarket => "supermarket",
            Category::Cafe => "cafe",
            Category::Bar => "bar",
            Category::Attraction => "attraction",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown place category '{0}'")]
pub struct UnknownCategory(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub category: Category,
    pub address: String,
    pub rating: f64,
    pub image_url: String,
    pub featured: bool,
}

/// Category selection for the places grid. Parsing never fails: text that is
/// neither `all` nor a category becomes [`Filter::Unrecognized`], which
/// matches no place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Filter {
    #[default]
    All,
    Category(Category),
    Unrecognized(String),
}

impl Filter {
    pub fn matches(&self, place: &Place) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(category) => place.category == *category,
            Filter::Unrecognized(_) => false,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Filter::All => "all",
            Filter::Category(category) => category.as_str(),
            Filter::Unrecognized(raw) => raw,
        }
    }

    /// `All` followed by every category, in button order.
    pub fn choices() -> impl Iterator<Item = Filter> {
        std::iter::once(Filter::All).chain(Category::ALL.into_iter().map(Filter::Category))
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        if value == "all" {
            return Filter::All;
        }
        match value.parse::<Category>() {
            Ok(category) => Filter::Category(category),
            Err(_) => Filter::Unrecognized(value.to_string()),
        }
    }
}

impl From<String> for Filter {
    fn from(value: String) -> Self {
        Filter::from(value.as_str())
    }
}

impl From<Filter> for String {
    fn from(value: Filter) -> Self {
        value.as_str().to_string()
    }
}

impl From<Category> for Filter {
    fn from(value: Category) -> Self {
        Filter::Category(value)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub address: String,
    pub phone: String,
    pub check_in: String,
    pub check_out: String,
    pub wifi_network: String,
    pub wifi_password: String,
}

impl PropertyInfo {
    pub fn schedule_line(&self) -> String {
        format!("Check-in: {} - Check-out: {}", self.check_in, self.check_out)
    }

    pub fn wifi_line(&self) -> String {
        format!("WiFi: {} / Pass: {}", self.wifi_network, self.wifi_password)
    }
}

impl Default for PropertyInfo {
    fn default() -> Self {
        Self {
            address: "Travessa da Trindade 18".into(),
            phone: "+351 123 456 789".into(),
            check_in: "15:00".into(),
            check_out: "11:00".into(),
            wifi_network: "AlojamientoLocal_Guest".into(),
            wifi_password: "welcome2023".into(),
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
