//! Product category model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category tag
///
/// One sub-order is created per category present in a submission.
/// The wire tag is stored in the `orders.category` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cleaning,
    PlasticPe,
    PlasticPet,
    PlasticPp,
    Sprayers,
    Chemicals,
    Fragrances,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Cleaning,
        Category::PlasticPe,
        Category::PlasticPet,
        Category::PlasticPp,
        Category::Sprayers,
        Category::Chemicals,
        Category::Fragrances,
    ];

    /// Stable wire tag (storage + callback payloads)
    pub fn tag(&self) -> &'static str {
        match self {
            Category::Cleaning => "cleaning",
            Category::PlasticPe => "plastic_pe",
            Category::PlasticPet => "plastic_pet",
            Category::PlasticPp => "plastic_pp",
            Category::Sprayers => "sprayers",
            Category::Chemicals => "chemicals",
            Category::Fragrances => "fragrances",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.tag() == tag)
    }

    /// Catalog display name (the catalog is presented in Russian)
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Cleaning => "Моющие средства",
            Category::PlasticPe => "Вдувные ПЭ",
            Category::PlasticPet => "ПЭТ",
            Category::PlasticPp => "ПП",
            Category::Sprayers => "Распылители & Дозаторы",
            Category::Chemicals => "Химикаты",
            Category::Fragrances => "Отдушки",
        }
    }

    /// Marker shown next to the category in chat messages
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Cleaning => "🧴",
            Category::PlasticPe => "🔵",
            Category::PlasticPet => "♻️",
            Category::PlasticPp => "🟣",
            Category::Sprayers => "💧",
            Category::Chemicals => "🧪",
            Category::Fragrances => "🌸",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
