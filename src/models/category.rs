use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Land-cover category a pixel can be assigned to.
///
/// Declaration order is the classification priority order: when rules or
/// reference distances tie, the earlier variant wins (dark > mid > low >
/// forest). `Ord` therefore sorts by priority as well.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Dark purple overlay: highest conservation value.
    DarkHighValue,
    /// Mid purple overlay: documented conservation value.
    MidValue,
    /// Pink overlay: potential continuity forest.
    LowPotential,
    /// Green base layer: plain forest.
    ForestBackground,
}

impl Category {
    /// All categories in classification priority order.
    pub const PRIORITY: [Category; 4] = [
        Category::DarkHighValue,
        Category::MidValue,
        Category::LowPotential,
        Category::ForestBackground,
    ];

    /// Position in [`Self::PRIORITY`]; used to index count arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Category::DarkHighValue => 0,
            Category::MidValue => 1,
            Category::LowPotential => 2,
            Category::ForestBackground => 3,
        }
    }

    /// Fixed RGB the category is recolored to in the report image.
    pub fn legend_color(self) -> [u8; 3] {
        match self {
            Category::DarkHighValue => [84, 23, 111],
            Category::MidValue => [167, 47, 163],
            Category::LowPotential => [222, 77, 131],
            Category::ForestBackground => [34, 139, 34],
        }
    }

    /// Default reference color for the nearest-reference ruleset,
    /// sampled from washed-out captures of the source map service.
    pub fn default_reference(self) -> [u8; 3] {
        match self {
            Category::DarkHighValue => [58, 51, 58],
            Category::MidValue => [73, 55, 67],
            Category::LowPotential => [85, 62, 62],
            Category::ForestBackground => [82, 93, 72],
        }
    }

    /// Swedish label used in the report table and console output.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::DarkHighValue => "Mörklila (Höga naturvärden)",
            Category::MidValue => "Mellanlila (Naturvärde)",
            Category::LowPotential => "Rosa (Potentiell kontinuitet)",
            Category::ForestBackground => "Grön (Skogsmark)",
        }
    }

    /// Parse the snake_case key used in API payloads and query strings.
    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "dark_high_value" => Some(Category::DarkHighValue),
            "mid_value" => Some(Category::MidValue),
            "low_potential" => Some(Category::LowPotential),
            "forest_background" => Some(Category::ForestBackground),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Category::DarkHighValue => "dark_high_value",
            Category::MidValue => "mid_value",
            Category::LowPotential => "low_potential",
            Category::ForestBackground => "forest_background",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
