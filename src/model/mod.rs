//! Data model shared by the loader and the allocation core
//!
//! - `stock`: the recipe stock pool with per-category index sets
//! - `orders`: the three-axis order table and its typed axes

pub mod orders;
pub mod stock;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AllocatorError, ErrorCode};

/// Box type attached to both recipes and order cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetarian,
    Gourmet,
}

impl Category {
    /// Categories in the order the fulfillment cascade evaluates them
    pub const PRIORITY: [Category; 2] = [Category::Vegetarian, Category::Gourmet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetarian => "vegetarian",
            Category::Gourmet => "gourmet",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AllocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vegetarian" => Ok(Category::Vegetarian),
            "gourmet" => Ok(Category::Gourmet),
            other => Err(AllocatorError::input_with_code(
                ErrorCode::VALIDATION_UNKNOWN_BOX_TYPE,
                format!("unknown box type '{other}' (expected 'vegetarian' or 'gourmet')"),
                Some("box_type".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_through_str() {
        for category in Category::PRIORITY {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = "vegan".parse::<Category>().unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_UNKNOWN_BOX_TYPE);
        assert!(err.to_string().contains("vegan"));
    }

    #[test]
    fn test_vegetarian_has_priority() {
        assert_eq!(Category::PRIORITY[0], Category::Vegetarian);
        assert_eq!(
            serde_json::to_string(&Category::Gourmet).unwrap(),
            "\"gourmet\""
        );
    }
}
