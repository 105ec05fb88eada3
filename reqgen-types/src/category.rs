//! The closed set of request categories.
//!
//! Every request carries a subset of six fixed category labels, `"0"`
//! through `"5"`. The benchmark server matches requests against its data
//! based on these labels, so the set is part of the wire contract and is
//! not configurable.

use std::fmt;
use std::str::FromStr;

/// A single request category, one of the six labels `"0"`..`"5"`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(u8);

impl Category {
    /// All categories, in label order.
    pub const ALL: [Category; 6] = [
        Category(0),
        Category(1),
        Category(2),
        Category(3),
        Category(4),
        Category(5),
    ];

    /// Creates a category from its numeric label.
    pub fn new(label: u8) -> Result<Self, CategoryError> {
        if usize::from(label) < Self::ALL.len() {
            Ok(Self(label))
        } else {
            Err(CategoryError(label.to_string()))
        }
    }

    /// The numeric value of this category's label.
    pub fn as_u8(self) -> u8 {
        self.0
    }
}

/// The error returned when a label is not one of `"0"`..`"5"`.
#[derive(Debug, thiserror::Error)]
#[error("invalid category label {0:?}, expected \"0\" through \"5\"")]
pub struct CategoryError(String);

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category({})", self.0)
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The wire form is exactly one digit, so "03" or " 3" are rejected.
        match s.as_bytes() {
            [label @ b'0'..=b'5'] => Ok(Category(label - b'0')),
            _ => Err(CategoryError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_label_order() {
        let labels: Vec<_> = Category::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(labels, ["0", "1", "2", "3", "4", "5"]);
    }

    #[test]
    fn new_accepts_valid_labels() {
        for label in 0..6 {
            assert_eq!(Category::new(label).unwrap().as_u8(), label);
        }
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(Category::new(6).is_err());
        assert!(Category::new(255).is_err());
    }

    #[test]
    fn parse_valid_label() {
        let category: Category = "3".parse().unwrap();
        assert_eq!(category, Category::ALL[3]);
    }

    #[test]
    fn parse_rejects_non_labels() {
        assert!("6".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
        assert!("03".parse::<Category>().is_err());
        assert!(" 3".parse::<Category>().is_err());
        assert!("a".parse::<Category>().is_err());
    }

    #[test]
    fn display_round_trips_with_parse() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Category::ALL[4]), "Category(4)");
    }
}
