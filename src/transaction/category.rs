//! The fixed catalogue of transaction categories.

use crate::Error;

/// The key of the placeholder shown before the user picks a category.
pub const SENTINEL_CATEGORY_KEY: &str = "category";

/// The label of the placeholder shown before the user picks a category.
pub const SENTINEL_CATEGORY_NAME: &str = "Category";

/// A category a transaction can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// The identifier stored with each transaction.
    pub key: &'static str,
    /// The label shown to the user.
    pub name: &'static str,
}

const CATEGORIES: [Category; 6] = [
    Category {
        key: "purchases",
        name: "Purchases",
    },
    Category {
        key: "food",
        name: "Food",
    },
    Category {
        key: "salary",
        name: "Salary",
    },
    Category {
        key: "car",
        name: "Car",
    },
    Category {
        key: "leisure",
        name: "Leisure",
    },
    Category {
        key: "studies",
        name: "Studies",
    },
];

/// All categories the user can choose from, in display order.
pub fn available_categories() -> &'static [Category] {
    &CATEGORIES
}

/// Look up a category by its key.
pub fn find_category(key: &str) -> Option<Category> {
    CATEGORIES.iter().find(|category| category.key == key).copied()
}

/// The category currently picked in the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryChoice {
    /// Still showing the placeholder.
    #[default]
    Unselected,
    /// The user picked a category.
    Chosen(Category),
}

impl CategoryChoice {
    /// Resolve the category key submitted with the form.
    ///
    /// The sentinel key and an empty key both mean no category was picked.
    ///
    /// # Errors
    /// Returns [Error::InvalidCategory] if `key` is not in the catalogue.
    pub fn from_key(key: &str) -> Result<Self, Error> {
        let key = key.trim();

        if key.is_empty() || key == SENTINEL_CATEGORY_KEY {
            return Ok(Self::Unselected);
        }

        find_category(key)
            .map(Self::Chosen)
            .ok_or_else(|| Error::InvalidCategory(key.to_owned()))
    }

    /// The key to submit with the form for this choice.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Unselected => SENTINEL_CATEGORY_KEY,
            Self::Chosen(category) => category.key,
        }
    }

    /// The label to show for this choice.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unselected => SENTINEL_CATEGORY_NAME,
            Self::Chosen(category) => category.name,
        }
    }
}
