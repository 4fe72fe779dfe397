//! The full menu and its loaders

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{MenuError, Result};
use crate::item::{Category, MenuItem};
use crate::validate::{ValidationIssue, validate};

/// Menu items grouped by section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuData {
    #[serde(rename = "entradas")]
    pub starters: Vec<MenuItem>,
    #[serde(rename = "principales")]
    pub mains: Vec<MenuItem>,
    #[serde(rename = "bebidas")]
    pub drinks: Vec<MenuItem>,
    #[serde(rename = "postres")]
    pub desserts: Vec<MenuItem>,
}

impl MenuData {
    /// Parse a JSON menu
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parse a YAML menu
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(input)?)
    }

    /// Load a menu file, picking the parser from its extension
    ///
    /// Validation issues are logged but do not fail the load; use
    /// [`load_strict`](Self::load_strict) to reject them.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let menu = Self::read(path)?;
        let issues = menu.validate();
        if !issues.is_empty() {
            warn!("{} has {} validation issue(s)", path.display(), issues.len());
        }
        Ok(menu)
    }

    /// Load a menu file and fail if any validation issue is found
    pub fn load_strict<P: AsRef<Path>>(path: P) -> Result<Self> {
        let menu = Self::read(path.as_ref())?;
        let issues = menu.validate();
        if issues.is_empty() {
            Ok(menu)
        } else {
            Err(MenuError::Invalid(issues))
        }
    }

    /// Read and parse without validating
    fn read(path: &Path) -> Result<Self> {
        let input = fs::read_to_string(path)?;
        let menu = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&input)?,
            Some("yaml" | "yml") => Self::from_yaml_str(&input)?,
            other => {
                return Err(MenuError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ));
            }
        };
        debug!("Loaded {} menu items from {}", menu.item_count(), path.display());
        Ok(menu)
    }

    /// Serialize back to pretty JSON with the site's field names
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Items of one section
    pub fn items(&self, category: Category) -> &[MenuItem] {
        match category {
            Category::Starters => &self.starters,
            Category::Mains => &self.mains,
            Category::Drinks => &self.drinks,
            Category::Desserts => &self.desserts,
        }
    }

    pub fn items_mut(&mut self, category: Category) -> &mut Vec<MenuItem> {
        match category {
            Category::Starters => &mut self.starters,
            Category::Mains => &mut self.mains,
            Category::Drinks => &mut self.drinks,
            Category::Desserts => &mut self.desserts,
        }
    }

    /// Every item with its section, in page order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &MenuItem)> {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.items(category).iter().map(move |item| (category, item)))
    }

    /// First item whose slug matches
    pub fn find_by_slug(&self, slug: &str) -> Option<(Category, &MenuItem)> {
        self.iter()
            .find(|(_, item)| item.slug.as_deref() == Some(slug))
    }

    pub fn item_count(&self) -> usize {
        Category::ALL.iter().map(|&c| self.items(c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Lowest and highest finite price across the menu
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.iter()
            .map(|(_, item)| item.price)
            .filter(|price| price.is_finite())
            .fold(None, |range, price| match range {
                None => Some((price, price)),
                Some((low, high)) => Some((low.min(price), high.max(price))),
            })
    }

    /// Every problem found in the menu, in page order
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate(self)
    }
}
