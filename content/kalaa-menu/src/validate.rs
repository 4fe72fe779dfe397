//! Menu validation
//!
//! Validation never stops at the first problem: every issue is reported with
//! the section and position of the offending item.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::item::{Category, MenuItem};
use crate::menu::MenuData;

/// What is wrong with an item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// Name is empty or whitespace
    EmptyName,
    /// Price is negative, NaN or infinite
    InvalidPrice { price: f64 },
    /// Slug is not lowercase words joined by single hyphens
    MalformedSlug { slug: String },
    /// Slug already used by an earlier item
    DuplicateSlug {
        slug: String,
        first: Category,
        first_index: usize,
    },
    /// Image or gallery entry is an empty path
    EmptyPicturePath,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => f.write_str("name is empty"),
            Self::InvalidPrice { price } => write!(f, "invalid price {price}"),
            Self::MalformedSlug { slug } => write!(f, "malformed slug '{slug}'"),
            Self::DuplicateSlug {
                slug,
                first,
                first_index,
            } => write!(f, "slug '{slug}' already used by {first}[{first_index}]"),
            Self::EmptyPicturePath => f.write_str("empty picture path"),
        }
    }
}

/// One problem found in a menu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub category: Category,
    /// Position of the item within its section
    pub index: usize,
    /// Item name as written, for messages
    pub item: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] '{}': {}",
            self.category, self.index, self.item, self.kind
        )
    }
}

/// Whether `slug` is lowercase ASCII words joined by single hyphens
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .split('-')
            .all(|word| !word.is_empty() && word.bytes().all(is_slug_byte))
}

fn is_slug_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit()
}

/// Check every item of `menu`
pub fn validate(menu: &MenuData) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen: HashMap<&str, (Category, usize)> = HashMap::new();

    for category in Category::ALL {
        for (index, item) in menu.items(category).iter().enumerate() {
            let mut report = |kind| {
                issues.push(ValidationIssue {
                    category,
                    index,
                    item: item.name.clone(),
                    kind,
                });
            };

            for kind in item_issues(item) {
                report(kind);
            }

            if let Some(slug) = item.slug.as_deref() {
                if let Some(&(first, first_index)) = seen.get(slug) {
                    report(IssueKind::DuplicateSlug {
                        slug: slug.to_string(),
                        first,
                        first_index,
                    });
                } else {
                    seen.insert(slug, (category, index));
                }
            }
        }
    }

    issues
}

/// Issues that depend on the item alone
fn item_issues(item: &MenuItem) -> Vec<IssueKind> {
    let mut kinds = Vec::new();
    if item.name.trim().is_empty() {
        kinds.push(IssueKind::EmptyName);
    }
    if !item.price.is_finite() || item.price < 0.0 {
        kinds.push(IssueKind::InvalidPrice { price: item.price });
    }
    if let Some(slug) = &item.slug {
        if !is_valid_slug(slug) {
            kinds.push(IssueKind::MalformedSlug { slug: slug.clone() });
        }
    }
    let mut pictures = item.image.iter().chain(item.gallery.iter().flatten());
    if pictures.any(|path| path.trim().is_empty()) {
        kinds.push(IssueKind::EmptyPicturePath);
    }
    kinds
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("tacos-al-pastor", true)]
    #[test_case("mole2", true)]
    #[test_case("", false ; "empty")]
    #[test_case("Tacos", false ; "uppercase")]
    #[test_case("tacos--dobles", false ; "double hyphen")]
    #[test_case("-tacos", false ; "leading hyphen")]
    #[test_case("tacos_al_pastor", false ; "underscore")]
    #[test_case("piña", false ; "non ascii")]
    fn test_slug_rules(slug: &str, valid: bool) {
        assert_eq!(is_valid_slug(slug), valid);
    }

    #[test]
    fn test_clean_menu_has_no_issues() {
        let menu = MenuData {
            starters: vec![MenuItem::new("Guacamole", 85.0, "").with_slug("guacamole")],
            desserts: vec![MenuItem::new("Flan", 0.0, "Cortesía")],
            ..Default::default()
        };
        assert!(validate(&menu).is_empty());
    }

    #[test]
    fn test_reports_every_issue() {
        let mut broken = MenuItem::new("  ", -5.0, "").with_slug("Bad Slug");
        broken.gallery = Some(vec![String::new()]);
        let menu = MenuData {
            mains: vec![
                MenuItem::new("Mole", 180.0, "").with_slug("mole"),
                broken,
            ],
            drinks: vec![MenuItem::new("Mole de olla", f64::INFINITY, "").with_slug("mole")],
            ..Default::default()
        };

        let kinds: Vec<IssueKind> = validate(&menu).into_iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::EmptyName,
                IssueKind::InvalidPrice { price: -5.0 },
                IssueKind::MalformedSlug {
                    slug: "Bad Slug".into()
                },
                IssueKind::EmptyPicturePath,
                IssueKind::InvalidPrice {
                    price: f64::INFINITY
                },
                IssueKind::DuplicateSlug {
                    slug: "mole".into(),
                    first: Category::Mains,
                    first_index: 0,
                },
            ]
        );
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue {
            category: Category::Drinks,
            index: 2,
            item: "Horchata".into(),
            kind: IssueKind::InvalidPrice { price: -1.0 },
        };
        assert_eq!(issue.to_string(), "bebidas[2] 'Horchata': invalid price -1");
    }
}
