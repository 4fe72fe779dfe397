//! Menu items and categories

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A dish or drink on the menu
///
/// Field names on the wire follow the site's content files (`nombre`,
/// `precio`, ...). Optional fields are omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "descripcion")]
    pub description: String,
    /// URL fragment for the item's detail page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    /// Main picture path
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Additional picture paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, price: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            description: description.into(),
            slug: None,
            emoji: None,
            image: None,
            gallery: None,
        }
    }

    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    #[must_use]
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Number of pictures: the main image plus the gallery
    pub fn picture_count(&self) -> usize {
        usize::from(self.image.is_some()) + self.gallery.as_ref().map_or(0, Vec::len)
    }

    /// Name prefixed with the emoji, when there is one
    pub fn label(&self) -> String {
        match &self.emoji {
            Some(emoji) => format!("{emoji} {}", self.name),
            None => self.name.clone(),
        }
    }
}

/// The four menu sections, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "entradas")]
    Starters,
    #[serde(rename = "principales")]
    Mains,
    #[serde(rename = "bebidas")]
    Drinks,
    #[serde(rename = "postres")]
    Desserts,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Starters, Self::Mains, Self::Drinks, Self::Desserts];

    /// Key of the section in menu files
    pub const fn key(self) -> &'static str {
        match self {
            Self::Starters => "entradas",
            Self::Mains => "principales",
            Self::Drinks => "bebidas",
            Self::Desserts => "postres",
        }
    }

    /// English section title
    pub const fn title(self) -> &'static str {
        match self {
            Self::Starters => "Starters",
            Self::Mains => "Mains",
            Self::Drinks => "Drinks",
            Self::Desserts => "Desserts",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the file key or the English title, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.key() == wanted || c.title().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| {
                format!("unknown category '{s}' (expected entradas, principales, bebidas or postres)")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_wire_names() {
        let item = MenuItem::new("Tacos al pastor", 95.0, "Tres tacos con piña")
            .with_slug("tacos-al-pastor")
            .with_image("/img/pastor.jpg");
        let json = serde_json::to_value(&item).expect("serializable");

        assert_eq!(json["nombre"], "Tacos al pastor");
        assert_eq!(json["precio"], 95.0);
        assert_eq!(json["descripcion"], "Tres tacos con piña");
        assert_eq!(json["imagen"], "/img/pastor.jpg");
        assert!(json.get("emoji").is_none());
        assert!(json.get("gallery").is_none());
    }

    #[test]
    fn test_optional_fields_default() {
        let item: MenuItem =
            serde_json::from_str(r#"{"nombre":"Agua de jamaica","precio":35,"descripcion":""}"#)
                .expect("minimal item");
        assert_eq!(item.slug, None);
        assert_eq!(item.picture_count(), 0);
        assert_eq!(item.label(), "Agua de jamaica");
    }

    #[test]
    fn test_picture_count_and_label() {
        let mut item = MenuItem::new("Flan", 60.0, "Flan napolitano").with_emoji("🍮");
        item.image = Some("/img/flan.jpg".into());
        item.gallery = Some(vec!["/img/flan-2.jpg".into(), "/img/flan-3.jpg".into()]);
        assert_eq!(item.picture_count(), 3);
        assert_eq!(item.label(), "🍮 Flan");
    }

    #[test_case("entradas", Category::Starters)]
    #[test_case("Principales", Category::Mains)]
    #[test_case("drinks", Category::Drinks)]
    #[test_case(" DESSERTS ", Category::Desserts)]
    fn test_category_from_str(input: &str, expected: Category) {
        assert_eq!(input.parse::<Category>(), Ok(expected));
    }

    #[test]
    fn test_unknown_category() {
        assert!("sopas".parse::<Category>().is_err());
    }
}
