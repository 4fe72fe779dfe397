//! Menu data contract for the Kalaa site.
//!
//! The site's menu lives in a content file with four sections (`entradas`,
//! `principales`, `bebidas`, `postres`). This crate gives it a typed model,
//! loads it from JSON or YAML and checks it before publishing.
//!
//! # Examples
//!
//! ```rust
//! use kalaa_menu::{Category, MenuData};
//!
//! let menu = MenuData::from_json_str(r#"{
//!     "entradas": [{ "nombre": "Guacamole", "precio": 85, "descripcion": "Con totopos", "slug": "guacamole" }],
//!     "principales": [],
//!     "bebidas": [],
//!     "postres": []
//! }"#)?;
//!
//! let (category, item) = menu.find_by_slug("guacamole").unwrap();
//! assert_eq!(category, Category::Starters);
//! assert_eq!(item.price, 85.0);
//! assert!(menu.validate().is_empty());
//! # Ok::<(), kalaa_menu::MenuError>(())
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod item;
pub mod menu;
pub mod validate;

pub use error::{MenuError, Result};
pub use item::{Category, MenuItem};
pub use menu::MenuData;
pub use validate::{IssueKind, ValidationIssue, is_valid_slug};
