//! Menu file command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use kalaa_menu::{Category, MenuData, MenuItem};

use crate::utils::{add_table_row, create_table, format_price};

#[derive(Subcommand)]
pub enum MenuCommands {
    /// Display a summary of a menu file
    Info {
        /// Path to the menu file (JSON or YAML)
        file: PathBuf,
    },

    /// Validate a menu file
    Validate {
        /// Path to the menu file (JSON or YAML)
        file: PathBuf,

        /// Treat warnings (missing slug or description) as errors
        #[arg(short, long)]
        strict: bool,
    },

    /// List menu items
    Show {
        /// Path to the menu file (JSON or YAML)
        file: PathBuf,

        /// Only show one section (e.g. entradas, mains)
        #[arg(short, long)]
        category: Option<Category>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: ShowFormat,
    },

    /// Look up an item by slug
    Find {
        /// Path to the menu file (JSON or YAML)
        file: PathBuf,

        /// Item slug
        slug: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    Table,
    Json,
    Yaml,
}

pub fn execute(command: MenuCommands) -> Result<()> {
    match command {
        MenuCommands::Info { file } => show_info(&file),
        MenuCommands::Validate { file, strict } => validate_menu(&file, strict),
        MenuCommands::Show {
            file,
            category,
            format,
        } => show_items(&file, category, format),
        MenuCommands::Find { file, slug } => find_item(&file, &slug),
    }
}

fn load(file: &Path) -> Result<MenuData> {
    MenuData::load(file).with_context(|| format!("Failed to load menu {}", file.display()))
}

fn show_info(file: &Path) -> Result<()> {
    let menu = load(file)?;

    println!("Menu File Information: {}", file.display());
    println!("=====================================");

    let mut table = create_table(&["Section", "Key", "Items", "With slug", "With pictures"]);
    for category in Category::ALL {
        let items = menu.items(category);
        add_table_row(
            &mut table,
            vec![
                category.title().to_string(),
                category.key().to_string(),
                items.len().to_string(),
                items.iter().filter(|i| i.slug.is_some()).count().to_string(),
                items
                    .iter()
                    .filter(|i| i.picture_count() > 0)
                    .count()
                    .to_string(),
            ],
        );
    }
    table.printstd();

    println!();
    println!("Total items: {}", menu.item_count());
    match menu.price_range() {
        Some((low, high)) => println!("Price range: {} - {}", format_price(low), format_price(high)),
        None => println!("Price range: N/A"),
    }
    Ok(())
}

/// Soft problems that only fail a strict validation
fn warnings(menu: &MenuData) -> Vec<String> {
    menu.iter()
        .flat_map(|(category, item)| {
            let mut found = Vec::new();
            if item.slug.is_none() {
                found.push(format!("{category} '{}': no slug, no detail page", item.name));
            }
            if item.description.trim().is_empty() {
                found.push(format!("{category} '{}': empty description", item.name));
            }
            found
        })
        .collect()
}

fn validate_menu(file: &Path, strict: bool) -> Result<()> {
    println!("Validating menu file: {}", file.display());

    let menu = match MenuData::load(file) {
        Ok(menu) => menu,
        Err(e) => {
            println!("✗ Failed to load menu file: {e}");
            return Err(e.into());
        }
    };

    let errors: Vec<String> = menu.validate().iter().map(ToString::to_string).collect();
    let warnings = warnings(&menu);

    if errors.is_empty() && warnings.is_empty() {
        println!("✓ Menu is valid ({} items)", menu.item_count());
        return Ok(());
    }

    if !errors.is_empty() {
        println!("\nErrors:");
        for error in &errors {
            println!("  ✗ {error}");
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &warnings {
            println!("  ⚠ {warning}");
        }
    }

    let failures = errors.len() + if strict { warnings.len() } else { 0 };
    if failures == 0 {
        println!("\n✓ Menu is valid with warnings");
        Ok(())
    } else {
        anyhow::bail!("Menu validation failed with {failures} error(s)")
    }
}

fn show_items(file: &Path, category: Option<Category>, format: ShowFormat) -> Result<()> {
    let menu = load(file)?;
    let selected = match category {
        Some(category) => {
            let mut only = MenuData::default();
            only.items_mut(category).extend_from_slice(menu.items(category));
            only
        }
        None => menu,
    };

    match format {
        ShowFormat::Json => println!("{}", selected.to_json_string()?),
        ShowFormat::Yaml => println!("{}", selected.to_yaml_string()?.trim_end()),
        ShowFormat::Table => {
            let mut table = create_table(&["Section", "Item", "Price", "Slug"]);
            for (category, item) in selected.iter() {
                add_table_row(
                    &mut table,
                    vec![
                        category.title().to_string(),
                        item.label(),
                        format_price(item.price),
                        item.slug.clone().unwrap_or_default(),
                    ],
                );
            }
            table.printstd();
        }
    }
    Ok(())
}

fn find_item(file: &Path, slug: &str) -> Result<()> {
    let menu = load(file)?;
    let Some((category, item)) = menu.find_by_slug(slug) else {
        anyhow::bail!("No item with slug '{slug}' in {}", file.display());
    };
    print_item(category, item);
    Ok(())
}

fn print_item(category: Category, item: &MenuItem) {
    println!("{}", item.label());
    println!("  Section: {} ({})", category.title(), category.key());
    println!("  Price: {}", format_price(item.price));
    if !item.description.is_empty() {
        println!("  Description: {}", item.description);
    }
    if let Some(image) = &item.image {
        println!("  Image: {image}");
    }
    for picture in item.gallery.iter().flatten() {
        println!("  Gallery: {picture}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings() {
        let menu = MenuData {
            drinks: vec![
                MenuItem::new("Horchata", 35.0, "").with_slug("horchata"),
                MenuItem::new("Café de olla", 40.0, "Con canela"),
            ],
            ..Default::default()
        };
        assert_eq!(
            warnings(&menu),
            vec![
                "bebidas 'Horchata': empty description".to_string(),
                "bebidas 'Café de olla': no slug, no detail page".to_string(),
            ]
        );
    }
}
