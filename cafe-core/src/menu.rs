//! Menu catalog bundled with the storefront.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

const DEFAULT_MENU_DATA: &str = include_str!("../../cafe-web/static/assets/data/menu.json");

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("menu data is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("menu item id `{0}` appears more than once")]
    DuplicateItem(String),
    #[error("menu item `{0}` has no display name")]
    UnnamedItem(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    /// Whole rupees.
    pub price: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub categories: Vec<MenuCategory>,
}

impl Menu {
    /// # Errors
    ///
    /// Returns an error if the JSON does not parse, an item id repeats, or an
    /// item has a blank name.
    pub fn from_json(json: &str) -> Result<Self, MenuError> {
        let menu: Self = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        for item in menu.items() {
            if item.name.trim().is_empty() {
                return Err(MenuError::UnnamedItem(item.id.clone()));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(MenuError::DuplicateItem(item.id.clone()));
            }
        }
        Ok(menu)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_MENU_DATA).unwrap_or_else(|err| {
            log::error!("bundled menu rejected: {err}");
            Self::default()
        })
    }

    #[must_use]
    pub fn default_menu() -> &'static Self {
        static MENU: OnceLock<Menu> = OnceLock::new();
        MENU.get_or_init(Self::load_from_static)
    }

    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.categories.iter().flat_map(|category| category.items.iter())
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_menu_parses_and_has_staples() {
        let menu = Menu::from_json(DEFAULT_MENU_DATA).expect("bundled menu is valid");
        assert!(!menu.categories.is_empty());
        assert_eq!(menu.find("coffee").map(|i| i.price), Some(100));
        assert_eq!(menu.find("sandwich").map(|i| i.price), Some(150));
        assert!(menu.categories.iter().all(|c| !c.items.is_empty()));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"{"categories":[{"id":"a","name":"A","items":[
            {"id":"x","name":"X","price":1},{"id":"x","name":"Y","price":2}]}]}"#;
        assert!(matches!(
            Menu::from_json(json),
            Err(MenuError::DuplicateItem(id)) if id == "x"
        ));
    }

    #[test]
    fn blank_names_are_rejected() {
        let json = r#"{"categories":[{"id":"a","name":"A","items":[{"id":"x","name":" ","price":1}]}]}"#;
        assert!(matches!(Menu::from_json(json), Err(MenuError::UnnamedItem(_))));
    }

    #[test]
    fn negative_prices_do_not_parse() {
        let json = r#"{"categories":[{"id":"a","name":"A","items":[{"id":"x","name":"X","price":-5}]}]}"#;
        assert!(matches!(Menu::from_json(json), Err(MenuError::Parse(_))));
    }

    #[test]
    fn default_menu_is_cached() {
        assert!(std::ptr::eq(Menu::default_menu(), Menu::default_menu()));
    }
}
