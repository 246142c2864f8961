use super::money::{MAX_UNIT_PRICE, Price};
use crate::error::{OrderError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a catalog item, assigned when the catalog is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(Uuid);

impl MenuItemId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A raw catalog row before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuEntry {
    pub name: String,
    pub price: Decimal,
}

impl MenuEntry {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub unit_price: Price,
}

/// The restaurant's menu. Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    /// Validates every entry and assigns ids.
    ///
    /// Fails with [`OrderError::Configuration`] on an empty catalog, a blank
    /// name, a duplicate name, a negative price or a price above
    /// [`MAX_UNIT_PRICE`].
    pub fn new(entries: impl IntoIterator<Item = MenuEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for entry in entries {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(OrderError::Configuration(
                    "menu item name must not be empty".to_string(),
                ));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(OrderError::Configuration(format!(
                    "duplicate menu item '{name}'"
                )));
            }
            let unit_price = Price::new(entry.price).map_err(|_| {
                OrderError::Configuration(format!(
                    "menu item '{name}' has negative price {}",
                    entry.price
                ))
            })?;
            if entry.price > MAX_UNIT_PRICE {
                return Err(OrderError::Configuration(format!(
                    "menu item '{name}' price {} exceeds the maximum of {MAX_UNIT_PRICE}",
                    entry.price
                )));
            }
            items.push(MenuItem {
                id: MenuItemId::generate(),
                name: name.to_string(),
                unit_price,
            });
        }

        if items.is_empty() {
            return Err(OrderError::Configuration("menu is empty".to_string()));
        }

        Ok(Self { items })
    }

    /// The built-in Cryptic Valley menu.
    pub fn house_menu() -> Result<Self> {
        Self::new([
            MenuEntry::new("Gobi Paratha", dec!(0.0001)),
            MenuEntry::new("Aloo Paratha", dec!(0.002)),
            MenuEntry::new("Muli Paratha", dec!(0.003)),
            MenuEntry::new("Gobi Paneer", dec!(0.002)),
            MenuEntry::new("Paneer Butter Masala", dec!(0.01)),
            MenuEntry::new("Paneer Tikka", dec!(0.02)),
        ])
    }

    pub fn list(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&MenuItem> {
        let name = name.trim();
        self.items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_menu() {
        let menu = MenuCatalog::house_menu().unwrap();
        assert_eq!(menu.list().len(), 6);
        assert_eq!(menu.list()[1].name, "Aloo Paratha");
        assert_eq!(menu.list()[1].unit_price.value(), dec!(0.0020));
    }

    #[test]
    fn test_list_is_stable() {
        let menu = MenuCatalog::house_menu().unwrap();
        let first: Vec<MenuItemId> = menu.list().iter().map(|i| i.id).collect();
        let second: Vec<MenuItemId> = menu.list().iter().map(|i| i.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_lookup() {
        let menu = MenuCatalog::house_menu().unwrap();
        let tikka = menu.find_by_name(" paneer tikka").unwrap();
        assert_eq!(menu.get(tikka.id), Some(tikka));
        assert!(menu.find_by_name("Pizza").is_none());
    }

    #[test]
    fn test_rejects_negative_price() {
        let result = MenuCatalog::new([MenuEntry::new("Lassi", dec!(-0.001))]);
        assert!(matches!(result, Err(OrderError::Configuration(_))));
    }

    #[test]
    fn test_rejects_blank_name() {
        let result = MenuCatalog::new([MenuEntry::new("   ", dec!(0.001))]);
        assert!(matches!(result, Err(OrderError::Configuration(_))));
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        let result = MenuCatalog::new([
            MenuEntry::new("Lassi", dec!(0.001)),
            MenuEntry::new("lassi", dec!(0.002)),
        ]);
        assert!(matches!(result, Err(OrderError::Configuration(_))));

        let result = MenuCatalog::new(Vec::new());
        assert!(matches!(result, Err(OrderError::Configuration(_))));
    }

    #[test]
    fn test_rejects_price_above_ceiling() {
        let result = MenuCatalog::new([MenuEntry::new("Gold Thali", Decimal::MAX)]);
        assert!(matches!(result, Err(OrderError::Configuration(_))));

        let menu = MenuCatalog::new([MenuEntry::new("Gold Thali", MAX_UNIT_PRICE)]).unwrap();
        assert_eq!(menu.list()[0].unit_price.value(), MAX_UNIT_PRICE);
    }

    #[test]
    fn test_free_item_allowed() {
        let menu = MenuCatalog::new([MenuEntry::new("Water", dec!(0))]).unwrap();
        assert_eq!(menu.list()[0].unit_price, Price::ZERO);
    }
}
