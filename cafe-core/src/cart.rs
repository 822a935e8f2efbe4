//! Session cart: the ordered list of items the customer has picked.
use serde::{Deserialize, Serialize};

/// A single line in the cart. Prices are whole rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub price: u32,
}

impl LineItem {
    #[must_use]
    pub fn new(name: impl Into<String>, price: u32) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// A cart line as the backend stores it in `/save-order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderLine<'a> {
    pub name: &'a str,
    pub price: u32,
}

/// In-memory cart. Display order is insertion order; lines have no identity
/// beyond their position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create a new empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Menu data is trusted, so this never fails.
    pub fn add(&mut self, name: impl Into<String>, price: u32) {
        self.items.push(LineItem::new(name, price));
    }

    /// Remove the item at `index`, returning it.
    ///
    /// Out-of-range indices are ignored. Indices shift after every removal, so
    /// callers must only pass positions taken from the most recent bill.
    pub fn remove(&mut self, index: usize) -> Option<LineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Clear the entire cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit prices; zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.price)).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Borrowed wire lines, in bill order.
    #[must_use]
    pub fn order_lines(&self) -> Vec<OrderLine<'_>> {
        self.items
            .iter()
            .map(|item| OrderLine {
                name: &item.name,
                price: item.price,
            })
            .collect()
    }
}
