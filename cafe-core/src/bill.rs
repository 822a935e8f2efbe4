//! Bill view model: a pure projection of the cart plus display flags.
use serde::{Deserialize, Serialize};

use crate::cart::Cart;

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillLine {
    /// Position in the cart at render time; the only valid input to `Cart::remove`.
    pub index: usize,
    pub name: String,
    pub price: u32,
    pub removable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillView {
    /// Fixed empty-cart view. Flags and messages never apply to it.
    Empty,
    Items {
        lines: Vec<BillLine>,
        total: u64,
        message: Option<String>,
        place_action: bool,
    },
}

impl BillView {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub fn lines(&self) -> &[BillLine] {
        match self {
            Self::Empty => &[],
            Self::Items { lines, .. } => lines,
        }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        match self {
            Self::Empty => 0,
            Self::Items { total, .. } => *total,
        }
    }

    #[must_use]
    pub const fn has_place_action(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Items { place_action, .. } => *place_action,
        }
    }
}

/// Render the bill for `cart`.
///
/// An empty `extra_message` means no trailing message line.
#[must_use]
pub fn render(
    cart: &Cart,
    removable: bool,
    show_place_button: bool,
    extra_message: &str,
) -> BillView {
    if cart.is_empty() {
        return BillView::Empty;
    }

    let lines = cart
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| BillLine {
            index,
            name: item.name.clone(),
            price: item.price,
            removable,
        })
        .collect();

    BillView::Items {
        lines,
        total: cart.total(),
        message: (!extra_message.is_empty()).then(|| extra_message.to_string()),
        place_action: show_place_button,
    }
}
