//! Cart and wishlist types
//!
//! The cart and the wishlist are two collections of the same entry shape,
//! distinguished by a [`CartKind`] tag. An entry belongs to exactly one
//! collection at a time; moving between them is a single logical operation.

use super::ids::{CartId, EntryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of catalog item an entry references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Preset,
    Pack,
}

impl ItemType {
    /// Wire name ("preset" / "pack")
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Preset => "preset",
            ItemType::Pack => "pack",
        }
    }

    /// Pluralized collection name used as a cache key ("presets" / "packs")
    pub fn collection(self) -> &'static str {
        match self {
            ItemType::Preset => "presets",
            ItemType::Pack => "packs",
        }
    }

    /// Capitalized name for user-facing messages ("Preset" / "Pack")
    pub fn display_name(self) -> &'static str {
        match self {
            ItemType::Preset => "Preset",
            ItemType::Pack => "Pack",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a catalog item (preset or pack, mutually exclusive)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    #[serde(rename = "item_type")]
    pub kind: ItemType,
    #[serde(rename = "item_id")]
    pub id: String,
}

impl ItemRef {
    /// Reference a preset by id
    pub fn preset(id: impl Into<String>) -> Self {
        Self {
            kind: ItemType::Preset,
            id: id.into(),
        }
    }

    /// Reference a pack by id
    pub fn pack(id: impl Into<String>) -> Self {
        Self {
            kind: ItemType::Pack,
            id: id.into(),
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Tag distinguishing the two entry collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartKind {
    Cart,
    Wishlist,
}

impl CartKind {
    /// Wire and cache-key name ("cart" / "wishlist")
    pub fn as_str(self) -> &'static str {
        match self {
            CartKind::Cart => "cart",
            CartKind::Wishlist => "wishlist",
        }
    }

    /// The opposite collection (move target)
    pub fn other(self) -> Self {
        match self {
            CartKind::Cart => CartKind::Wishlist,
            CartKind::Wishlist => CartKind::Cart,
        }
    }
}

impl fmt::Display for CartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CartKind {
    type Err = crate::MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cart" => Ok(CartKind::Cart),
            "wishlist" => Ok(CartKind::Wishlist),
            other => Err(crate::MarketError::invalid_input(format!(
                "unknown cart kind: {other}"
            ))),
        }
    }
}

/// One line in a cart or wishlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: EntryId,

    /// Owning cart collection
    pub cart_id: CartId,

    /// The referenced catalog item
    #[serde(flatten)]
    pub item: ItemRef,

    /// Always 1 for digital items
    pub quantity: i64,

    /// Item title, denormalized for display
    pub title: String,

    /// Item price in cents, denormalized for display
    pub price_cents: i64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_type_names() {
        assert_eq!(ItemType::Preset.as_str(), "preset");
        assert_eq!(ItemType::Pack.collection(), "packs");
        assert_eq!(ItemType::Pack.display_name(), "Pack");
    }

    #[test]
    fn cart_kind_other_is_involutive() {
        assert_eq!(CartKind::Cart.other(), CartKind::Wishlist);
        assert_eq!(CartKind::Cart.other().other(), CartKind::Cart);
    }

    #[test]
    fn cart_kind_parses_wire_names() {
        assert_eq!("cart".parse::<CartKind>().unwrap(), CartKind::Cart);
        assert_eq!("wishlist".parse::<CartKind>().unwrap(), CartKind::Wishlist);
        assert!("basket".parse::<CartKind>().is_err());
    }

    #[test]
    fn item_ref_serializes_with_wire_field_names() {
        let json = serde_json::to_value(ItemRef::preset("p1")).unwrap();
        assert_eq!(json["item_type"], "preset");
        assert_eq!(json["item_id"], "p1");
    }
}
