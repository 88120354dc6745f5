//! Catalog card view models.
//!
//! A [`CatalogCard`] is the render-ready projection of one catalog item:
//! formatted price, owner controls visibility, and the truncated pack child
//! rows. Audio preview playback itself lives in `patchbay-preview`; the card
//! only resolves which preview URL belongs to which row.

use patchbay_core::{CatalogPreset, DesignerId, ItemRef, Pack, PackPreset};

/// Maximum number of child preset rows shown on a pack card.
pub const MAX_PACK_ROWS: usize = 5;

/// Either kind of catalog item, as displayed on a card.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogItem {
    Preset(CatalogPreset),
    Pack(Pack),
}

impl CatalogItem {
    pub fn item_ref(&self) -> ItemRef {
        match self {
            CatalogItem::Preset(p) => ItemRef::preset(p.id.as_str()),
            CatalogItem::Pack(p) => ItemRef::pack(p.id.as_str()),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CatalogItem::Preset(p) => &p.title,
            CatalogItem::Pack(p) => &p.title,
        }
    }

    pub fn price_cents(&self) -> i64 {
        match self {
            CatalogItem::Preset(p) => p.price_cents,
            CatalogItem::Pack(p) => p.price_cents,
        }
    }

    fn designer_id(&self) -> Option<&DesignerId> {
        let designer = match self {
            CatalogItem::Preset(p) => p.designer.as_ref(),
            CatalogItem::Pack(p) => p.designer.as_ref(),
        };
        designer.map(|d| &d.id)
    }
}

/// View model for one storefront card.
#[derive(Debug, Clone)]
pub struct CatalogCard {
    item: CatalogItem,
    /// The signed-in designer viewing the card, if any
    viewer: Option<DesignerId>,
}

impl CatalogCard {
    pub fn new(item: CatalogItem, viewer: Option<DesignerId>) -> Self {
        Self { item, viewer }
    }

    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    /// Formatted price string ("Free" or "$4.99").
    pub fn price_display(&self) -> String {
        let cents = self.item.price_cents();
        if cents == 0 {
            "Free".to_string()
        } else {
            format!("${}.{:02}", cents / 100, cents % 100)
        }
    }

    /// Pack child rows to render, capped at [`MAX_PACK_ROWS`]. Empty for
    /// preset cards.
    pub fn pack_rows(&self) -> &[PackPreset] {
        match &self.item {
            CatalogItem::Preset(_) => &[],
            CatalogItem::Pack(pack) => {
                let end = pack.presets.len().min(MAX_PACK_ROWS);
                &pack.presets[..end]
            }
        }
    }

    /// Whether the viewer owns this item (shows edit/delete controls).
    pub fn is_owner(&self) -> bool {
        match (&self.viewer, self.item.designer_id()) {
            (Some(viewer), Some(designer)) => viewer == designer,
            _ => false,
        }
    }

    /// Resolve the preview URL for a playable row on this card: the card's
    /// own item, or one of a pack's child presets.
    pub fn preview_url_for(&self, item_id: &str) -> Option<&str> {
        match &self.item {
            CatalogItem::Preset(preset) => {
                if preset.id.as_str() == item_id {
                    preset.preview_url.as_deref()
                } else {
                    None
                }
            }
            CatalogItem::Pack(pack) => pack
                .presets
                .iter()
                .find(|child| child.id.as_str() == item_id)
                .and_then(|child| child.preview_url.as_deref()),
        }
    }
}
