//! Catalog item types
//!
//! Presets and preset packs as sold on the storefront. These records are
//! created by upload flows and are read-only from the storefront's
//! perspective; mutation is limited to owner deletes.

use super::ids::{DesignerId, GenreId, PackId, PresetId, VstId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public summary of the designer who uploaded an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Designer {
    pub id: DesignerId,
    pub username: String,
    /// Profile image URL, if the designer uploaded one
    pub profile_image_url: Option<String>,
}

/// A musical genre tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// A VST plugin a preset targets (e.g. "Serum", "Vital")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vst {
    pub id: VstId,
    pub name: String,
}

/// A single preset as returned by catalog queries, enriched with
/// designer, genre, and VST summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPreset {
    pub id: PresetId,

    pub title: String,

    pub description: Option<String>,

    /// Price in cents (0 for free presets)
    pub price_cents: i64,

    /// Preset category tag (e.g. "bass", "lead", "fx")
    pub preset_type: String,

    /// URL of the audio preview rendered for this preset
    pub preview_url: Option<String>,

    pub designer: Option<Designer>,

    pub genre: Option<Genre>,

    pub vst: Option<Vst>,

    pub created_at: DateTime<Utc>,
}

/// A child preset row inside a pack, in pack order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackPreset {
    pub id: PresetId,
    pub title: String,
    /// Each pack child carries its own preview URL
    pub preview_url: Option<String>,
    pub position: i64,
}

/// A preset pack: an ordered collection of presets sold as one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    pub id: PackId,

    pub title: String,

    pub description: Option<String>,

    /// Price in cents for the whole pack
    pub price_cents: i64,

    pub designer: Option<Designer>,

    pub genre: Option<Genre>,

    /// Child presets in pack order
    pub presets: Vec<PackPreset>,

    pub created_at: DateTime<Utc>,
}

/// Input for creating a preset (upload flows, seeding, tests)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePreset {
    pub title: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub preset_type: String,
    pub preview_url: Option<String>,
    pub designer_id: Option<DesignerId>,
    pub genre_id: Option<GenreId>,
    pub vst_id: Option<VstId>,
    /// Set when the preset belongs to a pack
    pub pack_id: Option<PackId>,
    pub pack_position: Option<i64>,
}

/// Input for creating a pack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePack {
    pub title: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub designer_id: Option<DesignerId>,
    pub genre_id: Option<GenreId>,
}

/// Input for creating a designer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDesigner {
    pub username: String,
    pub profile_image_url: Option<String>,
}
