mod cart;
mod catalog;
mod ids;

pub use cart::{CartEntry, CartKind, ItemRef, ItemType};
pub use catalog::{
    CatalogPreset, CreateDesigner, CreatePack, CreatePreset, Designer, Genre, Pack, PackPreset,
    Vst,
};
pub use ids::{CartId, DesignerId, EntryId, GenreId, PackId, PresetId, VstId};
