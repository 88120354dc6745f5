//! Preview Events
//!
//! Event-based communication for UI synchronization during preview playback.
//! Events are queued on the player and drained by the rendering layer.

use crate::player::PreviewState;
use serde::{Deserialize, Serialize};

/// Events emitted by the preview player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviewEvent {
    /// Playback state changed (playing, paused, idle)
    StateChanged {
        /// The new preview state
        state: PreviewState,
    },

    /// A play request arrived for an item without a preview URL.
    /// Informational only; the state does not change.
    NoPreviewAvailable {
        /// The item that has no preview
        item_id: String,
    },

    /// The preview finished playing naturally
    Completed {
        /// The item whose preview finished
        item_id: String,
    },

    /// Error occurred during preview playback
    Error {
        /// Error message
        message: String,
    },
}
