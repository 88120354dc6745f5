//! The preview player state machine

use crate::error::{PreviewError, Result};
use crate::events::PreviewEvent;
use crate::source::{PreviewSource, SourceFactory};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Preview playback state. At most one item is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviewState {
    /// No preview active, no source held
    Idle,

    /// Preview for this item is playing
    Playing(String),

    /// Preview for this item is paused; the source is kept for resume
    Paused(String),
}

impl PreviewState {
    /// The active item id, if any
    pub fn item_id(&self) -> Option<&str> {
        match self {
            PreviewState::Idle => None,
            PreviewState::Playing(id) | PreviewState::Paused(id) => Some(id),
        }
    }
}

/// Single-instance preview player.
///
/// Invariant: at most one acquired source exists at any time. Switching items
/// tears the previous source down (stop + release) before acquiring the next
/// one; completion, error, and teardown all release it.
pub struct PreviewPlayer<F: SourceFactory> {
    factory: F,
    state: PreviewState,
    source: Option<F::Source>,
    events: VecDeque<PreviewEvent>,
}

impl<F: SourceFactory> PreviewPlayer<F> {
    /// Create an idle player
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            state: PreviewState::Idle,
            source: None,
            events: VecDeque::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    /// True when this item's preview is playing
    pub fn is_playing(&self, item_id: &str) -> bool {
        matches!(&self.state, PreviewState::Playing(id) if id == item_id)
    }

    /// Handle a play request for an item.
    ///
    /// For the active item this toggles play/pause. For a different item the
    /// current source is torn down first, then a new one is acquired and
    /// started. An item without a preview URL changes nothing and queues an
    /// informational [`PreviewEvent::NoPreviewAvailable`].
    pub fn play(&mut self, item_id: &str, preview_url: Option<&str>) -> Result<()> {
        if self.state.item_id() == Some(item_id) {
            return self.toggle(item_id);
        }

        let Some(url) = preview_url else {
            debug!(item_id, "Play requested for item without a preview");
            self.events
                .push_back(PreviewEvent::NoPreviewAvailable {
                    item_id: item_id.to_string(),
                });
            return Ok(());
        };

        // Teardown before acquire: the old source must be gone first
        self.release();

        let mut source = match self.factory.acquire(url) {
            Ok(source) => source,
            Err(err) => {
                self.fail(err.to_string());
                return Err(err);
            }
        };
        if let Err(err) = source.play() {
            drop(source);
            self.fail(err.to_string());
            return Err(err);
        }

        self.source = Some(source);
        self.transition(PreviewState::Playing(item_id.to_string()));
        Ok(())
    }

    /// Toggle play/pause for the active item. The paused source is reused on
    /// resume; no reallocation happens.
    pub fn toggle(&mut self, item_id: &str) -> Result<()> {
        match self.state.clone() {
            PreviewState::Playing(id) if id == item_id => {
                if let Some(source) = self.source.as_mut() {
                    source.pause();
                }
                self.transition(PreviewState::Paused(id));
                Ok(())
            }
            PreviewState::Paused(id) if id == item_id => {
                let source = self.source.as_mut().ok_or_else(|| {
                    PreviewError::InvalidOperation("paused without a source".to_string())
                })?;
                if let Err(err) = source.play() {
                    self.fail(err.to_string());
                    return Err(err);
                }
                self.transition(PreviewState::Playing(id));
                Ok(())
            }
            _ => Err(PreviewError::InvalidOperation(format!(
                "toggle for inactive item: {item_id}"
            ))),
        }
    }

    /// The platform reported that playback finished
    pub fn completed(&mut self) {
        if let Some(item_id) = self.state.item_id().map(String::from) {
            self.events.push_back(PreviewEvent::Completed { item_id });
        }
        self.release();
        self.transition(PreviewState::Idle);
    }

    /// The platform reported a load or playback error
    pub fn errored(&mut self, message: impl Into<String>) {
        self.fail(message.into());
    }

    /// Component teardown: release everything
    pub fn teardown(&mut self) {
        self.release();
        if self.state != PreviewState::Idle {
            self.transition(PreviewState::Idle);
        }
    }

    /// Drain queued events for the UI
    pub fn drain_events(&mut self) -> Vec<PreviewEvent> {
        self.events.drain(..).collect()
    }

    fn transition(&mut self, state: PreviewState) {
        debug!(?state, "Preview state changed");
        self.state = state.clone();
        self.events.push_back(PreviewEvent::StateChanged { state });
    }

    fn fail(&mut self, message: String) {
        self.events.push_back(PreviewEvent::Error { message });
        self.release();
        if self.state != PreviewState::Idle {
            self.transition(PreviewState::Idle);
        }
    }

    fn release(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.stop();
        }
    }
}

impl<F: SourceFactory> Drop for PreviewPlayer<F> {
    fn drop(&mut self) {
        self.release();
    }
}
