//! Platform seam for preview playback
//!
//! The storefront runs on platforms with different audio primitives; the
//! player only needs acquire, play, pause, and stop. Releasing a source is
//! dropping it - implementations detach their listeners and free the
//! underlying handle in `Drop`.

use crate::error::Result;

/// A live platform audio handle bound to one preview URL
pub trait PreviewSource {
    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the handle alive for resume
    fn pause(&mut self);

    /// Stop playback ahead of release
    fn stop(&mut self);
}

/// Creates platform sources for preview URLs
pub trait SourceFactory {
    /// The source type this factory produces
    type Source: PreviewSource;

    /// Acquire a new source bound to `url`
    fn acquire(&mut self, url: &str) -> Result<Self::Source>;
}
