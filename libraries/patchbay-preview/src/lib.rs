//! Patchbay Preview
//!
//! Platform-agnostic audio preview playback for catalog cards.
//!
//! The storefront plays at most one preview at a time. [`PreviewPlayer`] is an
//! explicit state machine (`Idle` / `Playing` / `Paused`) driven by discrete
//! inputs - play requested, toggle requested, completed, errored, teardown -
//! so the lifecycle of the underlying platform audio handle (acquire/release)
//! is centralized and provably single-instance.
//!
//! The platform handle itself sits behind the [`PreviewSource`] /
//! [`SourceFactory`] traits; audio decoding is not this crate's concern.

#![forbid(unsafe_code)]

mod error;
mod events;
mod player;
mod source;

pub use error::{PreviewError, Result};
pub use events::PreviewEvent;
pub use player::{PreviewPlayer, PreviewState};
pub use source::{PreviewSource, SourceFactory};
