//! Mapshot extraction: preview images of maps, normalized to JPEG.
//!
//! Images are gathered from a game installation (an unpacked maps
//! directory or the consolidated maps archive) and from custom packages,
//! then written flat into one output directory as `<basename>.jpg`.

pub mod normalize;
pub mod source;
pub mod sync;

pub use source::{MapshotImage, Source};
pub use sync::{PendingCleanup, SyncReport, synchronize};
