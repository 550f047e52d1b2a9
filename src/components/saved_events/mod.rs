//! Bookmarked events, kept in memory and mirrored to a storage slot.
//!
//! The set is hydrated once from storage when the handle is created.
//! Until then `is_loaded()` is false and nothing is written back, so an empty
//! startup state can never overwrite what a previous session saved. Toggles
//! made before hydration finishes are replayed on top of the loaded set.

mod actor;
mod handle;
mod set;

pub use handle::SavedEventsHandle;
pub use set::SavedEventSet;
