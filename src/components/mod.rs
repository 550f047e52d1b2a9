// Export components
pub mod saved_events;
pub mod storage;

// Re-export the saved events handle
pub use saved_events::SavedEventsHandle;
