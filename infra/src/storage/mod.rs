//! Storage module - uploaded file persistence

pub mod local;

pub use local::LocalMediaStore;
