//! # StarKit Core
//!
//! Core types, errors, and utilities shared by the StarKit crates.
//! Provides the error hierarchy, the synchronous event bus that carries
//! scene notifications, and a few type aliases for single-threaded sharing.

pub mod error;
pub mod event_bus;
pub mod types;

pub use error::{Error, HistoryError, Result, SceneError};

pub use event_bus::{Categorized, EventBus, EventFilter, SubscriptionId};

pub use types::{shared, Shared, SharedVec};
