//! # Event Bus Module
//!
//! A typed, synchronous publish/subscribe channel. The canvas publishes its
//! scene notifications (`object:added`, `moving`, `refresh`, ...) through it
//! and observers such as the UI layer subscribe with a filter.
//!
//! Everything runs on the caller's thread: `publish` invokes every matching
//! listener before it returns.
//!
//! ## Usage
//!
//! ```rust
//! use starkit_core::event_bus::{Categorized, EventBus, EventFilter};
//!
//! #[derive(Debug, Clone)]
//! enum Ping { Loud, Quiet }
//!
//! impl Categorized for Ping {
//!     type Category = bool;
//!     fn category(&self) -> bool { matches!(self, Ping::Loud) }
//! }
//!
//! let mut bus = EventBus::new();
//! let id = bus.subscribe(EventFilter::Categories(vec![true]), |event: &Ping| {
//!     println!("heard {:?}", event);
//! });
//! assert_eq!(bus.publish(Ping::Loud), 1);
//! assert_eq!(bus.publish(Ping::Quiet), 0);
//! bus.unsubscribe(id);
//! ```

mod bus;

pub use bus::*;
