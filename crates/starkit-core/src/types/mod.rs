//! Type aliases for single-threaded shared state.
//!
//! StarKit mutates everything on one thread, so sharing is always
//! `Rc<RefCell<T>>` and never a lock.

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// # Example
/// ```rust
/// use starkit_core::{shared, Shared};
///
/// let log: Shared<Vec<String>> = shared(Vec::new());
/// log.borrow_mut().push("added".to_string());
/// assert_eq!(log.borrow().len(), 1);
/// ```
pub type Shared<T> = Rc<RefCell<T>>;

/// A shared vector, mostly used by tests and observers collecting events.
pub type SharedVec<T> = Rc<RefCell<Vec<T>>>;

/// Wrap a value in a [`Shared`].
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
