//! Interface definitions for the synchronization framework seam.
//!
//! The framework drives destinations through the `Destination` trait, so any
//! backend can be synchronized into by the same run loop.

mod destination;

pub use destination::{Destination, ObjectIter};
