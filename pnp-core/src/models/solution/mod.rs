//! Solution domain models.

mod event;
pub use self::event::{Event, EventKind, TravelArc};

mod sequence;
pub use self::sequence::JobSequence;
