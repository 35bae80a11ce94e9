//! Problem domain models.

mod node;
pub use self::node::{Node, NodeKind};

mod machine;
pub use self::machine::Machine;

mod job;
pub use self::job::Job;

mod setup;
pub use self::setup::{FeederDefinition, JobDefinition, PlacementDefinition, Setup};
