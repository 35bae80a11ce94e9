use crate::utils::Point;
use std::fmt;

/// Distinguishes the two station kinds the machine head can visit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind {
    /// A fixed pickup station holding a reel of one part type.
    Feeder,
    /// A target location on the PCB for one component.
    Placement,
}

/// Represents a feeder or a placement. Immutable after construction.
#[derive(Clone, Debug)]
pub struct Node {
    /// Node id, unique across feeders and unique across a job's placements.
    pub id: String,
    /// Station kind.
    pub kind: NodeKind,
    /// Part type held (feeder) or required (placement).
    pub part_type: String,
    /// X coordinate in mm.
    pub x: f64,
    /// Y coordinate in mm.
    pub y: f64,
}

impl Node {
    /// Creates a feeder node.
    pub fn feeder(id: &str, part_type: &str, x: f64, y: f64) -> Self {
        Self { id: id.to_string(), kind: NodeKind::Feeder, part_type: part_type.to_string(), x, y }
    }

    /// Creates a placement node.
    pub fn placement(id: &str, part_type: &str, x: f64, y: f64) -> Self {
        Self {
            id: id.to_string(),
            kind: NodeKind::Placement,
            part_type: part_type.to_string(),
            x,
            y,
        }
    }

    /// Returns the node position as a point.
    pub fn position(&self) -> Point {
        (self.x, self.y)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<'{}': '{}'>", self.id, self.part_type)
    }
}
