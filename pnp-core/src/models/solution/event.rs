#[cfg(test)]
#[path = "../../../tests/unit/models/solution/event_test.rs"]
mod event_test;

use crate::models::common::{Distance, Duration};
use crate::models::problem::Node;

/// A single directed move of the machine head between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct TravelArc {
    /// Start x coordinate in mm.
    pub x_i: f64,
    /// Start y coordinate in mm.
    pub y_i: f64,
    /// End x coordinate in mm.
    pub x_j: f64,
    /// End y coordinate in mm.
    pub y_j: f64,
    /// Arc length in mm.
    pub distance: Distance,
}

/// Specifies the event kinds of an execution schedule.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventKind {
    /// The head picks components from a feeder.
    Pickup,
    /// The head places one component on the PCB.
    Place,
    /// The head travels between two nodes.
    Travel,
    /// A finished board is swapped for the next one.
    Changeover,
}

impl EventKind {
    /// Returns the kind label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Pickup => "pickup",
            EventKind::Place => "place",
            EventKind::Travel => "travel",
            EventKind::Changeover => "changeover",
        }
    }
}

/// One step of the execution schedule. Plain data: repeats of a job copy
/// events by value.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Event kind.
    pub kind: EventKind,
    /// Human readable event encoding, stable across runs.
    pub detail: String,
    /// Event duration in seconds.
    pub time: Duration,
    /// Head motion, present for travel events only.
    pub arc: Option<TravelArc>,
}

impl Event {
    /// Creates a pickup event at a feeder.
    pub fn pickup(feeder: &Node, time: Duration) -> Self {
        Self {
            kind: EventKind::Pickup,
            detail: format!("pickup_{}_{}", feeder.id, feeder.part_type),
            time,
            arc: None,
        }
    }

    /// Creates a place event at a placement.
    pub fn place(placement: &Node, time: Duration) -> Self {
        Self {
            kind: EventKind::Place,
            detail: format!("place_{}_{}", placement.id, placement.part_type),
            time,
            arc: None,
        }
    }

    /// Creates a changeover event between two job iterations.
    pub fn changeover(finished_id: &str, started_id: &str, time: Duration) -> Self {
        Self {
            kind: EventKind::Changeover,
            detail: format!("changeover_{finished_id}_{started_id}"),
            time,
            arc: None,
        }
    }

    /// Creates a travel event between two nodes of one routing trip.
    pub fn travel(from: &Node, to: &Node, time: Duration, arc: TravelArc) -> Self {
        Self::travel_with_label(from, &from.part_type, to, time, arc)
    }

    /// Creates a travel event between two feeders. The start part label is
    /// the literal `Feeder` so feeder hops are distinguishable from routing
    /// arcs of a part type named like a feeder.
    pub fn feeder_travel(from: &Node, to: &Node, time: Duration, arc: TravelArc) -> Self {
        Self::travel_with_label(from, "Feeder", to, time, arc)
    }

    fn travel_with_label(
        from: &Node,
        from_label: &str,
        to: &Node,
        time: Duration,
        arc: TravelArc,
    ) -> Self {
        Self {
            kind: EventKind::Travel,
            detail: format!("travel_{}-{}-{}-{}", from.id, from_label, to.id, to.part_type),
            time,
            arc: Some(arc),
        }
    }
}
