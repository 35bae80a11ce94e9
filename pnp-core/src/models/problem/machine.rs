use crate::models::common::Duration;

/// Specifies the pick-and-place machine timings and head capacity. Immutable.
#[derive(Clone, Debug)]
pub struct Machine {
    /// Amount of placement heads. The scheduler drives a single head; the
    /// value is carried for reporting.
    pub head_count: usize,
    /// Amount of components the head can carry per pickup trip.
    pub head_capacity: usize,
    /// Head travel speed in mm/s.
    pub travel_speed: f64,
    /// Time to pick components from a feeder, in seconds.
    pub pick_time: Duration,
    /// Time to place one component, in seconds.
    pub place_time: Duration,
    /// Time for the vision system to align one component, in seconds.
    pub vision_align_time: Duration,
    /// Time to change a PCB between job iterations, in seconds.
    pub pcb_changeover_time: Duration,
}
