#[cfg(test)]
#[path = "../../tests/unit/format/table_test.rs"]
mod table_test;

use pnp_core::models::solution::JobSequence;
use serde::Serialize;

/// One row of the result table: an event with resolved coordinates.
#[derive(Clone, Debug, Serialize)]
pub struct EventRow {
    /// Job iteration id the event belongs to.
    pub job_id: String,
    /// Event kind label.
    pub event_type: String,
    /// Event detail encoding.
    pub detail: String,
    /// Start x coordinate in mm.
    pub x1: f64,
    /// Start y coordinate in mm.
    pub y1: f64,
    /// End x coordinate in mm.
    pub x2: f64,
    /// End y coordinate in mm.
    pub y2: f64,
    /// Distance covered in mm; zero for stationary events.
    pub distance: f64,
    /// Event duration in seconds.
    pub time: f64,
}

/// Flattens job sequences into the flat result table, one row per event.
///
/// Travel rows take their coordinates and distance from the travel arc.
/// Stationary rows carry the previous event's destination forward, so every
/// row is positioned. The very first row has no prior event and is
/// backfilled from the second row's origin, sparing consumers a special
/// case for row 0.
pub fn build_event_table(sequences: &[JobSequence]) -> Vec<EventRow> {
    let mut rows = Vec::new();
    let mut position = (0., 0.);

    for sequence in sequences.iter() {
        for event in sequence.events.iter() {
            let (x1, y1, x2, y2, distance) = match event.arc.as_ref() {
                Some(arc) => (arc.x_i, arc.y_i, arc.x_j, arc.y_j, arc.distance),
                None => (position.0, position.1, position.0, position.1, 0.),
            };
            position = (x2, y2);

            rows.push(EventRow {
                job_id: sequence.iteration_id.clone(),
                event_type: event.kind.label().to_string(),
                detail: event.detail.clone(),
                x1,
                y1,
                x2,
                y2,
                distance,
                time: event.time,
            });
        }
    }

    if rows.len() > 1 {
        let (x, y) = (rows[1].x1, rows[1].y1);
        let first = &mut rows[0];
        first.x1 = x;
        first.y1 = y;
        first.x2 = x;
        first.y2 = y;
    }

    rows
}
