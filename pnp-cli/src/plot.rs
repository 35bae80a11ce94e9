//! Renders one figure per unique job: feeders as black squares, placements
//! coloured by part type, travel arcs in progressively lighter shades per
//! pickup trip, and the PCB bounding box drawn dashed.

use crate::CliError;
use plotters::prelude::*;
use pnp_core::models::problem::Job;
use pnp_core::models::solution::{EventKind, JobSequence, TravelArc};
use std::path::Path;

const FIGURE_SIZE: (u32, u32) = (960, 720);
const MARGIN_MM: f64 = 5.0;

/// Palette assigned to part types in sorted order, cycled when exhausted.
const PART_PALETTE: [RGBColor; 6] = [RED, BLUE, GREEN, MAGENTA, CYAN, YELLOW];

const FEEDER_HOP_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Renders the figure of one job iteration to a PNG file.
pub fn render_job_figure(job: &Job, sequence: &JobSequence, path: &Path) -> Result<(), CliError> {
    let nodes = job.feeders.iter().chain(job.placements.iter());
    let (x_range, y_range) = match bounds(nodes.map(|node| (node.x, node.y))) {
        Some(bounds) => bounds,
        None => return Ok(()),
    };

    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} ({})", job.id, job.name), ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(
            x_range.0 - MARGIN_MM..x_range.1 + MARGIN_MM,
            y_range.0 - MARGIN_MM..y_range.1 + MARGIN_MM,
        )
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .x_desc("x (mm)")
        .y_desc("y (mm)")
        .draw()
        .map_err(render_error)?;

    if let Some((px, py)) = bounds(job.placements.iter().map(|node| (node.x, node.y))) {
        chart
            .draw_series(
                dashed_rectangle(px, py)
                    .into_iter()
                    .map(|segment| PathElement::new(segment, BLACK.stroke_width(1))),
            )
            .map_err(render_error)?;
    }

    let mut part_types =
        job.placements.iter().map(|node| node.part_type.clone()).collect::<Vec<_>>();
    part_types.sort();
    part_types.dedup();

    for trip in split_trips(sequence).iter() {
        let base = trip_color(job, part_types.as_slice(), trip.as_slice());
        for (idx, arc) in trip.iter().enumerate() {
            let color = if is_feeder_hop(job, arc) {
                FEEDER_HOP_COLOR
            } else {
                shade(base, idx, trip.len())
            };
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(arc.x_i, arc.y_i), (arc.x_j, arc.y_j)],
                    color.stroke_width(2),
                )))
                .map_err(render_error)?;
        }
    }

    for part_type in part_types.iter() {
        let color = part_color(part_types.as_slice(), part_type);
        chart
            .draw_series(
                job.placements
                    .iter()
                    .filter(|node| &node.part_type == part_type)
                    .map(|node| Circle::new((node.x, node.y), 4, color.filled())),
            )
            .map_err(render_error)?
            .label(part_type.clone())
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    chart
        .draw_series(job.feeders.iter().map(|feeder| {
            EmptyElement::at((feeder.x, feeder.y))
                + Rectangle::new([(-4, -4), (4, 4)], BLACK.filled())
                + Text::new(feeder.id.clone(), (6, 6), ("sans-serif", 12))
        }))
        .map_err(render_error)?;

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE)
        .draw()
        .map_err(render_error)?;

    root.present().map_err(render_error)?;

    Ok(())
}

fn render_error(err: impl std::error::Error) -> CliError {
    CliError::Render(err.to_string())
}

fn bounds(points: impl Iterator<Item = (f64, f64)>) -> Option<((f64, f64), (f64, f64))> {
    points.fold(None, |acc, (x, y)| {
        let ((x_min, x_max), (y_min, y_max)) =
            acc.unwrap_or(((x, x), (y, y)));
        Some(((x_min.min(x), x_max.max(x)), (y_min.min(y), y_max.max(y))))
    })
}

/// Splits the sequence into pickup trips: the travel arcs between one pickup
/// and the next. A trailing feeder transfer belongs to the trip it follows.
fn split_trips(sequence: &JobSequence) -> Vec<Vec<TravelArc>> {
    let mut trips = Vec::new();
    let mut current: Vec<TravelArc> = Vec::new();

    for event in sequence.events.iter() {
        match event.kind {
            EventKind::Pickup => {
                if !current.is_empty() {
                    trips.push(std::mem::take(&mut current));
                }
            }
            EventKind::Travel => {
                if let Some(arc) = event.arc.as_ref() {
                    current.push(arc.clone());
                }
            }
            _ => {}
        }
    }
    if !current.is_empty() {
        trips.push(current);
    }

    trips
}

fn feeder_at(job: &Job, x: f64, y: f64) -> Option<&str> {
    job.feeders
        .iter()
        .find(|feeder| feeder.x == x && feeder.y == y)
        .map(|feeder| feeder.part_type.as_str())
}

fn is_feeder_hop(job: &Job, arc: &TravelArc) -> bool {
    feeder_at(job, arc.x_i, arc.y_i).is_some() && feeder_at(job, arc.x_j, arc.y_j).is_some()
}

/// Resolves the trip colour from the part type of the feeder the trip
/// starts at.
fn trip_color(job: &Job, part_types: &[String], trip: &[TravelArc]) -> RGBColor {
    trip.first()
        .and_then(|arc| feeder_at(job, arc.x_i, arc.y_i))
        .map(|part_type| part_color(part_types, part_type))
        .unwrap_or(FEEDER_HOP_COLOR)
}

fn part_color(part_types: &[String], part_type: &str) -> RGBColor {
    let idx = part_types.iter().position(|candidate| candidate == part_type).unwrap_or(0);
    PART_PALETTE[idx % PART_PALETTE.len()]
}

/// Interpolates a trip arc colour towards white: early arcs are light, the
/// final arc carries the full base colour.
fn shade(base: RGBColor, idx: usize, count: usize) -> RGBColor {
    let mix = 0.3 + 0.7 * (idx as f64 / count.saturating_sub(1).max(1) as f64);
    let channel = |value: u8| (value as f64 * mix + 255. * (1. - mix)).round() as u8;

    RGBColor(channel(base.0), channel(base.1), channel(base.2))
}

/// Approximates a dashed rectangle outline with short solid segments.
fn dashed_rectangle(x_range: (f64, f64), y_range: (f64, f64)) -> Vec<Vec<(f64, f64)>> {
    let corners = [
        (x_range.0, y_range.0),
        (x_range.1, y_range.0),
        (x_range.1, y_range.1),
        (x_range.0, y_range.1),
        (x_range.0, y_range.0),
    ];
    let dash = ((x_range.1 - x_range.0) + (y_range.1 - y_range.0)).max(1.) / 60.;

    let mut segments = Vec::new();
    for pair in corners.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let length = ((to.0 - from.0).powi(2) + (to.1 - from.1).powi(2)).sqrt();
        if length == 0. {
            continue;
        }
        let direction = ((to.0 - from.0) / length, (to.1 - from.1) / length);

        let mut offset = 0.;
        while offset < length {
            let end = (offset + dash).min(length);
            segments.push(vec![
                (from.0 + direction.0 * offset, from.1 + direction.1 * offset),
                (from.0 + direction.0 * end, from.1 + direction.1 * end),
            ]);
            offset += 2. * dash;
        }
    }

    segments
}
